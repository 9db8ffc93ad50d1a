use activity_interface::{ChallengeHandle, IncentiveKind};
use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActivityRegisteredEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub activity_id: u64,
    pub instance: ChallengeHandle,
    pub incentive_kind: IncentiveKind,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactoryAuthorizedEvent {
    #[topic]
    pub admin: Address,
    pub factory: Address,
    pub authorized: bool,
}

/// Emitted when the contract WASM is upgraded to a new hash.
#[contractevent]
pub struct UpgradedEvent {
    #[topic]
    pub admin: Address,
    pub new_wasm_hash: soroban_sdk::BytesN<32>,
}

/// Emitted when the admin role is transferred to a new address.
#[contractevent]
pub struct AdminChangedEvent {
    #[topic]
    pub old_admin: Address,
    pub new_admin: Address,
}
