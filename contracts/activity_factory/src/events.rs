use activity_interface::{ChallengeHandle, ForfeitPolicy};
use soroban_sdk::{contractevent, Address, String};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub registry: Address,
    pub host: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositChallengeCreatedEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub activity_id: u64,
    pub instance: ChallengeHandle,
    pub title: String,
    pub deposit_amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftChallengeCreatedEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub activity_id: u64,
    pub instance: ChallengeHandle,
    pub title: String,
    pub collection: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArbiterChangedEvent {
    #[topic]
    pub admin: Address,
    pub arbiter: Option<Address>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForfeitPolicyChangedEvent {
    #[topic]
    pub admin: Address,
    pub forfeit_policy: ForfeitPolicy,
}
