use activity_interface::{IncentiveKind, Verdict};
use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactoryAuthorizedEvent {
    #[topic]
    pub admin: Address,
    pub factory: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeOpenedEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub instance_id: u64,
    pub incentive_kind: IncentiveKind,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantJoinedEvent {
    #[topic]
    pub participant: Address,
    #[topic]
    pub instance_id: u64,
    pub deposit: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundAdvancedEvent {
    #[topic]
    pub participant: Address,
    #[topic]
    pub instance_id: u64,
    pub rounds_completed: u32,
    pub current_round: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantSettledEvent {
    #[topic]
    pub participant: Address,
    #[topic]
    pub instance_id: u64,
    pub verdict: Verdict,
    pub refunded: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForfeitShareClaimedEvent {
    #[topic]
    pub participant: Address,
    #[topic]
    pub instance_id: u64,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForfeitsSweptEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub instance_id: u64,
    pub amount: i128,
}
