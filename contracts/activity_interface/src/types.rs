use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IncentiveKind {
    Deposit,
    Nft,
}

/// What happens to deposits forfeited by failed participants.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ForfeitPolicy {
    Retain,
    ReturnToCreator,
    Redistribute,
}

/// When an NFT challenge mints a participant's badge.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NftPolicy {
    OnJoin,
    OnCompletion,
}

/// Outcome supplied to `settle`.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    Completed,
    Failed,
}

/// Locates one challenge instance: the host contract plus the host-local id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeHandle {
    pub host: Address,
    pub instance_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositTerms {
    pub token: Address,
    pub amount: i128,
    pub policy: ForfeitPolicy,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftTerms {
    pub collection: Address,
    pub policy: NftPolicy,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Incentive {
    Deposit(DepositTerms),
    Nft(NftTerms),
}

impl Incentive {
    pub fn kind(&self) -> IncentiveKind {
        match self {
            Incentive::Deposit(_) => IncentiveKind::Deposit,
            Incentive::Nft(_) => IncentiveKind::Nft,
        }
    }

    /// Amount a participant must deposit to join. Zero for NFT challenges.
    pub fn deposit_amount(&self) -> i128 {
        match self {
            Incentive::Deposit(terms) => terms.amount,
            Incentive::Nft(_) => 0,
        }
    }
}

/// Immutable parameters of one challenge instance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeConfig {
    pub creator: Address,
    /// Identity allowed to hand down a `Verdict::Failed`.
    pub arbiter: Address,
    pub total_rounds: u32,
    pub max_participants: u32,
    pub is_public: bool,
    pub incentive: Incentive,
}

/// Registry row, one per activity id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActivityMetadata {
    pub activity_id: u64,
    pub instance: ChallengeHandle,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub created_at: u64,
    pub is_public: bool,
    pub incentive_kind: IncentiveKind,
}

/// Returned by the factory's create operations.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatedActivity {
    pub activity_id: u64,
    pub instance: ChallengeHandle,
    pub creator: Address,
    pub title: String,
}
