use activity_interface::ForfeitPolicy;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,          // -> FactoryConfig
    ActivityCount,   // -> u32
    Activity(u32),   // creation index -> ChallengeHandle
}

/// Everything the factory needs to create and index challenges.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactoryConfig {
    pub admin: Address,
    pub registry: Address,
    pub host: Address,
    /// Token deposits are paid in.
    pub deposit_token: Address,
    /// Applied to every deposit challenge created from now on.
    pub forfeit_policy: ForfeitPolicy,
    /// Decides `Verdict::Failed` on new challenges; `None` leaves it to the creator.
    pub arbiter: Option<Address>,
}
