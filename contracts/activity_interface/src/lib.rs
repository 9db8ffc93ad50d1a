#![no_std]

//! Types and cross-contract interfaces shared by the challenge host, the
//! activity registry and the activity factory.

mod errors;
mod types;

pub use errors::{ClassifiedError, ErrorKind};
pub use types::{
    ActivityMetadata, ChallengeConfig, ChallengeHandle, CreatedActivity, DepositTerms,
    ForfeitPolicy, Incentive, IncentiveKind, NftPolicy, NftTerms, Verdict,
};

use soroban_sdk::{contractclient, Address, Env, String};

/// Write and lookup surface of the activity registry used by factories.
#[contractclient(name = "ActivityRegistryClient")]
pub trait ActivityRegistryInterface {
    fn register(
        env: Env,
        factory: Address,
        creator: Address,
        title: String,
        description: String,
        is_public: bool,
        incentive_kind: IncentiveKind,
        instance: ChallengeHandle,
    ) -> u64;

    fn is_factory(env: Env, factory: Address) -> bool;

    fn count(env: Env) -> u64;
}

/// Instantiation and type-query surface of a challenge host.
#[contractclient(name = "ChallengeHostClient")]
pub trait ChallengeHostInterface {
    fn open_challenge(env: Env, factory: Address, config: ChallengeConfig) -> u64;

    fn is_factory(env: Env, factory: Address) -> bool;

    fn exists(env: Env, instance_id: u64) -> bool;

    fn incentive_kind(env: Env, instance_id: u64) -> IncentiveKind;
}

/// NFT collection that awards participation badges. The challenge host must
/// be allowed to mint on it.
#[contractclient(name = "BadgeCollectionClient")]
pub trait BadgeCollection {
    /// Mints one badge to `to` and returns its token id.
    fn mint(env: Env, to: Address) -> u64;
}
