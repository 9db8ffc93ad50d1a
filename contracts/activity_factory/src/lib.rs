#![no_std]

mod errors;
mod events;
mod storage;

pub use errors::FactoryError;
pub use storage::FactoryConfig;

use activity_interface::{
    ActivityRegistryClient, ChallengeConfig, ChallengeHandle, ChallengeHostClient,
    CreatedActivity, DepositTerms, ForfeitPolicy, Incentive, NftPolicy, NftTerms,
};
use events::{
    ArbiterChangedEvent, DepositChallengeCreatedEvent, ForfeitPolicyChangedEvent, InitializedEvent,
    NftChallengeCreatedEvent,
};
use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};
use storage::DataKey;

#[contract]
pub struct ActivityFactoryContract;

fn load_config(env: &Env) -> Result<FactoryConfig, FactoryError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(FactoryError::NotInitialized)
}

fn load_admin_config(env: &Env, admin: &Address) -> Result<FactoryConfig, FactoryError> {
    let config = load_config(env)?;
    if *admin != config.admin {
        return Err(FactoryError::Unauthorized);
    }
    admin.require_auth();
    Ok(config)
}

fn arbiter_for(config: &FactoryConfig, creator: &Address) -> Address {
    config.arbiter.clone().unwrap_or_else(|| creator.clone())
}

/// Open an instance on the host and index it in the registry.
///
/// Both collaborators are checked before anything is written, so once the
/// instance exists its registration cannot be refused.
#[allow(clippy::too_many_arguments)]
fn create(
    env: &Env,
    config: &FactoryConfig,
    creator: &Address,
    title: &String,
    description: &String,
    total_rounds: u32,
    max_participants: u32,
    is_public: bool,
    incentive: Incentive,
) -> Result<CreatedActivity, FactoryError> {
    let factory = env.current_contract_address();

    // Both collaborators must accept this factory
    let registry = ActivityRegistryClient::new(env, &config.registry);
    if !registry.is_factory(&factory) {
        return Err(FactoryError::RegistryRejected);
    }
    let host = ChallengeHostClient::new(env, &config.host);
    if !host.is_factory(&factory) {
        return Err(FactoryError::HostRejected);
    }

    // Open the instance
    let incentive_kind = incentive.kind();
    let instance_id = host.open_challenge(
        &factory,
        &ChallengeConfig {
            creator: creator.clone(),
            arbiter: arbiter_for(config, creator),
            total_rounds,
            max_participants,
            is_public,
            incentive,
        },
    );
    let instance = ChallengeHandle {
        host: config.host.clone(),
        instance_id,
    };

    // Index it in the registry
    let activity_id = registry.register(
        &factory,
        creator,
        title,
        description,
        &is_public,
        &incentive_kind,
        &instance,
    );

    // Append to the factory's own list
    let index: u32 = env
        .storage()
        .instance()
        .get(&DataKey::ActivityCount)
        .unwrap_or(0);
    env.storage()
        .persistent()
        .set(&DataKey::Activity(index), &instance);
    env.storage()
        .instance()
        .set(&DataKey::ActivityCount, &(index + 1));

    log!(env, "challenge created", activity_id, instance_id);

    Ok(CreatedActivity {
        activity_id,
        instance,
        creator: creator.clone(),
        title: title.clone(),
    })
}

#[contractimpl]
impl ActivityFactoryContract {
    /// Initialize the factory with its registry, challenge host and deposit token
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        host: Address,
        deposit_token: Address,
        forfeit_policy: ForfeitPolicy,
    ) -> Result<(), FactoryError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(FactoryError::AlreadyInitialized);
        }
        admin.require_auth();

        let config = FactoryConfig {
            admin: admin.clone(),
            registry: registry.clone(),
            host: host.clone(),
            deposit_token,
            forfeit_policy,
            arbiter: None,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::ActivityCount, &0u32);

        InitializedEvent {
            admin,
            registry,
            host,
        }
        .publish(&env);

        Ok(())
    }

    /// Registry address the factory was initialized with.
    ///
    /// `NotInitialized` means the factory was never set up and must be redeployed.
    pub fn registry_handle(env: Env) -> Result<Address, FactoryError> {
        Ok(load_config(&env)?.registry)
    }

    pub fn config(env: Env) -> Result<FactoryConfig, FactoryError> {
        load_config(&env)
    }

    /// Change the forfeit policy for deposit challenges created from now on (admin only)
    pub fn set_forfeit_policy(
        env: Env,
        admin: Address,
        forfeit_policy: ForfeitPolicy,
    ) -> Result<(), FactoryError> {
        let mut config = load_admin_config(&env, &admin)?;

        config.forfeit_policy = forfeit_policy;
        env.storage().instance().set(&DataKey::Config, &config);

        ForfeitPolicyChangedEvent {
            admin,
            forfeit_policy,
        }
        .publish(&env);

        Ok(())
    }

    /// Name the arbiter for challenges created from now on (admin only).
    ///
    /// `None` makes each creator the arbiter of their own challenge.
    pub fn set_arbiter(
        env: Env,
        admin: Address,
        arbiter: Option<Address>,
    ) -> Result<(), FactoryError> {
        let mut config = load_admin_config(&env, &admin)?;

        config.arbiter = arbiter.clone();
        env.storage().instance().set(&DataKey::Config, &config);

        ArbiterChangedEvent { admin, arbiter }.publish(&env);

        Ok(())
    }

    /// Create a deposit-backed challenge and register it
    pub fn create_deposit_challenge(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        deposit_amount: i128,
        total_rounds: u32,
        max_participants: u32,
        is_public: bool,
    ) -> Result<CreatedActivity, FactoryError> {
        let config = load_config(&env)?;
        creator.require_auth();

        if deposit_amount <= 0 || total_rounds == 0 || max_participants == 0 {
            return Err(FactoryError::InvalidParameters);
        }
        // A creator may not judge the forfeits they collect
        if config.forfeit_policy == ForfeitPolicy::ReturnToCreator
            && arbiter_for(&config, &creator) == creator
        {
            return Err(FactoryError::InvalidParameters);
        }

        let incentive = Incentive::Deposit(DepositTerms {
            token: config.deposit_token.clone(),
            amount: deposit_amount,
            policy: config.forfeit_policy,
        });
        let created = create(
            &env,
            &config,
            &creator,
            &title,
            &description,
            total_rounds,
            max_participants,
            is_public,
            incentive,
        )?;

        DepositChallengeCreatedEvent {
            creator,
            activity_id: created.activity_id,
            instance: created.instance.clone(),
            title,
            deposit_amount,
        }
        .publish(&env);

        Ok(created)
    }

    /// Create an NFT-badge challenge and register it
    pub fn create_nft_challenge(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        collection: Address,
        nft_policy: NftPolicy,
        total_rounds: u32,
        max_participants: u32,
        is_public: bool,
    ) -> Result<CreatedActivity, FactoryError> {
        let config = load_config(&env)?;
        creator.require_auth();

        if total_rounds == 0 || max_participants == 0 {
            return Err(FactoryError::InvalidParameters);
        }

        let incentive = Incentive::Nft(NftTerms {
            collection: collection.clone(),
            policy: nft_policy,
        });
        let created = create(
            &env,
            &config,
            &creator,
            &title,
            &description,
            total_rounds,
            max_participants,
            is_public,
            incentive,
        )?;

        NftChallengeCreatedEvent {
            creator,
            activity_id: created.activity_id,
            instance: created.instance.clone(),
            title,
            collection,
        }
        .publish(&env);

        Ok(created)
    }

    /// Every instance this factory created, in creation order
    pub fn get_all_activities(env: Env) -> Vec<ChallengeHandle> {
        let mut activities = Vec::new(&env);
        for index in 0..Self::activity_count(env.clone()) {
            if let Some(instance) = env
                .storage()
                .persistent()
                .get::<_, ChallengeHandle>(&DataKey::Activity(index))
            {
                activities.push_back(instance);
            }
        }
        activities
    }

    pub fn activity_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::ActivityCount)
            .unwrap_or(0)
    }

    /// Instance created at position `index` (0-based creation order)
    pub fn get_activity(env: Env, index: u32) -> Result<ChallengeHandle, FactoryError> {
        env.storage()
            .persistent()
            .get(&DataKey::Activity(index))
            .ok_or(FactoryError::NotFound)
    }
}
