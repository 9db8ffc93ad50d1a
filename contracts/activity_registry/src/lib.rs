#![no_std]

mod errors;
mod events;
mod storage;

pub use errors::RegistryError;

use activity_interface::{ActivityMetadata, ChallengeHandle, IncentiveKind};
use events::{ActivityRegisteredEvent, AdminChangedEvent, FactoryAuthorizedEvent, UpgradedEvent};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String, Vec};
use storage::DataKey;

/// Upper bound on rows returned by a single `list` call.
pub const MAX_PAGE: u32 = 50;

#[contract]
pub struct ActivityRegistryContract;

fn require_admin(env: &Env, admin: &Address) -> Result<(), RegistryError> {
    let stored_admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(RegistryError::NotInitialized)?;
    if *admin != stored_admin {
        return Err(RegistryError::Unauthorized);
    }
    admin.require_auth();
    Ok(())
}

#[contractimpl]
impl ActivityRegistryContract {
    /// Initialize the registry with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), RegistryError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(RegistryError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::ActivityCount, &0u64);
        Ok(())
    }

    /// Allow `factory` to register activities (admin only)
    pub fn authorize_factory(
        env: Env,
        admin: Address,
        factory: Address,
    ) -> Result<(), RegistryError> {
        require_admin(&env, &admin)?;
        env.storage()
            .instance()
            .set(&DataKey::Factory(factory.clone()), &true);
        FactoryAuthorizedEvent {
            admin,
            factory,
            authorized: true,
        }
        .publish(&env);
        Ok(())
    }

    /// Stop accepting registrations from `factory`. Rows it already
    /// registered stay in place.
    pub fn revoke_factory(env: Env, admin: Address, factory: Address) -> Result<(), RegistryError> {
        require_admin(&env, &admin)?;
        env.storage()
            .instance()
            .remove(&DataKey::Factory(factory.clone()));
        FactoryAuthorizedEvent {
            admin,
            factory,
            authorized: false,
        }
        .publish(&env);
        Ok(())
    }

    pub fn is_factory(env: Env, factory: Address) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Factory(factory))
            .unwrap_or(false)
    }

    /// Index a freshly created challenge instance and return its activity id.
    ///
    /// Ids are dense and start at 1. Only authorized factories may call this.
    pub fn register(
        env: Env,
        factory: Address,
        creator: Address,
        title: String,
        description: String,
        is_public: bool,
        incentive_kind: IncentiveKind,
        instance: ChallengeHandle,
    ) -> Result<u64, RegistryError> {
        let count: u64 = env
            .storage()
            .instance()
            .get(&DataKey::ActivityCount)
            .ok_or(RegistryError::NotInitialized)?;

        // Only authorized factories may write
        if !Self::is_factory(env.clone(), factory.clone()) {
            return Err(RegistryError::Unauthorized);
        }
        factory.require_auth();

        // Check if instance is already indexed
        let reverse_key = DataKey::ActivityOf(instance.clone());
        if env.storage().persistent().has(&reverse_key) {
            return Err(RegistryError::DuplicateInstance);
        }

        // Assign the next id
        let activity_id = count + 1;
        let metadata = ActivityMetadata {
            activity_id,
            instance: instance.clone(),
            creator: creator.clone(),
            title,
            description,
            created_at: env.ledger().timestamp(),
            is_public,
            incentive_kind,
        };

        // Store metadata and reverse index
        env.storage()
            .persistent()
            .set(&DataKey::Activity(activity_id), &metadata);
        env.storage().persistent().set(&reverse_key, &activity_id);
        env.storage()
            .instance()
            .set(&DataKey::ActivityCount, &activity_id);

        log!(&env, "activity registered", activity_id, factory);
        ActivityRegisteredEvent {
            creator,
            activity_id,
            instance,
            incentive_kind,
        }
        .publish(&env);

        Ok(activity_id)
    }

    /// Get the metadata row for `activity_id`
    pub fn get_metadata(env: Env, activity_id: u64) -> Result<ActivityMetadata, RegistryError> {
        if activity_id == 0 || activity_id > Self::count(env.clone()) {
            return Err(RegistryError::NotFound);
        }
        env.storage()
            .persistent()
            .get(&DataKey::Activity(activity_id))
            .ok_or(RegistryError::NotFound)
    }

    /// Highest assigned activity id; 0 when nothing is registered
    pub fn count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::ActivityCount)
            .unwrap_or(0)
    }

    /// Reverse lookup from an instance handle to its activity id
    pub fn activity_of(env: Env, instance: ChallengeHandle) -> Result<u64, RegistryError> {
        env.storage()
            .persistent()
            .get(&DataKey::ActivityOf(instance))
            .ok_or(RegistryError::NotFound)
    }

    /// Metadata rows for ids `start..start + limit`, clamped to the
    /// registered range and to [`MAX_PAGE`] rows.
    pub fn list(env: Env, start: u64, limit: u32) -> Vec<ActivityMetadata> {
        let mut page = Vec::new(&env);
        let count = Self::count(env.clone());
        let first = start.max(1);
        let limit = u64::from(limit.min(MAX_PAGE));

        let mut activity_id = first;
        while activity_id <= count && activity_id < first + limit {
            if let Some(metadata) = env
                .storage()
                .persistent()
                .get::<_, ActivityMetadata>(&DataKey::Activity(activity_id))
            {
                page.push_back(metadata);
            }
            activity_id += 1;
        }
        page
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, RegistryError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(RegistryError::NotInitialized)
    }

    /// Upgrade the contract WASM to a new hash.
    ///
    /// Only the stored admin may call this. Emits [`UpgradedEvent`] on success.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), RegistryError> {
        require_admin(&env, &caller)?;
        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());
        UpgradedEvent {
            admin: caller,
            new_wasm_hash,
        }
        .publish(&env);
        Ok(())
    }

    /// Transfer the admin role to `new_admin`.
    ///
    /// Requires authorization from the current admin. Emits [`AdminChangedEvent`].
    pub fn set_admin(env: Env, current_admin: Address, new_admin: Address) -> Result<(), RegistryError> {
        require_admin(&env, &current_admin)?;
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        AdminChangedEvent {
            old_admin: current_admin,
            new_admin,
        }
        .publish(&env);
        Ok(())
    }
}
