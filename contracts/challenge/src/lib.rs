#![no_std]

//! Challenge host: owns any number of deposit- or NFT-backed challenge
//! instances, each with its own participants, round counter and custody.

mod errors;
mod events;
mod ledger;
mod storage;

pub use errors::ChallengeError;
pub use storage::{ChallengeState, Custody, ParticipantState, Progress};

use activity_interface::{
    BadgeCollectionClient, ChallengeConfig, ForfeitPolicy, Incentive, IncentiveKind, NftPolicy,
    Verdict,
};
use events::{
    ChallengeOpenedEvent, FactoryAuthorizedEvent, ForfeitShareClaimedEvent, ForfeitsSweptEvent,
    ParticipantJoinedEvent, ParticipantSettledEvent, RoundAdvancedEvent,
};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};
use storage::DataKey;

#[contract]
pub struct ChallengeHostContract;

fn require_admin(env: &Env, admin: &Address) -> Result<(), ChallengeError> {
    let stored_admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ChallengeError::NotInitialized)?;
    if *admin != stored_admin {
        return Err(ChallengeError::Unauthorized);
    }
    admin.require_auth();
    Ok(())
}

fn validate_config(config: &ChallengeConfig) -> Result<(), ChallengeError> {
    if config.total_rounds == 0 || config.max_participants == 0 {
        return Err(ChallengeError::InvalidParameters);
    }
    if let Incentive::Deposit(terms) = &config.incentive {
        if terms.amount <= 0 {
            return Err(ChallengeError::InvalidParameters);
        }
        // Whoever decides forfeits must not be the one collecting them
        if terms.policy == ForfeitPolicy::ReturnToCreator && config.arbiter == config.creator {
            return Err(ChallengeError::InvalidParameters);
        }
    }
    Ok(())
}

fn load_config(env: &Env, instance_id: u64) -> Result<ChallengeConfig, ChallengeError> {
    env.storage()
        .persistent()
        .get(&DataKey::Config(instance_id))
        .ok_or(ChallengeError::InstanceNotFound)
}

fn load_progress(env: &Env, instance_id: u64) -> Progress {
    env.storage()
        .persistent()
        .get(&DataKey::Progress(instance_id))
        .unwrap_or_default()
}

fn load_custody(env: &Env, instance_id: u64) -> Custody {
    env.storage()
        .persistent()
        .get(&DataKey::Custody(instance_id))
        .unwrap_or_default()
}

fn load_participants(env: &Env, instance_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Participants(instance_id))
        .unwrap_or_else(|| Vec::new(env))
}

fn load_participant(
    env: &Env,
    instance_id: u64,
    participant: &Address,
) -> Result<ParticipantState, ChallengeError> {
    env.storage()
        .persistent()
        .get(&DataKey::Participant(instance_id, participant.clone()))
        .ok_or(ChallengeError::ParticipantNotFound)
}

fn save_participant(env: &Env, instance_id: u64, participant: &Address, state: &ParticipantState) {
    env.storage()
        .persistent()
        .set(&DataKey::Participant(instance_id, participant.clone()), state);
}

/// Raise `current_round` to the lowest `rounds_completed` among unsettled
/// participants. Never lowers it; leaves it alone once everyone has settled.
fn sync_current_round(env: &Env, instance_id: u64, progress: &mut Progress) {
    let mut lowest: Option<u32> = None;
    for participant in load_participants(env, instance_id).iter() {
        let state: Option<ParticipantState> = env
            .storage()
            .persistent()
            .get(&DataKey::Participant(instance_id, participant));
        if let Some(state) = state {
            if state.settled {
                continue;
            }
            lowest = Some(lowest.map_or(state.rounds_completed, |l| l.min(state.rounds_completed)));
        }
    }
    if let Some(lowest) = lowest {
        if lowest > progress.current_round {
            progress.current_round = lowest;
        }
    }
}

fn all_settled(env: &Env, instance_id: u64, progress: &Progress) -> bool {
    let participant_count = load_participants(env, instance_id).len();
    participant_count > 0 && progress.settled_count == participant_count
}

#[contractimpl]
impl ChallengeHostContract {
    /// Initialize the host with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), ChallengeError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(ChallengeError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::NextInstanceId, &1u64);
        Ok(())
    }

    /// Allow `factory` to open new challenge instances (admin only)
    pub fn authorize_factory(
        env: Env,
        admin: Address,
        factory: Address,
    ) -> Result<(), ChallengeError> {
        require_admin(&env, &admin)?;
        env.storage()
            .instance()
            .set(&DataKey::Factory(factory.clone()), &true);
        FactoryAuthorizedEvent { admin, factory }.publish(&env);
        Ok(())
    }

    pub fn is_factory(env: Env, factory: Address) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Factory(factory))
            .unwrap_or(false)
    }

    /// Open a new challenge instance and return its host-local id.
    ///
    /// Only authorized factories may call this. Ids start at 1.
    pub fn open_challenge(
        env: Env,
        factory: Address,
        config: ChallengeConfig,
    ) -> Result<u64, ChallengeError> {
        let instance_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextInstanceId)
            .ok_or(ChallengeError::NotInitialized)?;

        if !Self::is_factory(env.clone(), factory.clone()) {
            return Err(ChallengeError::Unauthorized);
        }
        factory.require_auth();

        validate_config(&config)?;

        let storage = env.storage().persistent();
        storage.set(&DataKey::Config(instance_id), &config);
        storage.set(&DataKey::Progress(instance_id), &Progress::default());
        storage.set(&DataKey::Custody(instance_id), &Custody::default());
        storage.set(
            &DataKey::Participants(instance_id),
            &Vec::<Address>::new(&env),
        );

        let next_id = instance_id
            .checked_add(1)
            .ok_or(ChallengeError::Overflow)?;
        env.storage()
            .instance()
            .set(&DataKey::NextInstanceId, &next_id);

        log!(&env, "challenge opened", instance_id, config.total_rounds);
        ChallengeOpenedEvent {
            creator: config.creator.clone(),
            instance_id,
            incentive_kind: config.incentive.kind(),
        }
        .publish(&env);

        Ok(instance_id)
    }

    /// Whether `instance_id` names an opened instance
    pub fn exists(env: Env, instance_id: u64) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Config(instance_id))
    }

    /// Which incentive variant the instance was opened with
    pub fn incentive_kind(env: Env, instance_id: u64) -> Result<IncentiveKind, ChallengeError> {
        Ok(load_config(&env, instance_id)?.incentive.kind())
    }

    pub fn get_config(env: Env, instance_id: u64) -> Result<ChallengeConfig, ChallengeError> {
        load_config(&env, instance_id)
    }

    /// Join an instance, paying exactly its deposit (zero for NFT challenges)
    pub fn join(
        env: Env,
        instance_id: u64,
        participant: Address,
        amount: i128,
    ) -> Result<(), ChallengeError> {
        // Require participant authorization
        participant.require_auth();

        let config = load_config(&env, instance_id)?;
        let progress = load_progress(&env, instance_id);

        // Check if already joined
        if env
            .storage()
            .persistent()
            .has(&DataKey::Participant(instance_id, participant.clone()))
        {
            return Err(ChallengeError::AlreadyJoined);
        }

        // Late joiners would start below current_round.
        if progress.current_round > 0 || progress.settled_count > 0 {
            return Err(ChallengeError::ChallengeStarted);
        }

        // Check capacity
        let mut participants = load_participants(&env, instance_id);
        if participants.len() >= config.max_participants {
            return Err(ChallengeError::CapacityExceeded);
        }

        if amount != config.incentive.deposit_amount() {
            return Err(ChallengeError::WrongDepositAmount);
        }

        let mut state = ParticipantState {
            deposit_paid: false,
            rounds_completed: 0,
            settled: false,
            verdict: None,
            badge: None,
        };

        // Take the deposit into custody, or mint the join badge
        match &config.incentive {
            Incentive::Deposit(terms) => {
                let mut custody = load_custody(&env, instance_id);
                ledger::transfer_in(&env, &terms.token, &mut custody, &participant, amount)?;
                env.storage()
                    .persistent()
                    .set(&DataKey::Custody(instance_id), &custody);
            }
            Incentive::Nft(terms) => {
                if terms.policy == NftPolicy::OnJoin {
                    let badge = BadgeCollectionClient::new(&env, &terms.collection).mint(&participant);
                    state.badge = Some(badge);
                }
            }
        }
        state.deposit_paid = true;

        // Record participant
        save_participant(&env, instance_id, &participant, &state);
        participants.push_back(participant.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Participants(instance_id), &participants);

        // Emit event
        ParticipantJoinedEvent {
            participant,
            instance_id,
            deposit: amount,
        }
        .publish(&env);

        Ok(())
    }

    /// Record one more completed round for `participant`.
    ///
    /// The instance's `current_round` only moves once every unsettled
    /// participant has reached it.
    pub fn advance_round(
        env: Env,
        instance_id: u64,
        participant: Address,
    ) -> Result<u32, ChallengeError> {
        participant.require_auth();

        let config = load_config(&env, instance_id)?;
        let mut state = load_participant(&env, instance_id, &participant)?;

        if state.settled {
            return Err(ChallengeError::AlreadySettled);
        }
        if state.rounds_completed >= config.total_rounds {
            return Err(ChallengeError::RoundLimitReached);
        }

        state.rounds_completed += 1;
        save_participant(&env, instance_id, &participant, &state);

        let mut progress = load_progress(&env, instance_id);
        sync_current_round(&env, instance_id, &mut progress);
        env.storage()
            .persistent()
            .set(&DataKey::Progress(instance_id), &progress);

        RoundAdvancedEvent {
            participant,
            instance_id,
            rounds_completed: state.rounds_completed,
            current_round: progress.current_round,
        }
        .publish(&env);

        Ok(state.rounds_completed)
    }

    /// Finalize a participant's outcome.
    ///
    /// `Verdict::Completed` refunds the deposit once every round is done and
    /// may be called by the participant or the arbiter. `Verdict::Failed`
    /// forfeits the deposit into custody and may only be called by the
    /// arbiter. Returns the amount refunded.
    pub fn settle(
        env: Env,
        instance_id: u64,
        caller: Address,
        participant: Address,
        verdict: Verdict,
    ) -> Result<i128, ChallengeError> {
        // Require caller authorization
        caller.require_auth();

        let config = load_config(&env, instance_id)?;
        let mut state = load_participant(&env, instance_id, &participant)?;

        // Settled records are final
        if state.settled {
            return Err(ChallengeError::AlreadySettled);
        }

        let mut progress = load_progress(&env, instance_id);
        let mut custody = load_custody(&env, instance_id);
        let mut refunded: i128 = 0;

        match verdict {
            Verdict::Completed => {
                // Participant or arbiter, after every round
                if caller != participant && caller != config.arbiter {
                    return Err(ChallengeError::Unauthorized);
                }
                if state.rounds_completed < config.total_rounds {
                    return Err(ChallengeError::NotYetEligible);
                }
                match &config.incentive {
                    Incentive::Deposit(terms) => {
                        ledger::transfer_out(
                            &env,
                            &terms.token,
                            &mut custody,
                            &participant,
                            terms.amount,
                        )?;
                        refunded = terms.amount;
                    }
                    Incentive::Nft(terms) => {
                        if terms.policy == NftPolicy::OnCompletion {
                            let badge = BadgeCollectionClient::new(&env, &terms.collection)
                                .mint(&participant);
                            state.badge = Some(badge);
                        }
                    }
                }
                progress.completed_count += 1;
            }
            Verdict::Failed => {
                // Arbiter only; the deposit stays in custody as a forfeit
                if caller != config.arbiter {
                    return Err(ChallengeError::Unauthorized);
                }
                if let Incentive::Deposit(terms) = &config.incentive {
                    custody.forfeited = custody
                        .forfeited
                        .checked_add(terms.amount)
                        .ok_or(ChallengeError::Overflow)?;
                }
            }
        }

        // Freeze the participant record
        state.settled = true;
        state.verdict = Some(verdict);
        save_participant(&env, instance_id, &participant, &state);

        // Update progress and custody
        progress.settled_count += 1;
        sync_current_round(&env, instance_id, &mut progress);

        let storage = env.storage().persistent();
        storage.set(&DataKey::Progress(instance_id), &progress);
        storage.set(&DataKey::Custody(instance_id), &custody);

        log!(&env, "participant settled", instance_id, refunded);
        ParticipantSettledEvent {
            participant,
            instance_id,
            verdict,
            refunded,
        }
        .publish(&env);

        Ok(refunded)
    }

    /// Claim an equal share of forfeited deposits under `ForfeitPolicy::Redistribute`.
    ///
    /// Available to participants settled as completed, once everyone has settled.
    pub fn claim_share(
        env: Env,
        instance_id: u64,
        participant: Address,
    ) -> Result<i128, ChallengeError> {
        participant.require_auth();

        let config = load_config(&env, instance_id)?;
        let Incentive::Deposit(terms) = &config.incentive else {
            return Err(ChallengeError::WrongIncentive);
        };
        if terms.policy != ForfeitPolicy::Redistribute {
            return Err(ChallengeError::NothingToClaim);
        }

        let state = load_participant(&env, instance_id, &participant)?;
        if state.verdict != Some(Verdict::Completed) {
            return Err(ChallengeError::NothingToClaim);
        }

        let claimed_key = DataKey::ShareClaimed(instance_id, participant.clone());
        if env.storage().persistent().has(&claimed_key) {
            return Err(ChallengeError::AlreadySettled);
        }

        let progress = load_progress(&env, instance_id);
        if !all_settled(&env, instance_id, &progress) {
            return Err(ChallengeError::NotYetEligible);
        }

        let mut custody = load_custody(&env, instance_id);
        let share = custody.forfeited / i128::from(progress.completed_count);
        if share <= 0 {
            return Err(ChallengeError::NothingToClaim);
        }

        ledger::transfer_out(&env, &terms.token, &mut custody, &participant, share)?;
        custody.distributed = custody
            .distributed
            .checked_add(share)
            .ok_or(ChallengeError::Overflow)?;

        let storage = env.storage().persistent();
        storage.set(&DataKey::Custody(instance_id), &custody);
        storage.set(&claimed_key, &true);

        ForfeitShareClaimedEvent {
            participant,
            instance_id,
            amount: share,
        }
        .publish(&env);

        Ok(share)
    }

    /// Send undistributed forfeits to the creator under `ForfeitPolicy::ReturnToCreator`.
    pub fn sweep_forfeits(
        env: Env,
        instance_id: u64,
        creator: Address,
    ) -> Result<i128, ChallengeError> {
        let config = load_config(&env, instance_id)?;
        if creator != config.creator {
            return Err(ChallengeError::Unauthorized);
        }
        creator.require_auth();

        let Incentive::Deposit(terms) = &config.incentive else {
            return Err(ChallengeError::WrongIncentive);
        };
        if terms.policy != ForfeitPolicy::ReturnToCreator {
            return Err(ChallengeError::NothingToClaim);
        }

        let progress = load_progress(&env, instance_id);
        if !all_settled(&env, instance_id, &progress) {
            return Err(ChallengeError::NotYetEligible);
        }

        let mut custody = load_custody(&env, instance_id);
        let amount = custody.forfeited - custody.distributed;
        if amount <= 0 {
            return Err(ChallengeError::NothingToClaim);
        }

        ledger::transfer_out(&env, &terms.token, &mut custody, &creator, amount)?;
        custody.distributed += amount;
        env.storage()
            .persistent()
            .set(&DataKey::Custody(instance_id), &custody);

        ForfeitsSweptEvent {
            creator,
            instance_id,
            amount,
        }
        .publish(&env);

        Ok(amount)
    }

    /// Snapshot of round progress and custody; never mutates
    pub fn get_state(env: Env, instance_id: u64) -> Result<ChallengeState, ChallengeError> {
        let config = load_config(&env, instance_id)?;
        let progress = load_progress(&env, instance_id);
        let custody = load_custody(&env, instance_id);
        Ok(ChallengeState {
            current_round: progress.current_round,
            total_rounds: config.total_rounds,
            participant_count: load_participants(&env, instance_id).len(),
            settled_count: progress.settled_count,
            custody_balance: custody.balance(),
        })
    }

    pub fn get_participant(
        env: Env,
        instance_id: u64,
        participant: Address,
    ) -> Result<ParticipantState, ChallengeError> {
        load_config(&env, instance_id)?;
        load_participant(&env, instance_id, &participant)
    }

    /// Participants in join order
    pub fn get_participants(env: Env, instance_id: u64) -> Result<Vec<Address>, ChallengeError> {
        load_config(&env, instance_id)?;
        Ok(load_participants(&env, instance_id))
    }

    pub fn get_custody(env: Env, instance_id: u64) -> Result<Custody, ChallengeError> {
        load_config(&env, instance_id)?;
        Ok(load_custody(&env, instance_id))
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, ChallengeError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ChallengeError::NotInitialized)
    }
}
