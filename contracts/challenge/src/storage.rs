use activity_interface::Verdict;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,                         // -> Address
    Factory(Address),              // -> bool
    NextInstanceId,                // -> u64
    Config(u64),                   // instance_id -> ChallengeConfig
    Progress(u64),                 // instance_id -> Progress
    Custody(u64),                  // instance_id -> Custody
    Participants(u64),             // instance_id -> Vec<Address>
    Participant(u64, Address),     // (instance_id, participant) -> ParticipantState
    ShareClaimed(u64, Address),    // (instance_id, participant) -> bool
}

/// Per-participant record, created on join.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantState {
    pub deposit_paid: bool,
    pub rounds_completed: u32,
    pub settled: bool,
    pub verdict: Option<Verdict>,
    pub badge: Option<u64>,
}

/// Instance-wide round bookkeeping.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Progress {
    pub current_round: u32,
    pub settled_count: u32,
    pub completed_count: u32,
}

/// Cumulative value movements of one instance.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Custody {
    pub total_in: i128,
    pub total_out: i128,
    /// Deposits retained from failed participants.
    pub forfeited: i128,
    /// Part of `forfeited` already paid out under the forfeit policy.
    pub distributed: i128,
}

impl Custody {
    pub fn balance(&self) -> i128 {
        self.total_in - self.total_out
    }
}

/// Read-only snapshot returned by `get_state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeState {
    pub current_round: u32,
    pub total_rounds: u32,
    pub participant_count: u32,
    pub settled_count: u32,
    pub custody_balance: i128,
}
