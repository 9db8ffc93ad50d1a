use activity_interface::ChallengeHandle;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,                       // -> Address
    Factory(Address),            // -> bool
    ActivityCount,               // -> u64
    Activity(u64),               // activity_id -> ActivityMetadata
    ActivityOf(ChallengeHandle), // instance -> activity_id
}
