use activity_interface::{ClassifiedError, ErrorKind};
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ChallengeError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidParameters = 4,
    InstanceNotFound = 5,
    AlreadyJoined = 6,
    CapacityExceeded = 7,
    WrongDepositAmount = 8,
    ChallengeStarted = 9,
    ParticipantNotFound = 10,
    AlreadySettled = 11,
    RoundLimitReached = 12,
    NotYetEligible = 13,
    InsufficientFunds = 14,
    InsufficientCustody = 15,
    Overflow = 16,
    WrongIncentive = 17,
    NothingToClaim = 18,
}

impl ClassifiedError for ChallengeError {
    fn kind(&self) -> ErrorKind {
        match self {
            ChallengeError::InvalidParameters => ErrorKind::Validation,
            ChallengeError::NotInitialized
            | ChallengeError::AlreadyInitialized
            | ChallengeError::Unauthorized => ErrorKind::Authorization,
            ChallengeError::InsufficientCustody | ChallengeError::Overflow => {
                ErrorKind::Consistency
            }
            _ => ErrorKind::State,
        }
    }
}
