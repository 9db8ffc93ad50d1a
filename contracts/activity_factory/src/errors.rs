use activity_interface::{ClassifiedError, ErrorKind};
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidParameters = 4,
    /// The registry does not accept registrations from this factory.
    RegistryRejected = 5,
    /// The challenge host does not accept instances from this factory.
    HostRejected = 6,
    NotFound = 7,
}

impl ClassifiedError for FactoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            FactoryError::InvalidParameters => ErrorKind::Validation,
            FactoryError::NotFound => ErrorKind::State,
            _ => ErrorKind::Authorization,
        }
    }
}
