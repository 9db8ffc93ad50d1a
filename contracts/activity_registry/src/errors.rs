use activity_interface::{ClassifiedError, ErrorKind};
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotFound = 4,
    DuplicateInstance = 5,
}

impl ClassifiedError for RegistryError {
    fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotFound => ErrorKind::State,
            RegistryError::DuplicateInstance => ErrorKind::Consistency,
            _ => ErrorKind::Authorization,
        }
    }
}
