/// Coarse classification of contract errors.
///
/// Deployment and inspection tooling use it to decide between aborting and
/// reporting a fault and moving on to the next activity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad parameters at creation time.
    Validation,
    /// Caller is not allowed to perform the write.
    Authorization,
    /// Operation does not apply to the current participant or instance state.
    State,
    /// Custody accounting would be violated. Indicates a bug.
    Consistency,
}

impl ErrorKind {
    pub fn aborts(&self) -> bool {
        !matches!(self, ErrorKind::State)
    }
}

pub trait ClassifiedError {
    fn kind(&self) -> ErrorKind;

    fn aborts(&self) -> bool {
        self.kind().aborts()
    }
}
