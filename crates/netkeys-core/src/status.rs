// ABOUTME: Process exit status for a lookup.
// ABOUTME: 0 on success (including silent outcomes), 1 for lookup, 2 for key retrieval.

/// Outcome of a lookup as seen by the calling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Keys were emitted, or nothing was to be emitted.
    Success,
    /// Entity metadata could not be resolved, or the client could not be
    /// set up to ask.
    LookupFailed,
    /// Keys could not be retrieved after the entity resolved.
    RetrievalFailed,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::LookupFailed => 1,
            ExitStatus::RetrievalFailed => 2,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}
