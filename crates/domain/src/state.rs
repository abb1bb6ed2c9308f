//! Execution state types for UI binding.
//!
//! The execution context moves through these phases:
//! - `Empty`: nothing selected
//! - `Selected`: a request is selected and has no result yet
//! - `Succeeded` / `Failed`: the latest execution produced a response or an error

/// Phase of the execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionPhase {
    /// No request is selected.
    #[default]
    Empty,
    /// A request is selected and has not been executed since.
    Selected,
    /// The latest execution returned a response (any status code).
    Succeeded,
    /// The latest execution failed before a full response was read.
    Failed,
}

impl ExecutionPhase {
    /// Returns true once an execution result is available.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Category of an execution error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// The transport gave up waiting.
    Timeout,

    /// Invalid request body or headers.
    InvalidBody,

    /// Too many redirects.
    TooManyRedirects,

    /// Unknown or unexpected error.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_terminal_phases_are_resolved() {
        assert!(!ExecutionPhase::Empty.is_resolved());
        assert!(!ExecutionPhase::Selected.is_resolved());
        assert!(ExecutionPhase::Succeeded.is_resolved());
        assert!(ExecutionPhase::Failed.is_resolved());
    }
}
