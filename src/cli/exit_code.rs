//! Exit code definitions for ssh-key-retriever
//!
//! Provides standardized exit codes for different error conditions.
//!
//! `Success` also covers the "identifier has no underscore" early-exit path
//! and the no-matching-record outcome; existing sshd integrations rely on
//! both exiting 0.

/// Exit codes for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Successful execution (including "no match" outcomes)
    Success = 0,
    /// Transport-level failure talking to the directory service
    RequestError = 1,
    /// Configuration error (missing file, invalid or placeholder values)
    ConfigError = 2,
    /// Response failure (unreadable body, malformed top-level JSON)
    ResponseError = 3,
}

impl From<ExitCode> for u8 {
    fn from(code: ExitCode) -> Self {
        code as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
