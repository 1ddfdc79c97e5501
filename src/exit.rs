// src/exit.rs
//! Process exit codes for `plagcheck`.
//!
//! Scripts grading a batch of submissions branch on these.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlagExit {
    Success = 0,
    /// I/O, store or config failure.
    Error = 1,
    /// Unparseable source or unsupported language.
    InvalidInput = 2,
    /// The requested submission is not stored.
    NotFound = 3,
    /// A comparison reached the configured threshold.
    Threshold = 4,
}

impl PlagExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for PlagExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(PlagExit::Success.code(), 0);
        assert_eq!(PlagExit::Error.code(), 1);
        assert_eq!(PlagExit::InvalidInput.code(), 2);
        assert_eq!(PlagExit::NotFound.code(), 3);
        assert_eq!(PlagExit::Threshold.code(), 4);
    }
}
