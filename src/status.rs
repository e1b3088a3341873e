//! Exit status codes for the CLI
//!
//! slimcss follows standard Unix exit code conventions:
//! - 0: Success, including `--help` and `--version`
//! - 1: At least one job reported an error
//! - 130: User interrupted (Ctrl+C, standard SIGINT exit code)

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Successful execution (all jobs clean, or help/version requested)
    Success = 0,
    /// At least one job produced an error
    Error = 1,
    /// User interrupted (Ctrl+C) - standard SIGINT code
    Interrupted = 130,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Fold one job outcome into an accumulated process status.
    ///
    /// A failed job makes the whole invocation fail, but never downgrades
    /// an earlier failure back to success.
    pub fn and(self, job_failed: bool) -> Self {
        if job_failed { ExitStatus::Error } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_job_outcomes() {
        let status = ExitStatus::Success.and(false).and(true).and(false);
        assert_eq!(status, ExitStatus::Error);
        assert_eq!(ExitStatus::Success.and(false), ExitStatus::Success);
    }
}
