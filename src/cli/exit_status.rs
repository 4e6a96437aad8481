use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Completed, cancelled by the operator, or nothing to do
/// - `Failure` (1): Completed but some keys could not be written, or init found an existing config
/// - `Error` (2): Command failed (I/O error, invalid config, missing source directory)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
