//! Library surface of the `saldo` binary, exposed for integration
//! tests.

pub mod exit_codes;
pub mod run;

use exit_codes::{EXIT_RUNTIME, EXIT_USAGE};

/// Command error carrying its exit code. The binary prints `message`
/// (and `hint`, when present) to stderr and exits with `code`.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_RUNTIME,
            message: msg.into(),
            hint: None,
        }
    }
}
