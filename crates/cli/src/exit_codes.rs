//! CLI Exit Code Registry
//!
//! Single source of truth for the `saldo` exit codes. Exit codes are
//! part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args)               |
//! | 3-9   | pipeline  | Pipeline-specific codes                  |

/// Success - command completed without errors. An empty result set is
/// still a success; presentation renders it as an empty state.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments (unknown dimension, malformed date).
pub const EXIT_USAGE: u8 = 2;

/// Config file could not be parsed or validated, or a mapped header
/// literal was not found in the loaded table.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// A required input file is absent or unreadable. The pipeline does
/// not run.
pub const EXIT_MISSING_INPUT: u8 = 4;

/// Runtime failure after inputs were loaded (serialization, output
/// write).
pub const EXIT_RUNTIME: u8 = 5;
