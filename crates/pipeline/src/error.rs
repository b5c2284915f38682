use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty name, file, or header literal).
    ConfigValidation(String),
    /// A required input file is absent or unreadable. Blocks the run.
    MissingInput { side: String, detail: String },
    /// A mapped header literal was not found in the loaded table.
    MissingColumn { side: String, column: String },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingInput { side, detail } => {
                write!(f, "missing {side} input: {detail}")
            }
            Self::MissingColumn { side, column } => {
                write!(f, "{side} table: missing column '{column}'")
            }
        }
    }
}

impl std::error::Error for PipelineError {}
