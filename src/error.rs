use std::path::PathBuf;
use thiserror::Error;

/// Failure of a terminal submit or any other call across the backend port.
/// The `Display` text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{entity} #{id} was not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("Invalid email or password")]
    Unauthorized,
    #[error("Invalid verification code")]
    InvalidCode,
    #[error("Invalid form data: {0}")]
    InvalidForm(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("a flow needs at least one step")]
    Empty,
    #[error("step `{0}` appears more than once")]
    DuplicateStep(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} code `{code}`")]
pub struct ParseCodeError {
    pub kind: &'static str,
    pub code: String,
}

impl ParseCodeError {
    pub fn new(kind: &'static str, code: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a valid HH:MM time")]
pub struct TimeParseError(pub String);
