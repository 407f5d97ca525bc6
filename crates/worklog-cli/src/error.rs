use thiserror::Error;

use worklog_core::ClientError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("invalid date '{value}', expected yyyy-MM-dd")]
    InvalidDate { value: String },

    #[error("server is not reachable")]
    Unreachable,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Client(ClientError::Api(_)) => 3,
            Self::Client(_) => 4,
            Self::InvalidDate { .. } => 2,
            Self::Unreachable => 5,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
