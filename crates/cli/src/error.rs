use murti_admin::{ApiError, ConfigError};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A result could not be rendered as JSON.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A flag combination that clap cannot express was invalid.
    #[error("Invalid arguments: {0}")]
    InvalidArgs(&'static str),
}
