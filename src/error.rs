use thiserror::Error;

/// Error types for the Smart Send SDK
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Address parsing error: {0}")]
    Address(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by a bad caller-supplied value.
    ///
    /// Malformed addresses count as invalid arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::Address(_))
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;
