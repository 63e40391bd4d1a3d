use std::io;
use thiserror::Error;

/// Custom error type for the netpulse application
#[derive(Error, Debug)]
pub enum NetpulseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Log persistence error: {0}")]
    Persistence(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the netpulse application
pub type Result<T> = std::result::Result<T, NetpulseError>;

impl NetpulseError {
    /// Create a persistence error
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        NetpulseError::Persistence(msg.into())
    }

    /// Create a terminal error
    pub fn terminal<S: Into<String>>(msg: S) -> Self {
        NetpulseError::Terminal(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        NetpulseError::Other(msg.into())
    }
}
