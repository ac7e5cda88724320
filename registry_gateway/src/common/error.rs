use thiserror::Error;

/// Errors raised while relaying registry calls between HTTP and the chain
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid form data: {0}")]
    Form(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Provider error: {0}")]
    Provider(String),

    /// Contract call failure; the message is relayed to the caller unchanged.
    #[error("{0}")]
    Contract(String),

    #[error("Transaction {0} was dropped before confirmation")]
    Dropped(String),

    #[error("Transaction {0} reverted on-chain")]
    Reverted(String),

    #[error("Malformed project record {id}: {reason}")]
    MalformedRecord { id: u64, reason: String },

    #[error("Submission request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
