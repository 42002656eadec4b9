use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    /// The cookie carried a valid signature but its content could not be decoded
    #[error("Payload error: {0}")]
    Payload(String),

    #[error("Header error: {0}")]
    Header(String),
}
