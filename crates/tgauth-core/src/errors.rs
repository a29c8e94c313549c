use thiserror::Error;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// The assertion did not verify.
    #[error("verification failed: {0}")]
    Verification(#[from] crate::verification::VerificationError),
    /// The MAC primitive failed.
    #[error("signature error: {0}")]
    Signature(#[from] crate::signature::SignatureError),
    /// The redirect URI could not be parsed.
    #[error("invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),
}
