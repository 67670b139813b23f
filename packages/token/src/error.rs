//! Error types for claims decoding, token redemption and key/config setup

use crate::claims::ActionKind;
use thiserror::Error;

/// Result of decoding claims or parsing a token
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result of redeeming a token or a signed link
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Structural failures while decoding a token or its claims.
///
/// Variants never carry the offending bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input does not parse as a token or a claims envelope
    #[error("malformed input: {0}")]
    Malformed(&'static str),

    /// Action tag is not one of the known actions
    #[error("unknown action tag")]
    UnknownAction,

    /// Parameter block does not match the declared action's fields
    #[error("parameters do not match action `{0}`")]
    VariantMismatch(ActionKind),
}

impl DecodeError {
    /// Create a malformed input error
    #[inline]
    #[must_use]
    pub fn malformed(reason: &'static str) -> Self {
        DecodeError::Malformed(reason)
    }
}

/// Failures on the end-to-end redemption path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Token or its claims could not be decoded
    #[error("malformed token: {0}")]
    Malformed(#[from] DecodeError),

    /// Signature does not match the claims under this key
    #[error("invalid token signature")]
    BadSignature,

    /// Token expiry is in the past
    #[error("token has expired")]
    Expired,

    /// Token is valid but grants a different action
    #[error("token grants `{found}`, expected `{expected}`")]
    WrongAction {
        /// Action the caller asked for
        expected: ActionKind,
        /// Action the token actually grants
        found: ActionKind,
    },
}

impl VerifyError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(reason: &'static str) -> Self {
        VerifyError::Malformed(DecodeError::Malformed(reason))
    }
}

/// Signing key construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Key material is empty
    #[error("signing key must not be empty")]
    Empty,

    /// Key material could not be hex-decoded
    #[error("signing key is not valid hex")]
    InvalidHex,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config document is not valid JSON for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Signing key in the config is unusable
    #[error("Key error: {0}")]
    Key(#[from] KeyError),
}
