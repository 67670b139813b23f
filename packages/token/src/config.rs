//! Token service configuration
//!
//! Holds the shared signing key and the lifetimes applied to granted tokens
//! and download links.

use crate::crypto::SigningKey;
use crate::error::ConfigError;
use crate::verifier::{DEFAULT_LINK_TTL_SECONDS, DEFAULT_TTL_SECONDS, Issuer, Verifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use zeroize::Zeroizing;

/// Token service settings, usually loaded from a JSON file.
///
/// ```json
/// { "signing_key": "<hex>", "default_ttl_seconds": 9999, "link_ttl_seconds": 3600 }
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Hex-encoded shared secret
    signing_key: Zeroizing<String>,
    /// Lifetime of tokens issued through [`Issuer::grant_default`]
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
    /// Lifetime of download links signed through [`Issuer::link`]
    #[serde(default = "default_link_ttl_seconds")]
    pub link_ttl_seconds: u64,
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_link_ttl_seconds() -> u64 {
    DEFAULT_LINK_TTL_SECONDS
}

impl TokenConfig {
    /// Settings for a hex-encoded key with default lifetimes
    #[must_use]
    pub fn new(signing_key_hex: impl Into<String>) -> Self {
        Self {
            signing_key: Zeroizing::new(signing_key_hex.into()),
            default_ttl_seconds: default_ttl_seconds(),
            link_ttl_seconds: default_link_ttl_seconds(),
        }
    }

    /// Parse settings from a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the document does not match the schema.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON settings file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = Zeroizing::new(std::fs::read_to_string(path.as_ref())?);
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "token config loaded");
        Ok(config)
    }

    /// Decode the configured signing key.
    ///
    /// # Errors
    /// Returns [`ConfigError::Key`] if the key is not non-empty hex.
    pub fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        Ok(SigningKey::from_hex(&self.signing_key)?)
    }

    /// Issuer that grants with `default_ttl_seconds` and links with
    /// `link_ttl_seconds`.
    ///
    /// # Errors
    /// Same as [`TokenConfig::signing_key`].
    pub fn issuer(&self) -> Result<Issuer, ConfigError> {
        Ok(Issuer::new(self.signing_key()?)
            .with_default_ttl(self.default_ttl_seconds)
            .with_link_ttl(self.link_ttl_seconds))
    }

    /// Verifier for tokens signed with the configured key.
    ///
    /// # Errors
    /// Same as [`TokenConfig::signing_key`].
    pub fn verifier(&self) -> Result<Verifier, ConfigError> {
        Ok(Verifier::new(self.signing_key()?))
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("signing_key", &"<redacted>")
            .field("default_ttl_seconds", &self.default_ttl_seconds)
            .field("link_ttl_seconds", &self.link_ttl_seconds)
            .finish()
    }
}
