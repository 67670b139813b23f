//! Shared HMAC signing key

use crate::error::KeyError;
use hmac::{Hmac, Mac};
use rand::{RngCore, rng};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// Length of generated keys, in bytes
pub const GENERATED_KEY_LEN: usize = 32;

/// Secret shared by every issuer and verifier of a deployment.
///
/// The raw key bytes are consumed at construction: only the keyed HMAC
/// state is retained, so the key cannot be read back, logged or embedded.
/// Cloning is cheap and clones share the same state.
#[derive(Clone)]
pub struct SigningKey {
    inner: Arc<KeyInner>,
}

struct KeyInner {
    mac: HmacSha256,
    key_id: String,
}

impl SigningKey {
    /// Build a key from raw secret bytes.
    ///
    /// # Errors
    /// Returns [`KeyError::Empty`] for empty key material.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, KeyError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(KeyError::Empty);
        }
        // Any non-empty length is a valid HMAC key.
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| KeyError::Empty)?;
        let digest = Sha256::digest(secret);
        let key_id = hex::encode(&digest[..8]);

        Ok(Self {
            inner: Arc::new(KeyInner { mac, key_id }),
        })
    }

    /// Build a key from hex-encoded secret bytes.
    ///
    /// # Errors
    /// Returns [`KeyError::InvalidHex`] or [`KeyError::Empty`].
    pub fn from_hex(encoded: &str) -> Result<Self, KeyError> {
        let secret = Zeroizing::new(hex::decode(encoded.trim()).map_err(|_| KeyError::InvalidHex)?);
        Self::new(secret.as_slice())
    }

    /// Generate a fresh random key, returning it with its hex form for
    /// distribution to the other issuers and verifiers.
    ///
    /// # Errors
    /// Never fails in practice; shares the construction path of [`SigningKey::new`].
    pub fn generate() -> Result<(Self, Zeroizing<String>), KeyError> {
        let mut secret = Zeroizing::new([0u8; GENERATED_KEY_LEN]);
        rng().fill_bytes(secret.as_mut_slice());
        let key = Self::new(secret.as_slice())?;
        Ok((key, Zeroizing::new(hex::encode(secret.as_slice()))))
    }

    /// Non-secret identifier of this key for log correlation
    #[inline]
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.inner.key_id
    }

    /// Keyed MAC state, ready for `update`
    #[inline]
    pub(crate) fn mac(&self) -> HmacSha256 {
        self.inner.mac.clone()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_id", &self.inner.key_id)
            .finish_non_exhaustive()
    }
}
