//! HMAC-SHA256 token signing and verification

use super::key::SigningKey;
use crate::claims::EncodedClaims;
use hmac::Mac;
use std::fmt;
use subtle::{Choice, ConstantTimeEq};

/// Length of an HMAC-SHA256 tag, in bytes
pub const SIGNATURE_LEN: usize = 32;

/// Keyed tag over encoded claims.
///
/// Equality is constant time.
#[derive(Clone, Copy)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Wrap a tag taken from a token; `None` unless exactly [`SIGNATURE_LEN`] bytes.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; SIGNATURE_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Raw tag bytes
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

impl ConstantTimeEq for Signature {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

/// HMAC-SHA256 over arbitrary bytes
#[inline]
pub(crate) fn hmac_sha256_sign(data: &[u8], key: &SigningKey) -> Signature {
    let mut mac = key.mac();
    mac.update(data);
    Signature(mac.finalize().into_bytes().into())
}

/// Sign encoded claims.
#[inline]
#[must_use]
pub fn sign(claims: &EncodedClaims, key: &SigningKey) -> Signature {
    hmac_sha256_sign(claims.as_bytes(), key)
}

/// Recompute the tag for `claims` and compare it to `signature` in constant time.
#[must_use]
pub fn verify_tag(claims: &EncodedClaims, signature: &Signature, key: &SigningKey) -> bool {
    sign(claims, key) == *signature
}
