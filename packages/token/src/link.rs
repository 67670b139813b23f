//! Expiring signed download links
//!
//! A link for object `id` carries two query parameters: `ex`, the expiry in
//! lowercase hex unix seconds, and `hm`, the base64url HMAC-SHA256 of the
//! link message. The message is the byte length of `id` in decimal, a `:`,
//! `id` itself, a `\n`, then the decimal expiry, so no `(id, expiry)` pair
//! signs the same bytes as another. Links share the token signing key.
//!
//! `hm` is emitted unpadded; padded input is accepted as well.

use crate::crypto::hmac_sha256::hmac_sha256_sign;
use crate::crypto::{Signature, SigningKey};
use crate::error::{VerifyError, VerifyResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine as _, alphabet};

/// URL-safe decoder that takes `hm` with or without trailing `=`
const HM_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Signature and expiry for one object link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedLink {
    expires_at: i64,
    signature: Signature,
}

impl SignedLink {
    /// Sign a link to `id` that stays valid through `expires_at`.
    #[must_use]
    pub fn sign(id: &str, expires_at: i64, key: &SigningKey) -> Self {
        Self {
            expires_at,
            signature: link_signature(id, expires_at, key),
        }
    }

    /// Sign a link to `id` that expires `ttl_seconds` after `now`.
    #[must_use]
    pub fn sign_for(id: &str, ttl_seconds: u64, key: &SigningKey, now: i64) -> Self {
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        Self::sign(id, now.saturating_add(ttl), key)
    }

    /// Last second at which the link is accepted
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Value of the `ex` query parameter
    #[must_use]
    pub fn ex(&self) -> String {
        if self.expires_at < 0 {
            format!("-{:x}", self.expires_at.unsigned_abs())
        } else {
            format!("{:x}", self.expires_at)
        }
    }

    /// Value of the `hm` query parameter
    #[must_use]
    pub fn hm(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.signature.as_bytes())
    }

    /// Query string, without the leading `?`
    #[must_use]
    pub fn query(&self) -> String {
        format!("ex={}&hm={}", self.ex(), self.hm())
    }

    /// Check the `ex`/`hm` parameters of a link to `id`, returning its expiry.
    ///
    /// # Errors
    /// - [`VerifyError::Malformed`] if `ex` or `hm` does not parse
    /// - [`VerifyError::BadSignature`] if `hm` is not the link's signature
    /// - [`VerifyError::Expired`] if the expiry is before `now`
    pub fn verify(id: &str, ex: &str, hm: &str, key: &SigningKey, now: i64) -> VerifyResult<i64> {
        let expires_at = parse_ex(ex)?;
        let signature = HM_DECODER
            .decode(hm)
            .ok()
            .and_then(|bytes| Signature::from_slice(&bytes))
            .ok_or(VerifyError::malformed("link signature"))?;

        if link_signature(id, expires_at, key) != signature {
            tracing::warn!(key_id = key.key_id(), "link rejected: bad signature");
            return Err(VerifyError::BadSignature);
        }
        if expires_at < now {
            return Err(VerifyError::Expired);
        }
        Ok(expires_at)
    }
}

/// `ex` is hex with an optional leading `-`; `from_str_radix` alone also takes `+`.
fn parse_ex(ex: &str) -> VerifyResult<i64> {
    if ex.starts_with('+') {
        return Err(VerifyError::malformed("link expiry"));
    }
    i64::from_str_radix(ex, 16).map_err(|_| VerifyError::malformed("link expiry"))
}

fn link_signature(id: &str, expires_at: i64, key: &SigningKey) -> Signature {
    let message = format!("{}:{id}\n{expires_at}", id.len());
    hmac_sha256_sign(message.as_bytes(), key)
}
