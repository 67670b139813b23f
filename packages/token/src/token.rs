//! Token wire format: `base64url(claims).base64url(signature)`
//!
//! Both halves use URL-safe base64 without padding, so the `.` delimiter
//! can never appear inside either half.

use crate::claims::EncodedClaims;
use crate::crypto::Signature;
use crate::error::{DecodeError, DecodeResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use std::fmt;

/// Separator between the claims half and the signature half
pub const DELIMITER: char = '.';

/// Transportable capability token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Token text, as sent over the wire
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned token text
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join encoded claims and their signature into a token.
#[must_use]
pub fn assemble(claims: &EncodedClaims, signature: &Signature) -> Token {
    let claims_b64 = URL_SAFE_NO_PAD.encode(claims.as_bytes());
    let signature_b64 = URL_SAFE_NO_PAD.encode(signature.as_bytes());
    Token(format!("{claims_b64}{DELIMITER}{signature_b64}"))
}

/// Split a token into its encoded claims and signature.
///
/// Nothing here is authenticated yet; the caller must verify the signature
/// before decoding the claims.
///
/// # Errors
/// Returns [`DecodeError::Malformed`] when the delimiter is missing, either
/// half is not valid base64url, or the signature is not
/// [`SIGNATURE_LEN`](crate::crypto::SIGNATURE_LEN) bytes.
pub fn parse(token: &str) -> DecodeResult<(EncodedClaims, Signature)> {
    let (claims_b64, signature_b64) = token
        .split_once(DELIMITER)
        .ok_or(DecodeError::malformed("missing delimiter"))?;

    let claims = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| DecodeError::malformed("claims encoding"))?;
    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| DecodeError::malformed("signature encoding"))?;

    let signature = Signature::from_slice(&signature)
        .ok_or(DecodeError::malformed("signature length"))?;

    Ok((EncodedClaims::from_bytes(claims), signature))
}
