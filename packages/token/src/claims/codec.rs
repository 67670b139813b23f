//! Canonical binary encoding of [`ClaimsRecord`]
//!
//! Layout (bincode standard config: little endian, varint integers,
//! length-prefixed strings and byte blocks):
//!
//! ```text
//! envelope := action_tag: string, expires_at: i64, params: bytes
//! params   := the action's fields in declaration order
//! ```
//!
//! The parameter block is length-prefixed inside the envelope so the action
//! tag can be read and checked before any action-specific field is touched.

use super::{
    ActionKind, ActionParams, ClaimsRecord, DataExportParams, UploadAttachmentParams,
    UploadAvatarParams, UploadIconParams,
};
use crate::error::{DecodeError, DecodeResult};
use bincode::{Decode, Encode, config};

/// Largest claims payload the decoder accepts, in bytes
pub const MAX_CLAIMS_LEN: usize = 4096;

/// Canonical serialization of a [`ClaimsRecord`]; the exact bytes a signature covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedClaims(Vec<u8>);

impl EncodedClaims {
    /// Wrap raw bytes, e.g. the claims half of a parsed token
    #[inline]
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Canonical claims bytes, the input to signing
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap into the owned byte buffer
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True only for bytes that never came from [`encode`]
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for EncodedClaims {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Decode)]
struct Envelope {
    action: String,
    expires_at: i64,
    params: Vec<u8>,
}

/// Encode claims into their canonical byte form.
#[must_use]
pub fn encode(claims: &ClaimsRecord) -> EncodedClaims {
    let params = match claims.params() {
        ActionParams::UploadIcon(p) => encode_part(p),
        ActionParams::UploadAttachment(p) => encode_part(p),
        ActionParams::UploadAvatar(p) => encode_part(p),
        ActionParams::AccessDataExport(p) => encode_part(p),
    };
    let envelope = (claims.action().as_str(), claims.expires_at(), params.as_slice());
    EncodedClaims(encode_part(envelope))
}

/// Decode claims, rejecting unknown actions and mismatched parameter blocks.
///
/// # Errors
/// - [`DecodeError::Malformed`] if the envelope does not parse or has trailing bytes
/// - [`DecodeError::UnknownAction`] if the action tag is not known
/// - [`DecodeError::VariantMismatch`] if the parameters do not match the action
pub fn decode(bytes: &[u8]) -> DecodeResult<ClaimsRecord> {
    if bytes.len() > MAX_CLAIMS_LEN {
        return Err(DecodeError::malformed("claims exceed size limit"));
    }

    let envelope: Envelope =
        decode_exact(bytes).ok_or(DecodeError::malformed("claims envelope"))?;
    let kind = ActionKind::from_tag(&envelope.action).ok_or(DecodeError::UnknownAction)?;

    let params = match kind {
        ActionKind::UploadIcon => {
            decode_exact::<UploadIconParams>(&envelope.params).map(ActionParams::from)
        }
        ActionKind::UploadAttachment => {
            decode_exact::<UploadAttachmentParams>(&envelope.params).map(ActionParams::from)
        }
        ActionKind::UploadAvatar => {
            decode_exact::<UploadAvatarParams>(&envelope.params).map(ActionParams::from)
        }
        ActionKind::AccessDataExport => {
            decode_exact::<DataExportParams>(&envelope.params).map(ActionParams::from)
        }
    }
    .ok_or(DecodeError::VariantMismatch(kind))?;

    Ok(ClaimsRecord::new(params, envelope.expires_at))
}

// Writing into a Vec with no size limit cannot fail for these field types;
// an empty part still fails to decode rather than producing wrong claims.
fn encode_part<E: Encode>(value: E) -> Vec<u8> {
    bincode::encode_to_vec(value, config::standard()).unwrap_or_else(|err| {
        tracing::error!(error = %err, "claims encoding failed");
        Vec::new()
    })
}

/// Decode a value that must consume `bytes` exactly.
fn decode_exact<D: Decode<()>>(bytes: &[u8]) -> Option<D> {
    let config = config::standard().with_limit::<MAX_CLAIMS_LEN>();
    match bincode::decode_from_slice::<D, _>(bytes, config) {
        Ok((value, read)) if read == bytes.len() => Some(value),
        _ => None,
    }
}
