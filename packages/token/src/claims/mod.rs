//! Claims carried by a capability token

mod action;
mod codec;

pub use action::{
    ActionKind, ActionParams, DataExportParams, UploadAttachmentParams, UploadAvatarParams,
    UploadIconParams,
};
pub use codec::{EncodedClaims, MAX_CLAIMS_LEN, decode, encode};

/// Facts a token asserts: which action, until when, with which parameters.
///
/// The action is derived from the parameter variant, so a record can never
/// declare one action while carrying another action's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsRecord {
    expires_at: i64,
    params: ActionParams,
}

impl ClaimsRecord {
    /// Create claims that stay valid through `expires_at` (unix seconds).
    #[must_use]
    pub fn new(params: impl Into<ActionParams>, expires_at: i64) -> Self {
        Self {
            expires_at,
            params: params.into(),
        }
    }

    /// Action granted by this record
    #[inline]
    #[must_use]
    pub fn action(&self) -> ActionKind {
        self.params.kind()
    }

    /// Expiry in unix seconds
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Parameters of the granted action
    #[inline]
    #[must_use]
    pub fn params(&self) -> &ActionParams {
        &self.params
    }

    /// Take the parameters, dropping the expiry
    #[must_use]
    pub fn into_params(self) -> ActionParams {
        self.params
    }

    /// A record is expired once `now` has moved past `expires_at`.
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }
}
