//! Stateless signed capability tokens
//!
//! A token grants its bearer one narrowly scoped, time-limited action
//! ("upload an icon up to N bytes") without any server-side session state:
//!
//! - claims are encoded with a canonical binary layout
//! - the encoded bytes are signed with HMAC-SHA256 under a shared key
//! - claims and tag travel as `base64url(claims).base64url(tag)`
//!
//! Redemption checks the tag in constant time before touching the claims,
//! then checks expiry against a caller-supplied clock.
//!
//! ```no_run
//! use cryypt_token::{ActionKind, Issuer, SigningKey, UploadIconParams, Verifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = SigningKey::new(b"a shared secret of reasonable length")?;
//! let now = 1_700_000_000;
//!
//! let token = Issuer::new(key.clone()).grant(
//!     UploadIconParams { id: "abc123".into(), max_size: 10 << 20, allow_uncompressed: false },
//!     9999,
//!     now,
//! );
//!
//! let claims = Verifier::new(key).redeem_for(token.as_str(), ActionKind::UploadIcon, now)?;
//! assert_eq!(claims.params().max_size(), Some(10 << 20));
//! # Ok(())
//! # }
//! ```

pub mod claims;
pub mod clock;
pub mod config;
pub mod crypto;
mod error;
pub mod link;
pub mod token;
pub mod verifier;

pub use claims::{
    ActionKind, ActionParams, ClaimsRecord, DataExportParams, EncodedClaims,
    UploadAttachmentParams, UploadAvatarParams, UploadIconParams,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TokenConfig;
pub use crypto::{Signature, SigningKey};
pub use error::*;
pub use link::SignedLink;
pub use token::Token;
pub use verifier::{
    DEFAULT_LINK_TTL_SECONDS, DEFAULT_TTL_SECONDS, Issuer, Verifier, issue, redeem,
};
