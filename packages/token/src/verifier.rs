//! Token issuance and redemption

use crate::claims::{self, ActionKind, ActionParams, ClaimsRecord};
use crate::clock::{Clock, SystemClock};
use crate::crypto::{SigningKey, sign, verify_tag};
use crate::error::{VerifyError, VerifyResult};
use crate::link::SignedLink;
use crate::token::{self as wire, Token};
use std::fmt;
use std::sync::Arc;

/// Encode, sign and assemble a token for `claims`.
///
/// `expires_at` is taken from the record as-is; `now` is only used to flag
/// records that are already expired when issued.
#[must_use]
pub fn issue(claims: &ClaimsRecord, key: &SigningKey, now: i64) -> Token {
    if claims.is_expired_at(now) {
        tracing::warn!(
            action = %claims.action(),
            expires_at = claims.expires_at(),
            now,
            "issuing an already expired token"
        );
    }

    let encoded = claims::encode(claims);
    let signature = sign(&encoded, key);
    tracing::debug!(action = %claims.action(), key_id = key.key_id(), "token issued");
    wire::assemble(&encoded, &signature)
}

/// Verify a token and return its claims.
///
/// The signature is checked before any claims byte is decoded, and expiry is
/// checked last. A token stays valid through the second `expires_at`.
///
/// # Errors
/// - [`VerifyError::Malformed`] if the token or its claims do not decode
/// - [`VerifyError::BadSignature`] if the signature does not match under `key`
/// - [`VerifyError::Expired`] if `expires_at < now`
pub fn redeem(token: &str, key: &SigningKey, now: i64) -> VerifyResult<ClaimsRecord> {
    let (encoded, signature) = wire::parse(token)?;

    if !verify_tag(&encoded, &signature, key) {
        tracing::warn!(key_id = key.key_id(), "token rejected: bad signature");
        return Err(VerifyError::BadSignature);
    }

    let claims = claims::decode(encoded.as_bytes())?;

    if claims.is_expired_at(now) {
        tracing::debug!(
            action = %claims.action(),
            expires_at = claims.expires_at(),
            now,
            "token rejected: expired"
        );
        return Err(VerifyError::Expired);
    }

    tracing::debug!(action = %claims.action(), key_id = key.key_id(), "token redeemed");
    Ok(claims)
}

/// Lifetime of tokens from [`Issuer::grant_default`] unless configured otherwise
pub const DEFAULT_TTL_SECONDS: u64 = 9999;

/// Lifetime of links from [`Issuer::link`] unless configured otherwise
pub const DEFAULT_LINK_TTL_SECONDS: u64 = 3600;

fn expiry_after(now: i64, ttl_seconds: u64) -> i64 {
    now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX))
}

/// Issues tokens and download links under one signing key.
#[derive(Clone)]
pub struct Issuer {
    key: SigningKey,
    clock: Arc<dyn Clock>,
    default_ttl_seconds: u64,
    link_ttl_seconds: u64,
}

impl Issuer {
    /// Issuer on the system clock with the default lifetimes
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        Self {
            key,
            clock: Arc::new(SystemClock),
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
            link_ttl_seconds: DEFAULT_LINK_TTL_SECONDS,
        }
    }

    /// Replace the lifetime used by [`Issuer::grant_default`]
    #[must_use]
    pub fn with_default_ttl(mut self, ttl_seconds: u64) -> Self {
        self.default_ttl_seconds = ttl_seconds;
        self
    }

    /// Replace the lifetime used by [`Issuer::link`]
    #[must_use]
    pub fn with_link_ttl(mut self, ttl_seconds: u64) -> Self {
        self.link_ttl_seconds = ttl_seconds;
        self
    }

    /// Replace the clock used by the `*_now` methods
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Key every token and link is signed with
    #[inline]
    #[must_use]
    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    /// Lifetime applied by [`Issuer::grant_default`], in seconds
    #[inline]
    #[must_use]
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl_seconds
    }

    /// Lifetime applied by [`Issuer::link`], in seconds
    #[inline]
    #[must_use]
    pub fn link_ttl(&self) -> u64 {
        self.link_ttl_seconds
    }

    /// Issue a token for a caller-built record.
    #[must_use]
    pub fn issue(&self, claims: &ClaimsRecord, now: i64) -> Token {
        issue(claims, &self.key, now)
    }

    /// [`Issuer::issue`] at the issuer's clock
    #[must_use]
    pub fn issue_now(&self, claims: &ClaimsRecord) -> Token {
        self.issue(claims, self.clock.now())
    }

    /// Issue a token for `params` that expires `ttl_seconds` after `now`.
    #[must_use]
    pub fn grant(&self, params: impl Into<ActionParams>, ttl_seconds: u64, now: i64) -> Token {
        let claims = ClaimsRecord::new(params, expiry_after(now, ttl_seconds));
        self.issue(&claims, now)
    }

    /// [`Issuer::grant`] at the issuer's clock
    #[must_use]
    pub fn grant_now(&self, params: impl Into<ActionParams>, ttl_seconds: u64) -> Token {
        self.grant(params, ttl_seconds, self.clock.now())
    }

    /// [`Issuer::grant`] with the issuer's default lifetime
    #[must_use]
    pub fn grant_default(&self, params: impl Into<ActionParams>, now: i64) -> Token {
        self.grant(params, self.default_ttl_seconds, now)
    }

    /// [`Issuer::grant_default`] at the issuer's clock
    #[must_use]
    pub fn grant_default_now(&self, params: impl Into<ActionParams>) -> Token {
        self.grant_default(params, self.clock.now())
    }

    /// Sign a download link to `id` with the issuer's link lifetime.
    #[must_use]
    pub fn link(&self, id: &str, now: i64) -> SignedLink {
        SignedLink::sign_for(id, self.link_ttl_seconds, &self.key, now)
    }

    /// [`Issuer::link`] at the issuer's clock
    #[must_use]
    pub fn link_now(&self, id: &str) -> SignedLink {
        self.link(id, self.clock.now())
    }
}

impl fmt::Debug for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issuer")
            .field("key", &self.key)
            .field("default_ttl_seconds", &self.default_ttl_seconds)
            .field("link_ttl_seconds", &self.link_ttl_seconds)
            .finish_non_exhaustive()
    }
}

/// Redeems tokens under one signing key.
#[derive(Clone)]
pub struct Verifier {
    key: SigningKey,
    clock: Arc<dyn Clock>,
}

impl Verifier {
    /// Verifier on the system clock
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        Self {
            key,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used by the `*_now` methods
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Key tokens must be signed with
    #[inline]
    #[must_use]
    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    /// See [`redeem`].
    ///
    /// # Errors
    /// Same as [`redeem`].
    pub fn redeem(&self, token: &str, now: i64) -> VerifyResult<ClaimsRecord> {
        redeem(token, &self.key, now)
    }

    /// [`Verifier::redeem`] at the verifier's clock
    ///
    /// # Errors
    /// Same as [`redeem`].
    pub fn redeem_now(&self, token: &str) -> VerifyResult<ClaimsRecord> {
        self.redeem(token, self.clock.now())
    }

    /// Redeem a token that must grant `expected`.
    ///
    /// # Errors
    /// Same as [`redeem`], plus [`VerifyError::WrongAction`] when the token is
    /// valid but grants another action.
    pub fn redeem_for(
        &self,
        token: &str,
        expected: ActionKind,
        now: i64,
    ) -> VerifyResult<ClaimsRecord> {
        let claims = self.redeem(token, now)?;
        if claims.action() != expected {
            return Err(VerifyError::WrongAction {
                expected,
                found: claims.action(),
            });
        }
        Ok(claims)
    }

    /// [`Verifier::redeem_for`] at the verifier's clock
    ///
    /// # Errors
    /// Same as [`Verifier::redeem_for`].
    pub fn redeem_for_now(&self, token: &str, expected: ActionKind) -> VerifyResult<ClaimsRecord> {
        self.redeem_for(token, expected, self.clock.now())
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier").field("key", &self.key).finish_non_exhaustive()
    }
}
