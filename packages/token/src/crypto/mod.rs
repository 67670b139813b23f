//! Token signing primitives

pub mod hmac_sha256;
pub mod key;

pub use hmac_sha256::{SIGNATURE_LEN, Signature, sign, verify_tag};
pub use key::{GENERATED_KEY_LEN, SigningKey};
