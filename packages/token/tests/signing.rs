//! Token signer: HMAC-SHA256 tags, constant-time verification and keys

use cryypt_token::crypto::{self, GENERATED_KEY_LEN, SIGNATURE_LEN};
use cryypt_token::{EncodedClaims, KeyError, Signature, SigningKey};
use hex_literal::hex;

fn claims(bytes: &[u8]) -> EncodedClaims {
    EncodedClaims::from_bytes(bytes.to_vec())
}

#[test]
fn test_rfc4231_case_2() {
    let key = SigningKey::new(b"Jefe").expect("key should build");
    let signature = crypto::sign(&claims(b"what do ya want for nothing?"), &key);
    assert_eq!(
        signature.as_bytes(),
        &hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
    );
}

#[test]
fn test_sign_is_deterministic() {
    let key = SigningKey::new(b"deterministic").expect("key should build");
    let message = claims(b"same bytes");
    assert_eq!(crypto::sign(&message, &key), crypto::sign(&message, &key));
}

#[test]
fn test_verify_tag_accepts_own_signature() {
    let key = SigningKey::new(b"verify").expect("key should build");
    let message = claims(b"claims bytes");
    let signature = crypto::sign(&message, &key);
    assert!(crypto::verify_tag(&message, &signature, &key));
}

#[test]
fn test_single_bit_flips_rejected() {
    let key = SigningKey::new(b"bit flips").expect("key should build");
    let original = b"claims bytes".to_vec();
    let signature = crypto::sign(&claims(&original), &key);

    for byte in 0..original.len() {
        for bit in 0..8 {
            let mut tampered = original.clone();
            tampered[byte] ^= 1 << bit;
            assert!(!crypto::verify_tag(&claims(&tampered), &signature, &key));
        }
    }

    for byte in 0..SIGNATURE_LEN {
        for bit in 0..8 {
            let mut tampered = *signature.as_bytes();
            tampered[byte] ^= 1 << bit;
            assert!(!crypto::verify_tag(
                &claims(&original),
                &Signature::from(tampered),
                &key
            ));
        }
    }
}

#[test]
fn test_different_keys_disagree() {
    let message = claims(b"claims bytes");
    let first = SigningKey::new(b"first key").expect("key should build");
    let second = SigningKey::new(b"second key").expect("key should build");

    let signature = crypto::sign(&message, &first);
    assert!(!crypto::verify_tag(&message, &signature, &second));
    assert_ne!(first.key_id(), second.key_id());
}

#[test]
fn test_signature_from_slice_requires_exact_length() {
    assert!(Signature::from_slice(&[0u8; SIGNATURE_LEN]).is_some());
    assert!(Signature::from_slice(&[0u8; SIGNATURE_LEN - 1]).is_none());
    assert!(Signature::from_slice(&[0u8; SIGNATURE_LEN + 1]).is_none());
}

#[test]
fn test_empty_key_rejected() {
    assert_eq!(SigningKey::new(b"").err(), Some(KeyError::Empty));
    assert_eq!(SigningKey::from_hex("").err(), Some(KeyError::Empty));
    assert_eq!(SigningKey::from_hex("zz").err(), Some(KeyError::InvalidHex));
}

#[test]
fn test_hex_key_matches_raw_key() {
    let raw = SigningKey::new(b"abc").expect("key should build");
    let from_hex = SigningKey::from_hex("616263").expect("hex key should build");
    let message = claims(b"claims bytes");
    assert_eq!(crypto::sign(&message, &raw), crypto::sign(&message, &from_hex));
    assert_eq!(raw.key_id(), from_hex.key_id());
}

#[test]
fn test_generated_keys() {
    let (key, encoded) = SigningKey::generate().expect("key generation should succeed");
    assert_eq!(encoded.len(), GENERATED_KEY_LEN * 2);

    let reloaded = SigningKey::from_hex(&encoded).expect("generated hex should reload");
    assert_eq!(key.key_id(), reloaded.key_id());

    let (other, _) = SigningKey::generate().expect("key generation should succeed");
    assert_ne!(key.key_id(), other.key_id());
}

#[test]
fn test_key_debug_is_redacted() {
    let key = SigningKey::new(b"super secret key material").expect("key should build");
    let debug = format!("{key:?}");
    assert!(debug.contains(key.key_id()));
    assert!(!debug.contains("super secret"));
    assert_eq!(key.key_id().len(), 16);
}
