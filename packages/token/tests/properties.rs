//! Property tests over arbitrary claims, keys and tampering

use cryypt_token::{
    ActionParams, ClaimsRecord, DataExportParams, SigningKey, UploadAttachmentParams,
    UploadAvatarParams, UploadIconParams, VerifyError, claims, crypto, issue, redeem, token,
};
use proptest::prelude::*;

fn action_params() -> impl Strategy<Value = ActionParams> {
    prop_oneof![
        (".{0,64}", any::<u64>(), any::<bool>()).prop_map(|(id, max_size, allow_uncompressed)| {
            ActionParams::from(UploadIconParams {
                id,
                max_size,
                allow_uncompressed,
            })
        }),
        (".{0,64}", ".{0,64}", any::<u64>()).prop_map(|(id, user_id, max_size)| {
            ActionParams::from(UploadAttachmentParams {
                id,
                user_id,
                max_size,
            })
        }),
        (".{0,64}", any::<u64>())
            .prop_map(|(id, max_size)| ActionParams::from(UploadAvatarParams { id, max_size })),
        ".{0,64}".prop_map(|id| ActionParams::from(DataExportParams { id })),
    ]
}

fn claims_record() -> impl Strategy<Value = ClaimsRecord> {
    (action_params(), any::<i64>()).prop_map(|(params, expires_at)| {
        ClaimsRecord::new(params, expires_at)
    })
}

fn signing_key() -> impl Strategy<Value = SigningKey> {
    prop::collection::vec(any::<u8>(), 1..96)
        .prop_map(|bytes| SigningKey::new(bytes).expect("non-empty key should build"))
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(record in claims_record()) {
        let encoded = claims::encode(&record);
        prop_assert_eq!(claims::decode(encoded.as_bytes()), Ok(record));
    }

    #[test]
    fn prop_encode_is_deterministic(record in claims_record()) {
        prop_assert_eq!(claims::encode(&record), claims::encode(&record.clone()));
    }

    #[test]
    fn prop_redeem_inverts_issue(record in claims_record(), key in signing_key()) {
        let now = record.expires_at();
        let token = issue(&record, &key, now);
        prop_assert_eq!(redeem(token.as_str(), &key, now), Ok(record));
    }

    #[test]
    fn prop_flipped_claims_bit_is_bad_signature(
        record in claims_record(),
        key in signing_key(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let encoded = claims::encode(&record);
        let signature = crypto::sign(&encoded, &key);

        let mut bytes = encoded.into_bytes();
        let index = position.index(bytes.len());
        bytes[index] ^= 1 << bit;
        let tampered = token::assemble(&claims::EncodedClaims::from_bytes(bytes), &signature);

        prop_assert_eq!(
            redeem(tampered.as_str(), &key, record.expires_at()),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn prop_arbitrary_input_never_panics(input in ".{0,200}", key in signing_key()) {
        let _ = redeem(&input, &key, 0);
        let _ = claims::decode(input.as_bytes());
    }
}
