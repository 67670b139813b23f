//! Issue and redeem throughput for a typical upload grant

use criterion::{Criterion, criterion_group, criterion_main};
use cryypt_token::{ClaimsRecord, SigningKey, UploadIconParams, claims, issue, redeem};
use std::hint::black_box;

const NOW: i64 = 1_700_000_000;

fn icon_claims() -> ClaimsRecord {
    ClaimsRecord::new(
        UploadIconParams {
            id: "0123456789abcdef0123456789abcdef".to_string(),
            max_size: 10 << 20,
            allow_uncompressed: false,
        },
        NOW + 9999,
    )
}

fn benchmark_tokens(c: &mut Criterion) {
    let key = SigningKey::new([7u8; 32]).expect("benchmark key should build");
    let record = icon_claims();
    let token = issue(&record, &key, NOW);
    let encoded = claims::encode(&record);

    let mut group = c.benchmark_group("token");
    group.bench_function("encode_claims", |b| {
        b.iter(|| black_box(claims::encode(black_box(&record))));
    });
    group.bench_function("decode_claims", |b| {
        b.iter(|| black_box(claims::decode(black_box(encoded.as_bytes()))));
    });
    group.bench_function("issue", |b| {
        b.iter(|| black_box(issue(black_box(&record), &key, NOW)));
    });
    group.bench_function("redeem", |b| {
        b.iter(|| black_box(redeem(black_box(token.as_str()), &key, NOW)));
    });
    group.finish();
}

criterion_group!(benches, benchmark_tokens);
criterion_main!(benches);
