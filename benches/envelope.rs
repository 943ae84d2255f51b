//! Benchmarks for envelope encryption
//!
//! This benchmark suite measures the performance of:
//! - Conversation key derivation (ECDH + HKDF-Extract)
//! - Encryption across plaintext bucket sizes
//! - Decryption across plaintext bucket sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use umbra_envelope::crypto::{
    decrypt_with_conversation_key, encrypt_with_conversation_key, get_conversation_key,
};
use umbra_envelope::{Nonce, SecretKey};

fn secret(last: u8) -> SecretKey {
    let mut bytes = [0u8; 32];
    bytes[31] = last;
    SecretKey::from_bytes(&bytes).unwrap()
}

fn bench_conversation_key(c: &mut Criterion) {
    let alice = secret(1);
    let bob = secret(2).public_key();

    c.bench_function("conversation_key", |b| {
        b.iter(|| black_box(get_conversation_key(&alice, &bob).unwrap()));
    });
}

fn bench_envelope(c: &mut Criterion) {
    let key = get_conversation_key(&secret(1), &secret(2).public_key()).unwrap();
    let nonce = Nonce::from_bytes([7u8; 32]);

    let mut group = c.benchmark_group("envelope");
    for size in [16usize, 256, 4096, 65535] {
        let plaintext = "x".repeat(size);
        let payload = encrypt_with_conversation_key(&plaintext, &key, &nonce).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encrypt", size), &plaintext, |b, p| {
            b.iter(|| black_box(encrypt_with_conversation_key(p, &key, &nonce).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decrypt", size), &payload, |b, p| {
            b.iter(|| black_box(decrypt_with_conversation_key(p, &key).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_conversation_key, bench_envelope);
criterion_main!(benches);
