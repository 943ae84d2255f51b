//! Known-answer tests driven by `tests/vectors.json`.

use serde::Deserialize;
use umbra_envelope::crypto::{
    calc_padded_len, compute_shared_secret, decrypt_with_conversation_key,
    encrypt_with_conversation_key, get_conversation_key,
};
use umbra_envelope::{decrypt, encrypt_with_nonce, ConversationKey, Error, Nonce, PublicKey, SecretKey};

const VECTORS: &str = include_str!("vectors.json");

#[derive(Deserialize)]
struct Vectors {
    valid_sec: Vec<ValidSec>,
    valid_pub: Vec<ValidPub>,
    invalid_keys: Vec<InvalidKeys>,
    conversation_key_for_invalid: String,
    invalid_decrypt: Vec<InvalidDecrypt>,
    padded_len: Vec<(usize, usize)>,
}

#[derive(Deserialize)]
struct ValidSec {
    sec1: String,
    sec2: String,
    shared: String,
    conversation_key: String,
    nonce: String,
    plaintext: String,
    payload: String,
    note: String,
}

#[derive(Deserialize)]
struct ValidPub {
    sec1: String,
    pub2: String,
    shared: String,
    conversation_key: String,
    nonce: String,
    plaintext: String,
    payload: String,
    note: String,
}

#[derive(Deserialize)]
struct InvalidKeys {
    sec1: String,
    pub2: String,
    error: String,
    note: String,
}

#[derive(Deserialize)]
struct InvalidDecrypt {
    payload: String,
    error: String,
    note: String,
}

fn load() -> Vectors {
    serde_json::from_str(VECTORS).expect("vectors.json is valid")
}

fn nonce(hex_str: &str) -> Nonce {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut bytes).expect("nonce hex");
    Nonce::from_bytes(bytes)
}

fn conversation_key(hex_str: &str) -> ConversationKey {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut bytes).expect("key hex");
    ConversationKey::from_bytes(bytes)
}

fn error_name(err: &Error) -> &'static str {
    match err {
        Error::InvalidScalar => "InvalidScalar",
        Error::InvalidPoint => "InvalidPoint",
        Error::InvalidLength => "InvalidLength",
        Error::UnsupportedVersion(_) => "UnsupportedVersion",
        Error::InvalidBase64 => "InvalidBase64",
        Error::InvalidMac => "InvalidMac",
        Error::InvalidPadding => "InvalidPadding",
        Error::InvalidPlaintextEncoding => "InvalidPlaintextEncoding",
        Error::PlaintextTooShort => "PlaintextTooShort",
        Error::PlaintextTooLong(_) => "PlaintextTooLong",
        Error::KeyDerivationFailed(_) => "KeyDerivationFailed",
    }
}

#[test]
fn valid_secret_key_pairs() {
    for vec in load().valid_sec {
        let sec1 = SecretKey::from_hex(&vec.sec1).unwrap();
        let sec2 = SecretKey::from_hex(&vec.sec2).unwrap();
        let pub1 = sec1.public_key();
        let pub2 = sec2.public_key();

        let ss1 = compute_shared_secret(&pub1.to_bytes(), &sec2.to_bytes()[..]).unwrap();
        let ss2 = compute_shared_secret(&pub2.to_bytes(), &sec1.to_bytes()[..]).unwrap();
        assert_eq!(ss1.as_bytes(), ss2.as_bytes(), "{}", vec.note);
        assert_eq!(hex::encode(ss1.as_bytes()), vec.shared, "{}", vec.note);

        let key = get_conversation_key(&sec1, &pub2).unwrap();
        assert_eq!(hex::encode(key.as_bytes()), vec.conversation_key, "{}", vec.note);

        let payload = encrypt_with_nonce(&vec.plaintext, &sec1, &pub2, &nonce(&vec.nonce)).unwrap();
        assert_eq!(payload, vec.payload, "{}", vec.note);

        let plaintext = decrypt(&payload, &sec2, &pub1).unwrap();
        assert_eq!(plaintext, vec.plaintext, "{}", vec.note);
    }
}

#[test]
fn valid_public_keys() {
    for vec in load().valid_pub {
        let sec1 = SecretKey::from_hex(&vec.sec1).unwrap();
        let pub2 = PublicKey::from_hex(&vec.pub2).unwrap();

        let shared = compute_shared_secret(&pub2.to_bytes(), &sec1.to_bytes()[..]).unwrap();
        assert_eq!(hex::encode(shared.as_bytes()), vec.shared, "{}", vec.note);

        let key = get_conversation_key(&sec1, &pub2).unwrap();
        assert_eq!(hex::encode(key.as_bytes()), vec.conversation_key, "{}", vec.note);

        let payload = encrypt_with_conversation_key(&vec.plaintext, &key, &nonce(&vec.nonce)).unwrap();
        assert_eq!(payload, vec.payload, "{}", vec.note);

        let plaintext = decrypt_with_conversation_key(&payload, &key).unwrap();
        assert_eq!(plaintext, vec.plaintext, "{}", vec.note);
    }
}

#[test]
fn invalid_keys_are_rejected() {
    for vec in load().invalid_keys {
        let sec1 = hex::decode(&vec.sec1).unwrap();
        let pub2 = hex::decode(&vec.pub2).unwrap();

        let err = match compute_shared_secret(&pub2, &sec1) {
            Ok(_) => panic!("should have failed, but didn't: {}", vec.note),
            Err(err) => err,
        };
        assert_eq!(error_name(&err), vec.error, "{}", vec.note);
        assert!(err.is_key_error(), "{}", vec.note);
    }
}

#[test]
fn invalid_payloads_are_rejected() {
    let vectors = load();
    let key = conversation_key(&vectors.conversation_key_for_invalid);

    for vec in vectors.invalid_decrypt {
        let err = decrypt_with_conversation_key(&vec.payload, &key)
            .expect_err(&vec.note);
        assert_eq!(error_name(&err), vec.error, "{}", vec.note);
        assert!(err.is_decryption_error(), "{}", vec.note);
    }
}

#[test]
fn padded_lengths() {
    for (unpadded, padded) in load().padded_len {
        assert_eq!(calc_padded_len(unpadded), padded, "unpadded = {}", unpadded);
    }
}
