//! # Envelope Encryption
//!
//! This module seals plaintexts into versioned envelopes and opens them again.
//!
//! ## Encryption Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ENVELOPE ENCRYPTION FLOW                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SENDER (Alice)                                                        │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │                                                                         │
//! │  Step 1: Keys                                                          │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  conversation_key = Extract("nip44-v2", x(a × B))           │       │
//! │  │  nonce            = 32 random bytes                         │       │
//! │  │  chacha_key ‖ chacha_nonce ‖ hmac_key                       │       │
//! │  │                   = Expand(conversation_key, nonce, 76)     │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Step 2: Pad, encrypt, authenticate                                    │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  padded     = u16_be(len) ‖ plaintext ‖ zeros               │       │
//! │  │  ciphertext = ChaCha20(chacha_key, chacha_nonce, padded)    │       │
//! │  │  mac        = HMAC-SHA256(hmac_key, nonce ‖ ciphertext)     │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Step 3: Frame                                                         │
//! │  ┌──────┬────────────┬─────────────────────────┬────────────┐          │
//! │  │ 0x02 │ nonce (32) │ ciphertext (2 + bucket) │ mac (32)   │          │
//! │  └──────┴────────────┴─────────────────────────┴────────────┘          │
//! │  → base64                                                              │
//! │                                                                         │
//! │  RECIPIENT (Bob)                                                       │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │                                                                         │
//! │  length → version → keys → MAC (constant time) → ChaCha20 → unpad      │
//! │  → UTF-8. Nothing is decrypted unless the MAC verifies.                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | Only sender and recipient can read the message |
//! | Integrity | Any modification of nonce or ciphertext is detected |
//! | Length hiding | Plaintext length is only revealed up to its bucket |
//! | Forward Secrecy | None: a leaked secret key exposes all past messages |

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20, Key as ChaChaKey, Nonce as ChaChaNonce};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::kdf::{derive_message_keys, get_conversation_key, ConversationKey, MessageKeys};
use super::keys::{PublicKey, SecretKey};
use super::padding::{pad, unpad, LENGTH_PREFIX_SIZE, MAX_PLAINTEXT_SIZE};
use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Envelope version produced and accepted by this crate
pub const VERSION: u8 = 2;

/// Size of the per-message nonce in bytes
pub const NONCE_SIZE: usize = 32;

/// Size of the HMAC-SHA256 tag in bytes
pub const MAC_SIZE: usize = 32;

/// Smallest valid raw envelope: version + nonce + (prefix + 32) + mac
pub const MIN_ENVELOPE_SIZE: usize = 1 + NONCE_SIZE + LENGTH_PREFIX_SIZE + 32 + MAC_SIZE;

/// Largest valid raw envelope: version + nonce + (prefix + 65536) + mac
pub const MAX_ENVELOPE_SIZE: usize = 1 + NONCE_SIZE + LENGTH_PREFIX_SIZE + 65536 + MAC_SIZE;

/// Smallest valid base64 payload
pub const MIN_PAYLOAD_SIZE: usize = 132;

/// Largest valid base64 payload
pub const MAX_PAYLOAD_SIZE: usize = 87472;

/// Leading character reserved for future non-base64 encodings
const RESERVED_FLAG: char = '#';

/// A 32-byte per-message nonce
///
/// ## Critical Security Requirement
///
/// **NEVER reuse a nonce with the same conversation key!**
///
/// A repeated nonce repeats the ChaCha20 key stream, so XOR-ing two
/// ciphertexts reveals the XOR of their plaintexts. With 256-bit random
/// nonces accidental collisions are not a practical concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce(pub [u8; NONCE_SIZE]);

impl Nonce {
    /// Generate a cryptographically random nonce
    pub fn random() -> Self {
        Self::random_from_rng(&mut OsRng)
    }

    /// Generate a nonce from a caller-supplied secure random source
    pub fn random_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from existing bytes
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

// ============================================================================
// KEY PAIR ENTRY POINTS
// ============================================================================

/// Encrypt a message for a recipient
///
/// Uses a fresh random nonce from the operating system.
///
/// ## Example
///
/// ```ignore
/// let payload = encrypt("hello", &alice_secret, &bob_public)?;
/// let plaintext = decrypt(&payload, &bob_secret, &alice_public)?;
/// ```
pub fn encrypt(plaintext: &str, sender: &SecretKey, recipient: &PublicKey) -> Result<String> {
    encrypt_with_rng(plaintext, sender, recipient, &mut OsRng)
}

/// Encrypt a message for a recipient with an injected random source
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    plaintext: &str,
    sender: &SecretKey,
    recipient: &PublicKey,
    rng: &mut R,
) -> Result<String> {
    let nonce = Nonce::random_from_rng(rng);
    encrypt_with_nonce(plaintext, sender, recipient, &nonce)
}

/// Encrypt a message for a recipient with a caller-chosen nonce
///
/// Intended for deterministic test vectors. Callers must never reuse a nonce.
pub fn encrypt_with_nonce(
    plaintext: &str,
    sender: &SecretKey,
    recipient: &PublicKey,
    nonce: &Nonce,
) -> Result<String> {
    let conversation_key = get_conversation_key(sender, recipient)?;
    encrypt_with_conversation_key(plaintext, &conversation_key, nonce)
}

/// Decrypt a message from a sender
pub fn decrypt(payload: &str, receiver: &SecretKey, sender: &PublicKey) -> Result<String> {
    let conversation_key = get_conversation_key(receiver, sender)?;
    decrypt_with_conversation_key(payload, &conversation_key)
}

// ============================================================================
// CONVERSATION KEY ENTRY POINTS
// ============================================================================

/// Encrypt with a cached conversation key, producing a base64 payload
pub fn encrypt_with_conversation_key(
    plaintext: &str,
    conversation_key: &ConversationKey,
    nonce: &Nonce,
) -> Result<String> {
    let envelope = encrypt_to_bytes(plaintext.as_bytes(), conversation_key, nonce)?;
    Ok(BASE64.encode(envelope))
}

/// Decrypt a base64 payload with a cached conversation key
pub fn decrypt_with_conversation_key(
    payload: &str,
    conversation_key: &ConversationKey,
) -> Result<String> {
    if payload.starts_with(RESERVED_FLAG) {
        tracing::warn!("Rejected payload with reserved encoding flag");
        return Err(Error::UnsupportedVersion(RESERVED_FLAG as u8));
    }

    if payload.len() < MIN_PAYLOAD_SIZE || payload.len() > MAX_PAYLOAD_SIZE {
        tracing::warn!("Rejected payload of invalid length {}", payload.len());
        return Err(Error::InvalidLength);
    }

    let envelope = BASE64.decode(payload).map_err(|e| {
        tracing::warn!("Rejected payload: {}", e);
        Error::from(e)
    })?;

    decrypt_from_bytes(&envelope, conversation_key)
}

// ============================================================================
// RAW ENVELOPE
// ============================================================================

/// Seal a plaintext into a raw envelope
///
/// `version ‖ nonce ‖ ciphertext ‖ mac`
pub fn encrypt_to_bytes(
    plaintext: &[u8],
    conversation_key: &ConversationKey,
    nonce: &Nonce,
) -> Result<Vec<u8>> {
    if plaintext.len() > MAX_PLAINTEXT_SIZE {
        return Err(Error::PlaintextTooLong(plaintext.len()));
    }

    let keys = derive_message_keys(conversation_key, nonce.as_bytes())?;

    let mut buffer = pad(plaintext)?;
    apply_keystream(&keys, &mut buffer);
    let mac = compute_mac(&keys, nonce.as_bytes(), &buffer)?;

    let mut envelope = Vec::with_capacity(1 + NONCE_SIZE + buffer.len() + MAC_SIZE);
    envelope.push(VERSION);
    envelope.extend_from_slice(nonce.as_bytes());
    envelope.extend_from_slice(&buffer);
    envelope.extend_from_slice(&mac);

    tracing::debug!(
        "Encrypted {} byte plaintext into {} byte envelope",
        plaintext.len(),
        envelope.len()
    );

    Ok(envelope)
}

/// Open a raw envelope and return the UTF-8 plaintext
///
/// The MAC is verified before any decryption or padding check runs.
pub fn decrypt_from_bytes(envelope: &[u8], conversation_key: &ConversationKey) -> Result<String> {
    if envelope.len() < MIN_ENVELOPE_SIZE || envelope.len() > MAX_ENVELOPE_SIZE {
        tracing::warn!("Rejected envelope of invalid length {}", envelope.len());
        return Err(Error::InvalidLength);
    }

    let version = envelope[0];
    if version != VERSION {
        tracing::warn!("Rejected envelope with unsupported version {}", version);
        return Err(Error::UnsupportedVersion(version));
    }

    let nonce = &envelope[1..1 + NONCE_SIZE];
    let ciphertext = &envelope[1 + NONCE_SIZE..envelope.len() - MAC_SIZE];
    let mac = &envelope[envelope.len() - MAC_SIZE..];

    let keys = derive_message_keys(conversation_key, nonce)?;

    verify_mac(&keys, nonce, ciphertext, mac).map_err(|e| {
        tracing::warn!("Rejected envelope: {}", e);
        e
    })?;

    let mut padded = Zeroizing::new(ciphertext.to_vec());
    apply_keystream(&keys, &mut padded);

    let plaintext = unpad(&padded)?;
    let text = std::str::from_utf8(plaintext)
        .map_err(|_| Error::InvalidPlaintextEncoding)?
        .to_owned();

    tracing::debug!("Decrypted {} byte envelope", envelope.len());

    Ok(text)
}

// ============================================================================
// PRIMITIVES
// ============================================================================

/// ChaCha20 with a zero initial counter; encryption and decryption are the same
fn apply_keystream(keys: &MessageKeys, buffer: &mut [u8]) {
    let mut cipher = ChaCha20::new(
        ChaChaKey::from_slice(keys.chacha_key()),
        ChaChaNonce::from_slice(keys.chacha_nonce()),
    );
    cipher.apply_keystream(buffer);
}

fn keyed_mac(keys: &MessageKeys, nonce: &[u8], ciphertext: &[u8]) -> Result<HmacSha256> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(keys.hmac_key())
        .map_err(|e| Error::KeyDerivationFailed(e.to_string()))?;
    mac.update(nonce);
    mac.update(ciphertext);
    Ok(mac)
}

fn compute_mac(keys: &MessageKeys, nonce: &[u8], ciphertext: &[u8]) -> Result<[u8; MAC_SIZE]> {
    let tag = keyed_mac(keys, nonce, ciphertext)?.finalize().into_bytes();
    let mut out = [0u8; MAC_SIZE];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Constant-time tag comparison
fn verify_mac(keys: &MessageKeys, nonce: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<()> {
    keyed_mac(keys, nonce, ciphertext)?
        .verify_slice(tag)
        .map_err(|_| Error::InvalidMac)
}

// ============================================================================
// TESTS
// ============================================================================
