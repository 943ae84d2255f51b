//! # Key Agreement and Key Derivation
//!
//! This module turns a validated key pair into per-message keys.
//!
//! ## Key Derivation Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KEY DERIVATION HIERARCHY                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SECP256K1 SHARED SECRET                         │   │
//! │  │                                                                 │   │
//! │  │  x( alice_secret × bob_public ) = x( bob_secret × alice_public )│   │
//! │  │                                                                 │   │
//! │  │  → 32 bytes (unhashed x-coordinate)                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 CONVERSATION KEY (once per pair)                │   │
//! │  │                                                                 │   │
//! │  │  HKDF-SHA256-Extract(                                          │   │
//! │  │    salt = "nip44-v2",                                          │   │
//! │  │    ikm  = shared_x                                             │   │
//! │  │  )                                                             │   │
//! │  │                                                                 │   │
//! │  │  → 32 bytes, identical for both directions                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 MESSAGE KEYS (once per message)                 │   │
//! │  │                                                                 │   │
//! │  │  HKDF-SHA256-Expand(                                           │   │
//! │  │    prk  = conversation_key,                                    │   │
//! │  │    info = nonce (32 bytes),                                    │   │
//! │  │    L    = 76                                                   │   │
//! │  │  )                                                             │   │
//! │  │                                                                 │   │
//! │  │  [0..32)  ChaCha20 key                                         │   │
//! │  │  [32..44) ChaCha20 nonce                                       │   │
//! │  │  [44..76) HMAC-SHA256 key                                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The conversation key may be cached by callers across messages to the same
//! peer. Message keys must never be reused across nonces.

use hkdf::Hkdf;
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::point::AffineCoordinates;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::keys::{validate_point, validate_scalar, PublicKey, SecretKey};
use crate::error::{Error, Result};

/// Domain separation strings for HKDF
pub mod domain {
    /// Salt for the conversation key extraction step
    pub const CONVERSATION_SALT: &[u8] = b"nip44-v2";
}

/// Size of the shared secret (secp256k1 field element) in bytes
pub const SHARED_SECRET_SIZE: usize = 32;

/// Size of the conversation key in bytes
pub const CONVERSATION_KEY_SIZE: usize = 32;

/// Size of the ChaCha20 key in bytes
pub const CHACHA_KEY_SIZE: usize = 32;

/// Size of the ChaCha20 (IETF) nonce in bytes
pub const CHACHA_NONCE_SIZE: usize = 12;

/// Size of the HMAC-SHA256 key in bytes
pub const HMAC_KEY_SIZE: usize = 32;

/// Total HKDF-Expand output for one message
const MESSAGE_KEYS_SIZE: usize = CHACHA_KEY_SIZE + CHACHA_NONCE_SIZE + HMAC_KEY_SIZE;

/// The x-coordinate of `secret × public`
///
/// Zeroized when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHARED_SECRET_SIZE],
}

impl SharedSecret {
    /// Get the raw x-coordinate bytes
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.bytes
    }

    /// Derive the conversation key from this shared secret
    pub fn conversation_key(&self) -> ConversationKey {
        derive_conversation_key(self)
    }
}

/// A symmetric key shared by both parties of a key pair
///
/// Zeroized when dropped. Safe to cache in memory per peer.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ConversationKey([u8; CONVERSATION_KEY_SIZE]);

impl ConversationKey {
    /// Create from raw bytes (e.g. a key loaded from a secure store)
    pub fn from_bytes(bytes: [u8; CONVERSATION_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw key bytes
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn as_bytes(&self) -> &[u8; CONVERSATION_KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for ConversationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ConversationKey([REDACTED])")
    }
}

impl PartialEq for ConversationKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for ConversationKey {}

/// Per-message keys expanded from a conversation key and nonce
///
/// Zeroized when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MessageKeys {
    chacha_key: [u8; CHACHA_KEY_SIZE],
    chacha_nonce: [u8; CHACHA_NONCE_SIZE],
    hmac_key: [u8; HMAC_KEY_SIZE],
}

impl MessageKeys {
    /// ChaCha20 key
    pub fn chacha_key(&self) -> &[u8; CHACHA_KEY_SIZE] {
        &self.chacha_key
    }

    /// ChaCha20 nonce
    pub fn chacha_nonce(&self) -> &[u8; CHACHA_NONCE_SIZE] {
        &self.chacha_nonce
    }

    /// HMAC-SHA256 key
    pub fn hmac_key(&self) -> &[u8; HMAC_KEY_SIZE] {
        &self.hmac_key
    }
}

/// Compute the shared secret between a public point and a secret scalar
///
/// Both inputs are validated before any arithmetic. A point at infinity as
/// the product is rejected as `InvalidPoint`.
///
/// ## Parameters
///
/// - `public_key`: 32-byte x-only public key of the peer
/// - `secret_key`: 32-byte secret scalar of the caller
pub fn compute_shared_secret(public_key: &[u8], secret_key: &[u8]) -> Result<SharedSecret> {
    let secret = validate_scalar(secret_key);
    let public = validate_point(public_key);
    let secret = secret?;
    let public = public?;

    shared_secret(&secret, &public)
}

/// Compute the shared secret from already validated keys
pub fn shared_secret(secret: &SecretKey, public: &PublicKey) -> Result<SharedSecret> {
    let mut scalar = secret.as_inner().to_nonzero_scalar();
    let mut product = public.as_inner().to_projective() * *scalar;
    scalar.zeroize();

    if bool::from(product.is_identity()) {
        return Err(Error::InvalidPoint);
    }

    let mut affine = product.to_affine();
    product.zeroize();
    let mut x = affine.x();
    affine.zeroize();

    Ok(SharedSecret {
        bytes: take_key_bytes(x.as_mut_slice()),
    })
}

/// Derive the conversation key from a shared secret
///
/// HKDF-Extract with the fixed `nip44-v2` salt.
pub fn derive_conversation_key(shared: &SharedSecret) -> ConversationKey {
    // hkdf cannot wipe its HMAC state; `_` drops it before anything else runs
    let (mut prk, _) = Hkdf::<Sha256>::extract(Some(domain::CONVERSATION_SALT), shared.as_bytes());

    let key = ConversationKey(take_key_bytes(prk.as_mut_slice()));

    #[cfg(feature = "verbose-logging")]
    tracing::trace!("Derived conversation key");

    key
}

/// Get the conversation key for a secret key and a peer's public key
///
/// `get_conversation_key(a, B) == get_conversation_key(b, A)`.
pub fn get_conversation_key(secret: &SecretKey, public: &PublicKey) -> Result<ConversationKey> {
    let shared = shared_secret(secret, public)?;
    Ok(derive_conversation_key(&shared))
}

/// Expand a conversation key and nonce into message keys
///
/// HKDF-Expand with the nonce as `info`, 76 bytes of output.
pub fn derive_message_keys(conversation_key: &ConversationKey, nonce: &[u8]) -> Result<MessageKeys> {
    let hkdf = Hkdf::<Sha256>::from_prk(conversation_key.as_bytes())?;

    let mut okm = Zeroizing::new([0u8; MESSAGE_KEYS_SIZE]);
    hkdf.expand(nonce, &mut okm[..])?;

    let mut keys = MessageKeys {
        chacha_key: [0u8; CHACHA_KEY_SIZE],
        chacha_nonce: [0u8; CHACHA_NONCE_SIZE],
        hmac_key: [0u8; HMAC_KEY_SIZE],
    };
    keys.chacha_key.copy_from_slice(&okm[..CHACHA_KEY_SIZE]);
    keys.chacha_nonce
        .copy_from_slice(&okm[CHACHA_KEY_SIZE..CHACHA_KEY_SIZE + CHACHA_NONCE_SIZE]);
    keys.hmac_key
        .copy_from_slice(&okm[CHACHA_KEY_SIZE + CHACHA_NONCE_SIZE..]);

    #[cfg(feature = "verbose-logging")]
    tracing::trace!("Derived message keys");

    Ok(keys)
}

/// Move 32 bytes of key material out of a library-owned buffer, wiping it
fn take_key_bytes(src: &mut [u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(src);
    src.zeroize();
    out
}

// ============================================================================
// TESTS
// ============================================================================
