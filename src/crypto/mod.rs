//! # Cryptography Module
//!
//! This module provides the envelope encryption pipeline.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   once per key pair (cacheable)          once per message               │
//! │  ┌───────────────────────────────┐     ┌────────────────────────────┐  │
//! │  │ keys       validate scalar    │     │ kdf      message keys      │  │
//! │  │            validate point     │     │          (nonce as info)   │  │
//! │  │                │              │     │              │             │  │
//! │  │                ▼              │     │              ▼             │  │
//! │  │ kdf        x(scalar × point)  │     │ padding  bucketed pad      │  │
//! │  │                │              │     │              │             │  │
//! │  │                ▼              │     │              ▼             │  │
//! │  │ kdf        conversation key ──┼────►│ encryption ChaCha20 + HMAC │  │
//! │  └───────────────────────────────┘     └────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose |
//! |-----------|---------|
//! | secp256k1 ECDH (x-only) | Key agreement |
//! | HKDF-SHA256 | Conversation key (extract) and message keys (expand) |
//! | ChaCha20 (IETF) | Encryption of the padded plaintext |
//! | HMAC-SHA256 | Authentication of nonce and ciphertext |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: shared secrets, conversation keys, message keys and
//!    padded buffers are zeroized when dropped
//! 2. **Constant-Time Operations**: scalar range checks and MAC comparison
//!    are constant time
//! 3. **Secure Random**: nonces come from `rand::rngs::OsRng` unless a
//!    `CryptoRng` is injected
//! 4. **Verify First**: nothing is decrypted before the MAC verifies

mod encryption;
mod kdf;
mod keys;
mod padding;

pub use encryption::{
    decrypt, decrypt_from_bytes, decrypt_with_conversation_key, encrypt, encrypt_to_bytes,
    encrypt_with_conversation_key, encrypt_with_nonce, encrypt_with_rng, Nonce, MAC_SIZE,
    MAX_ENVELOPE_SIZE, MAX_PAYLOAD_SIZE, MIN_ENVELOPE_SIZE, MIN_PAYLOAD_SIZE, NONCE_SIZE, VERSION,
};
pub use kdf::{
    compute_shared_secret, derive_conversation_key, derive_message_keys, domain,
    get_conversation_key, shared_secret, ConversationKey, MessageKeys, SharedSecret,
    CHACHA_KEY_SIZE, CHACHA_NONCE_SIZE, CONVERSATION_KEY_SIZE, HMAC_KEY_SIZE, SHARED_SECRET_SIZE,
};
pub use keys::{validate_point, validate_scalar, PublicKey, SecretKey, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
pub use padding::{calc_padded_len, pad, unpad, MAX_PLAINTEXT_SIZE, MIN_PLAINTEXT_SIZE};
