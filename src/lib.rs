//! # Umbra Envelope
//!
//! Versioned, authenticated encryption of messages between two holders of
//! secp256k1 key pairs.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ENVELOPE MODULES                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │    Keys     │  │     KDF     │  │   Padding   │  │  Encryption  │   │
//! │  │             │  │             │  │             │  │              │   │
//! │  │ - Scalars   │  │ - ECDH x    │  │ - Buckets   │  │ - ChaCha20   │   │
//! │  │ - x-only    │  │ - Conv. key │  │ - Pad       │  │ - HMAC       │   │
//! │  │   points    │  │ - Msg keys  │  │ - Unpad     │  │ - Framing    │   │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  └──────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//!
//! | Field | Offset | Length |
//! |-------|--------|--------|
//! | version (`0x02`) | 0 | 1 |
//! | nonce | 1 | 32 |
//! | ciphertext | 33 | 2 + padded length |
//! | mac | 33 + len(ciphertext) | 32 |
//!
//! The raw envelope is base64-encoded for transport.
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`crypto`] - Key validation, key derivation, padding and envelopes
//!
//! ## Example
//!
//! ```ignore
//! use umbra_envelope::{decrypt, encrypt, SecretKey};
//!
//! let alice = SecretKey::from_hex("...")?;
//! let bob = SecretKey::from_hex("...")?;
//!
//! let payload = encrypt("hello", &alice, &bob.public_key())?;
//! assert_eq!(decrypt(&payload, &bob, &alice.public_key())?, "hello");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod crypto;
pub mod error;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{
    compute_shared_secret, decrypt, encrypt, encrypt_with_nonce, get_conversation_key,
    ConversationKey, Nonce, PublicKey, SecretKey, SharedSecret, VERSION,
};
pub use error::{Error, Result};
