//! # Error Handling
//!
//! This module provides the error taxonomy for envelope encryption.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key Agreement Errors                                              │
//! │  │   ├── InvalidScalar           - Secret key zero, >= n, or bad size  │
//! │  │   └── InvalidPoint            - x-coordinate not on the curve       │
//! │  │                                                                      │
//! │  ├── Envelope Errors (decrypt)                                         │
//! │  │   ├── InvalidLength           - Payload too short or too long       │
//! │  │   ├── UnsupportedVersion      - Unknown version byte                │
//! │  │   ├── InvalidBase64           - Transport encoding is malformed     │
//! │  │   ├── InvalidMac              - Authentication tag mismatch         │
//! │  │   ├── InvalidPadding          - Length prefix/bucket mismatch       │
//! │  │   └── InvalidPlaintextEncoding - Plaintext is not UTF-8             │
//! │  │                                                                      │
//! │  ├── Plaintext Errors (encrypt)                                        │
//! │  │   ├── PlaintextTooShort       - Empty plaintext                     │
//! │  │   └── PlaintextTooLong        - More than 65535 bytes               │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      └── KeyDerivationFailed     - HKDF rejected its input             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages never include key material, nonces or plaintext bytes. Decryption
//! errors only name the coarse category that rejected the envelope.

use thiserror::Error;

/// Result type alias for envelope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for envelope encryption
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Key Agreement Errors (100-199)
    // ========================================================================

    /// Secret scalar is zero, not below the curve order, or not 32 bytes
    #[error("Invalid secret key")]
    InvalidScalar,

    /// Public x-coordinate does not lift to a curve point
    #[error("Invalid public key")]
    InvalidPoint,

    // ========================================================================
    // Envelope Errors (200-299)
    // ========================================================================

    /// Payload length is outside the accepted bounds
    #[error("Invalid payload length")]
    InvalidLength,

    /// Version byte (or encoding flag) is not recognized
    #[error("Unsupported encryption version: {0}")]
    UnsupportedVersion(u8),

    /// Transport encoding could not be decoded
    #[error("Invalid base64 payload")]
    InvalidBase64,

    /// Authentication tag did not verify
    #[error("Invalid MAC")]
    InvalidMac,

    /// Decrypted padding is inconsistent with its length prefix
    #[error("Invalid padding")]
    InvalidPadding,

    /// Decrypted plaintext is not valid UTF-8
    #[error("Invalid plaintext encoding")]
    InvalidPlaintextEncoding,

    // ========================================================================
    // Plaintext Errors (300-399)
    // ========================================================================

    /// Plaintext is empty
    #[error("Plaintext is too short: at least 1 byte is required")]
    PlaintextTooShort,

    /// Plaintext exceeds the 16-bit length prefix
    #[error("Plaintext is too long: {0} bytes (maximum 65535)")]
    PlaintextTooLong(usize),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Key derivation failed
    #[error("Failed to derive keys: {0}")]
    KeyDerivationFailed(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Key agreement
    /// - 200-299: Envelope (decrypt)
    /// - 300-399: Plaintext (encrypt)
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Key agreement (100-199)
            Error::InvalidScalar => 100,
            Error::InvalidPoint => 101,

            // Envelope (200-299)
            Error::InvalidLength => 200,
            Error::UnsupportedVersion(_) => 201,
            Error::InvalidBase64 => 202,
            Error::InvalidMac => 203,
            Error::InvalidPadding => 204,
            Error::InvalidPlaintextEncoding => 205,

            // Plaintext (300-399)
            Error::PlaintextTooShort => 300,
            Error::PlaintextTooLong(_) => 301,

            // Internal (900-999)
            Error::KeyDerivationFailed(_) => 900,
        }
    }

    /// Check if this error classifies a malformed or forged envelope
    pub fn is_decryption_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidLength
                | Error::UnsupportedVersion(_)
                | Error::InvalidBase64
                | Error::InvalidMac
                | Error::InvalidPadding
                | Error::InvalidPlaintextEncoding
        )
    }

    /// Check if this error comes from rejected key material
    pub fn is_key_error(&self) -> bool {
        matches!(self, Error::InvalidScalar | Error::InvalidPoint)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(_: base64::DecodeError) -> Self {
        Error::InvalidBase64
    }
}

impl From<hkdf::InvalidLength> for Error {
    fn from(err: hkdf::InvalidLength) -> Self {
        Error::KeyDerivationFailed(err.to_string())
    }
}

impl From<hkdf::InvalidPrkLength> for Error {
    fn from(err: hkdf::InvalidPrkLength) -> Self {
        Error::KeyDerivationFailed(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::InvalidScalar.code(), 100);
        assert_eq!(Error::InvalidPoint.code(), 101);
        assert_eq!(Error::InvalidLength.code(), 200);
        assert_eq!(Error::InvalidMac.code(), 203);
        assert_eq!(Error::PlaintextTooShort.code(), 300);
        assert_eq!(Error::KeyDerivationFailed("test".into()).code(), 900);
    }

    #[test]
    fn test_error_categories() {
        assert!(Error::InvalidMac.is_decryption_error());
        assert!(Error::UnsupportedVersion(1).is_decryption_error());
        assert!(!Error::PlaintextTooShort.is_decryption_error());
        assert!(Error::InvalidPoint.is_key_error());
        assert!(!Error::InvalidPadding.is_key_error());
    }

    #[test]
    fn test_error_message_carries_length() {
        let err = Error::PlaintextTooLong(70000);

        assert_eq!(err.code(), 301);
        assert!(err.to_string().contains("70000"));
    }
}
