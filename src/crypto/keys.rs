//! # Key Validation
//!
//! This module validates secp256k1 key material before any secret-dependent
//! arithmetic runs.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SecretKey (secp256k1 scalar)                                   │   │
//! │  │  ────────────────────────────                                    │   │
//! │  │                                                                  │   │
//! │  │  Format: 32 bytes, big-endian                                   │   │
//! │  │  Valid iff 1 <= scalar < n                                      │   │
//! │  │    n = fffffffffffffffffffffffffffffffe                         │   │
//! │  │        baaedce6af48a03bbfd25e8cd0364141                         │   │
//! │  │  Zeroized on drop, never printed                                │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  PublicKey (x-only point)                                       │   │
//! │  │  ────────────────────────                                        │   │
//! │  │                                                                  │   │
//! │  │  Format: 32-byte x-coordinate                                   │   │
//! │  │  Lifted to the point with even y (SEC1 prefix 0x02)             │   │
//! │  │  Valid iff x < p and x³ + 7 is a square mod p                   │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping the y parity is safe for key agreement: `k·P` and `k·(-P)` share
//! the same x-coordinate, so both parties compute the same shared secret.

use std::fmt;

use k256::elliptic_curve::point::AffineCoordinates;
use k256::FieldBytes;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Size of a secret scalar in bytes
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of an x-only public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// SEC1 tag for a compressed point with even y
const EVEN_Y_TAG: u8 = 0x02;

/// A validated secp256k1 secret scalar
///
/// The inner `k256::SecretKey` zeroizes itself when dropped.
#[derive(Clone)]
pub struct SecretKey {
    inner: k256::SecretKey,
}

impl SecretKey {
    /// Validate 32 big-endian bytes as a secret scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate_scalar(bytes)
    }

    /// Parse a 64-character hex string as a secret scalar
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; SECRET_KEY_SIZE]);
        hex::decode_to_slice(hex_str, &mut bytes[..]).map_err(|_| Error::InvalidScalar)?;
        validate_scalar(&bytes[..])
    }

    /// Get the x-only public key for this scalar (`x(k·G)`)
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.public_key(),
        }
    }

    /// Get the secret scalar bytes
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_SIZE]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    pub(crate) fn as_inner(&self) -> &k256::SecretKey {
        &self.inner
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// A validated x-only secp256k1 public key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Validate a 32-byte x-coordinate as a public key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate_point(bytes)
    }

    /// Parse a 64-character hex string as a public key
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|_| Error::InvalidPoint)?;
        validate_point(&bytes)
    }

    /// Get the 32-byte x-coordinate
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.inner.as_affine().x().into()
    }

    /// Get the x-coordinate as lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub(crate) fn as_inner(&self) -> &k256::PublicKey {
        &self.inner
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Validate a secret scalar
///
/// Fails with `InvalidScalar` when the input is not exactly 32 bytes, is zero,
/// or is not below the curve order. The range check runs in constant time.
pub fn validate_scalar(bytes: &[u8]) -> Result<SecretKey> {
    if bytes.len() != SECRET_KEY_SIZE {
        return Err(Error::InvalidScalar);
    }

    let inner = k256::SecretKey::from_bytes(FieldBytes::from_slice(bytes))
        .map_err(|_| Error::InvalidScalar)?;

    Ok(SecretKey { inner })
}

/// Validate an x-only public key
///
/// Fails with `InvalidPoint` when the input is not exactly 32 bytes, the
/// x-coordinate is not a field element, or `x³ + 7` has no square root.
pub fn validate_point(bytes: &[u8]) -> Result<PublicKey> {
    if bytes.len() != PUBLIC_KEY_SIZE {
        return Err(Error::InvalidPoint);
    }

    let mut sec1 = [0u8; PUBLIC_KEY_SIZE + 1];
    sec1[0] = EVEN_Y_TAG;
    sec1[1..].copy_from_slice(bytes);

    let inner = k256::PublicKey::from_sec1_bytes(&sec1).map_err(|_| Error::InvalidPoint)?;

    Ok(PublicKey { inner })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
    const GENERATOR_X: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn scalar(last: u8) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        bytes
    }

    #[test]
    fn test_scalar_one_is_valid() {
        let sk = validate_scalar(&scalar(1)).unwrap();
        assert_eq!(sk.public_key().to_hex(), GENERATOR_X);
    }

    #[test]
    fn test_scalar_zero_rejected() {
        assert_eq!(validate_scalar(&[0u8; 32]).unwrap_err(), Error::InvalidScalar);
    }

    #[test]
    fn test_scalar_curve_order_rejected() {
        assert_eq!(SecretKey::from_hex(CURVE_ORDER).unwrap_err(), Error::InvalidScalar);
    }

    #[test]
    fn test_scalar_all_ff_rejected() {
        assert_eq!(validate_scalar(&[0xff; 32]).unwrap_err(), Error::InvalidScalar);
    }

    #[test]
    fn test_scalar_order_minus_one_valid() {
        let sk = SecretKey::from_hex(
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140",
        );
        assert!(sk.is_ok());
    }

    #[test]
    fn test_scalar_wrong_length_rejected() {
        assert_eq!(validate_scalar(&[1u8; 31]).unwrap_err(), Error::InvalidScalar);
        assert_eq!(validate_scalar(&[1u8; 33]).unwrap_err(), Error::InvalidScalar);
        assert_eq!(SecretKey::from_hex("01").unwrap_err(), Error::InvalidScalar);
        assert_eq!(SecretKey::from_hex("zz").unwrap_err(), Error::InvalidScalar);
    }

    #[test]
    fn test_scalar_round_trip_bytes() {
        let sk = validate_scalar(&scalar(7)).unwrap();
        assert_eq!(*sk.to_bytes(), scalar(7));
    }

    #[test]
    fn test_point_generator_valid() {
        let pk = PublicKey::from_hex(GENERATOR_X).unwrap();
        assert_eq!(pk.to_hex(), GENERATOR_X);
    }

    #[test]
    fn test_point_no_sqrt_rejected() {
        let result = PublicKey::from_hex(
            "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
        );
        assert_eq!(result.unwrap_err(), Error::InvalidPoint);
    }

    #[test]
    fn test_point_all_ff_rejected() {
        assert_eq!(validate_point(&[0xff; 32]).unwrap_err(), Error::InvalidPoint);
    }

    #[test]
    fn test_point_wrong_length_rejected() {
        assert_eq!(validate_point(&[2u8; 33]).unwrap_err(), Error::InvalidPoint);
        assert_eq!(validate_point(&[]).unwrap_err(), Error::InvalidPoint);
    }

    #[test]
    fn test_secret_debug_redacted() {
        let sk = validate_scalar(&scalar(9)).unwrap();
        assert_eq!(format!("{:?}", sk), "SecretKey([REDACTED])");
    }
}
