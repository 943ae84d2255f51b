//! # Plaintext Padding
//!
//! Plaintexts are padded to a small set of bucket sizes before encryption so
//! that ciphertext length leaks only a coarse size class.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────┬───────────────────────────┬──────────────────────────┐
//! │ len (u16 BE) │ plaintext (len bytes)     │ zeros                    │
//! └──────────────┴───────────────────────────┴──────────────────────────┘
//!   2 bytes        └──────── calc_padded_len(len) bytes ───────────────┘
//! ```
//!
//! ## Buckets
//!
//! | Unpadded length | Chunk | Padded length |
//! |-----------------|-------|---------------|
//! | 1 - 32          | -     | 32            |
//! | 33 - 256        | 32    | next multiple of 32 |
//! | 257 - 512       | 64    | next multiple of 64 |
//! | 513 - 1024      | 128   | next multiple of 128 |
//! | ...             | nextPow / 8 | ...     |

use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Minimum plaintext size in bytes
pub const MIN_PLAINTEXT_SIZE: usize = 1;

/// Maximum plaintext size in bytes (fits the u16 prefix)
pub const MAX_PLAINTEXT_SIZE: usize = 65535;

/// Size of the big-endian length prefix
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// Smallest bucket
const MIN_BUCKET: usize = 32;

/// Compute the bucketed length for an unpadded plaintext length
///
/// Non-decreasing in `unpadded_len`, and never smaller than it. Lengths whose
/// bucket does not fit in a `usize` saturate to `usize::MAX`.
pub fn calc_padded_len(unpadded_len: usize) -> usize {
    if unpadded_len <= MIN_BUCKET {
        return MIN_BUCKET;
    }

    // Smallest power of two strictly above `unpadded_len - 1`
    let Some(next_power) = unpadded_len.checked_next_power_of_two() else {
        return usize::MAX;
    };
    let chunk = if next_power <= 256 { 32 } else { next_power / 8 };

    chunk
        .checked_mul((unpadded_len - 1) / chunk + 1)
        .unwrap_or(usize::MAX)
}

/// Pad a plaintext into `u16_be(len) || plaintext || zeros`
pub fn pad(plaintext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let len = plaintext.len();
    if len < MIN_PLAINTEXT_SIZE {
        return Err(Error::PlaintextTooShort);
    }
    if len > MAX_PLAINTEXT_SIZE {
        return Err(Error::PlaintextTooLong(len));
    }

    let total = LENGTH_PREFIX_SIZE + calc_padded_len(len);
    let mut padded = Zeroizing::new(Vec::with_capacity(total));
    padded.extend_from_slice(&(len as u16).to_be_bytes());
    padded.extend_from_slice(plaintext);
    padded.resize(total, 0);

    Ok(padded)
}

/// Strip padding and return the plaintext bytes
///
/// Fails with `InvalidPadding` when the prefix is zero, points past the
/// buffer, or the buffer size differs from what `pad` would have produced.
pub fn unpad(padded: &[u8]) -> Result<&[u8]> {
    if padded.len() < LENGTH_PREFIX_SIZE {
        return Err(Error::InvalidPadding);
    }

    let len = u16::from_be_bytes([padded[0], padded[1]]) as usize;
    if len == 0
        || LENGTH_PREFIX_SIZE + len > padded.len()
        || LENGTH_PREFIX_SIZE + calc_padded_len(len) != padded.len()
    {
        return Err(Error::InvalidPadding);
    }

    Ok(&padded[LENGTH_PREFIX_SIZE..LENGTH_PREFIX_SIZE + len])
}

// ============================================================================
// TESTS
// ============================================================================
