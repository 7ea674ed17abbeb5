//! Entropy extraction: timings → buffer → BLAKE2b-512 → truncated seed.
//!
//! **All** transformation of timing data lives here. The scheduler produces
//! raw nanosecond counts; this module is the single gateway that turns them
//! into a seed.
//!
//! # Architecture
//!
//! ```text
//! Timings → Entropy Buffer (8-byte BE per language) → BLAKE2b-512 → Truncate → Seed
//! ```
//!
//! Extraction is pure: the same [`Timings`] and [`SeedBits`] always produce
//! the same seed. Run-to-run variation comes only from the measured timings.

use std::fmt;

use blake2::{Blake2b512, Digest};
use num_bigint::BigUint;

use crate::config::SeedBits;
use crate::scheduler::Timings;

/// Size of a BLAKE2b-512 digest in bytes.
pub const DIGEST_LEN: usize = 64;

/// Final output of a run: a non-negative integer of at most `bits` bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    bits: SeedBits,
    value: BigUint,
}

impl Seed {
    /// Interpret big-endian `bytes` as a seed of the given width.
    pub fn from_be_bytes(bits: SeedBits, bytes: &[u8]) -> Self {
        Self {
            bits,
            value: BigUint::from_bytes_be(bytes),
        }
    }

    pub fn bits(&self) -> SeedBits {
        self.bits
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Big-endian bytes, left-padded with zeros to `ceil(bits / 8)` bytes.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let raw = self.value.to_bytes_be();
        let width = self.bits.byte_len();
        let mut out = vec![0u8; width.saturating_sub(raw.len())];
        out.extend_from_slice(&raw);
        out
    }
}

/// Decimal rendering.
impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Every intermediate of one extraction, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub buffer: Vec<u8>,
    pub digest: [u8; DIGEST_LEN],
    pub seed: Seed,
}

impl Extraction {
    pub fn digest_hex(&self) -> String {
        hex(&self.digest)
    }
}

// ---------------------------------------------------------------------------
// Pipeline steps
// ---------------------------------------------------------------------------

/// Serialise every duration as 8 big-endian bytes, in sorted language order.
pub fn entropy_buffer(timings: &Timings) -> Vec<u8> {
    let mut buf = Vec::with_capacity(timings.len() * 8);
    for (_, nanos) in timings.iter() {
        buf.extend_from_slice(&nanos.to_be_bytes());
    }
    buf
}

/// BLAKE2b with a 512-bit output.
pub fn blake2b_512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let hash = Blake2b512::digest(data);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hash);
    out
}

/// Keep the leading `ceil(bits / 8)` bytes of `digest` and shift the first
/// byte right so exactly `bits` significant bits remain.
pub fn truncate_digest(digest: &[u8; DIGEST_LEN], bits: SeedBits) -> Vec<u8> {
    let mut raw = digest[..bits.byte_len()].to_vec();
    raw[0] >>= bits.excess_bits();
    raw
}

/// Run the whole extraction for a complete timing set.
pub fn extract(timings: &Timings, bits: SeedBits) -> Extraction {
    let buffer = entropy_buffer(timings);
    let digest = blake2b_512(&buffer);
    let seed = Seed::from_be_bytes(bits, &truncate_digest(&digest, bits));
    Extraction {
        buffer,
        digest,
        seed,
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
