//! Run configuration: verbosity, scheduling mode, chaos level and seed width.
//!
//! All validation happens here, before the pipeline starts. A [`RunConfig`]
//! that exists is a config the pipeline can run.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Diagnostic output level. Never affects control flow or timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Only the seed line.
    #[default]
    None,
    /// Banner, progress and per-language timings.
    Lite,
    /// Everything: probe output, compiler and workload stdio, full digest.
    Heavy,
}

impl Verbosity {
    /// Whether child process stdout/stderr should be passed through.
    pub fn streams_child_output(self) -> bool {
        self == Self::Heavy
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Lite => write!(f, "lite"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}

impl FromStr for Verbosity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "lite" => Ok(Self::Lite),
            "heavy" => Ok(Self::Heavy),
            other => Err(Error::InvalidConfig(format!(
                "invalid verbosity {other:?} (expected none, lite or heavy)"
            ))),
        }
    }
}

/// How many languages take part in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ChaosLevel {
    /// The reduced set: lua, python, node, go.
    Low,
    /// Every supported language.
    #[default]
    High,
}

impl fmt::Display for ChaosLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for ChaosLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            other => Err(Error::InvalidConfig(format!(
                "invalid chaos level {other:?} (expected low or high)"
            ))),
        }
    }
}

/// Execution scheduling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Launch every artifact at once and join them all.
    #[default]
    Parallel,
    /// Run artifacts one at a time in enumeration order.
    Queued,
}

impl Schedule {
    pub fn from_queue_flag(queue: bool) -> Self {
        if queue { Self::Queued } else { Self::Parallel }
    }

    pub fn is_queued(self) -> bool {
        self == Self::Queued
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parallel => write!(f, "parallel"),
            Self::Queued => write!(f, "queued"),
        }
    }
}

/// Requested seed width in bits, always within `1..=512`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeedBits(u16);

impl SeedBits {
    pub const MIN: u16 = 1;
    /// Width of a BLAKE2b-512 digest.
    pub const MAX: u16 = 512;

    pub fn new(bits: u16) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(Error::InvalidConfig(format!(
                "seed length must be {}-{} bits, got {bits}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Number of digest bytes needed to hold the seed: `ceil(bits / 8)`.
    pub fn byte_len(self) -> usize {
        usize::from(self.0).div_ceil(8)
    }

    /// Low-order bits to drop from the leading byte, `0..=7`.
    pub fn excess_bits(self) -> u32 {
        match self.0 % 8 {
            0 => 0,
            rem => 8 - u32::from(rem),
        }
    }
}

impl Default for SeedBits {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u16> for SeedBits {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        Self::new(bits)
    }
}

impl fmt::Display for SeedBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a run needs to know up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    pub verbosity: Verbosity,
    pub schedule: Schedule,
    pub chaos: ChaosLevel,
    pub seed_bits: SeedBits,
}
