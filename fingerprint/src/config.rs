//! # Protocol Configuration & Constants
//!
//! Every magic number in the fingerprint protocol lives here. If you're
//! hardcoding a `30` or a `32` somewhere else, you're doing it wrong.
//!
//! These values are wire contract, not tuning knobs. Two devices that
//! disagree on any of them will compute different safety numbers for the
//! exact same keys, and the user will (correctly) assume they are being
//! attacked. Change nothing here without a version bump.

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

/// Version prefix mixed into the hash seed, serialized as a 2-byte
/// big-endian integer. Independent of [`SCANNABLE_VERSION`].
pub const FINGERPRINT_VERSION: u16 = 0;

/// Version carried in field 1 of the scannable blob. Peers compare this
/// before anything else; a difference is reported, never coerced.
pub const SCANNABLE_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Digest Layout
// ---------------------------------------------------------------------------

/// SHA-512 output length. The full iterated digest, before truncation.
pub const DIGEST_LENGTH: usize = 64;

/// Bytes of each party's digest consumed by the displayable encoding.
/// Six 5-byte groups.
pub const DISPLAY_DIGEST_LENGTH: usize = 30;

/// Bytes of each party's digest carried in the scannable blob.
pub const SCANNABLE_DIGEST_LENGTH: usize = 32;

/// Width of one display chunk in bytes. Read as a 40-bit big-endian integer.
pub const DISPLAY_CHUNK_BYTES: usize = 5;

/// Each chunk is reduced modulo this and rendered as 5 zero-padded digits.
pub const DISPLAY_CHUNK_MODULUS: u64 = 100_000;

/// Digits per rendered chunk.
pub const DISPLAY_CHUNK_DIGITS: usize = 5;

/// Digits contributed by one party: six chunks of five.
pub const DISPLAY_DIGITS_PER_PARTY: usize =
    (DISPLAY_DIGEST_LENGTH / DISPLAY_CHUNK_BYTES) * DISPLAY_CHUNK_DIGITS;

/// Total length of the displayable text. Always 60 ASCII digits.
pub const DISPLAY_TEXT_LENGTH: usize = 2 * DISPLAY_DIGITS_PER_PARTY;

// ---------------------------------------------------------------------------
// Work Factor
// ---------------------------------------------------------------------------

/// Default iteration count. This is what deployed clients use today, and
/// the value the published test vectors were generated with.
pub const DEFAULT_ITERATIONS: u32 = 5200;

/// Lower iteration count seen in older deployments and fast test suites.
pub const LEGACY_ITERATIONS: u32 = 1024;

// ---------------------------------------------------------------------------
// Generator Configuration
// ---------------------------------------------------------------------------

/// Runtime configuration for a fingerprint generator.
///
/// Both values must be identical on the two devices being compared. A
/// mismatched `iterations` produces silently different digests; a mismatched
/// `scannable_version` is at least caught by `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of hash rounds per party. Must be positive.
    pub iterations: u32,
    /// Version stamped into scannable blobs.
    pub scannable_version: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            scannable_version: SCANNABLE_VERSION,
        }
    }
}

impl GeneratorConfig {
    /// Configuration with a custom iteration count and the current scannable version.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Reject configurations that can never produce a usable fingerprint.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.iterations == 0 {
            return Err(FingerprintError::InvalidIterations);
        }
        Ok(())
    }
}
