//! # Fingerprints
//!
//! What a generator hands back, and the seam generators plug into.
//!
//! ```text
//!   (alice_id, alice_key)          (bob_id, bob_key)
//!            │                             │
//!      HashEngine (N rounds)         HashEngine (N rounds)
//!            │                             │
//!       digest_a[64]                  digest_b[64]
//!            ├──────────┐     ┌────────────┤
//!            │       order by key          │
//!            │          ▼     ▼            │
//!            │   DisplayableFingerprint    │
//!            │     (60 digits, same on     │
//!            │      both devices)          │
//!            ▼                             ▼
//!          ScannableFingerprint (local, remote as called;
//!          mirror images across devices, equal under compare)
//! ```

pub mod displayable;
pub mod generator;
pub mod ordering;
pub mod scannable;

pub use displayable::DisplayableFingerprint;
pub use generator::NumericFingerprintGenerator;
pub use ordering::First;
pub use scannable::ScannableFingerprint;

use crate::error::FingerprintError;
use crate::identity::{IdentityKey, StableIdentifier};

/// The result of one generator call: the number people read, and the blob
/// devices scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    displayable: DisplayableFingerprint,
    scannable: ScannableFingerprint,
}

impl Fingerprint {
    /// Pair up the two representations.
    pub fn new(displayable: DisplayableFingerprint, scannable: ScannableFingerprint) -> Self {
        Self {
            displayable,
            scannable,
        }
    }

    /// The 60-digit safety number.
    pub fn displayable(&self) -> &DisplayableFingerprint {
        &self.displayable
    }

    /// The machine-comparable blob.
    pub fn scannable(&self) -> &ScannableFingerprint {
        &self.scannable
    }
}

/// Anything that can turn two parties' identities into a [`Fingerprint`].
pub trait FingerprintGenerator {
    /// Fingerprint for one key per party.
    fn create_for(
        &self,
        local_identifier: &StableIdentifier,
        local_key: &IdentityKey,
        remote_identifier: &StableIdentifier,
        remote_key: &IdentityKey,
    ) -> Fingerprint;

    /// Fingerprint for parties holding several identity keys each. Each set
    /// is folded into one logical key with [`IdentityKey::logical`]; an
    /// empty set is rejected.
    fn create_for_key_sets(
        &self,
        local_identifier: &StableIdentifier,
        local_keys: &[IdentityKey],
        remote_identifier: &StableIdentifier,
        remote_keys: &[IdentityKey],
    ) -> Result<Fingerprint, FingerprintError>;
}
