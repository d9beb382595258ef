//! # Numeric Fingerprint Generator
//!
//! Glues the pieces together. For each call:
//!
//! 1. Hash each party's (key, identifier) separately with the configured
//!    work factor. Never mix the two parties into one digest.
//! 2. Order the parties by serialized key to build the displayable text.
//! 3. Build the scannable blob from the same digests, in call roles.
//!
//! The generator holds only immutable configuration, so a single instance
//! can be shared across threads (`Arc<NumericFingerprintGenerator>` or just
//! a `&'static`) and called concurrently.

use tracing::{debug, instrument};

use super::displayable::DisplayableFingerprint;
use super::ordering::{arrange, order};
use super::scannable::ScannableFingerprint;
use super::{Fingerprint, FingerprintGenerator};
use crate::config::{GeneratorConfig, DISPLAY_DIGEST_LENGTH, SCANNABLE_DIGEST_LENGTH};
use crate::crypto::hash::{FingerprintHasher, HashEngine, Sha512Hasher};
use crate::error::FingerprintError;
use crate::identity::{IdentityKey, StableIdentifier};

/// Generates safety numbers from identity keys and stable identifiers.
///
/// # Example
///
/// ```
/// use safety_number::{FingerprintGenerator, IdentityKey, NumericFingerprintGenerator, StableIdentifier};
///
/// let generator = NumericFingerprintGenerator::new(1024).unwrap();
/// let alice = IdentityKey::from_hex("05aa").unwrap();
/// let bob = IdentityKey::from_hex("05bb").unwrap();
/// let alice_id = StableIdentifier::try_from("+14152222222").unwrap();
/// let bob_id = StableIdentifier::try_from("+14153333333").unwrap();
///
/// let on_alice = generator.create_for(&alice_id, &alice, &bob_id, &bob);
/// let on_bob = generator.create_for(&bob_id, &bob, &alice_id, &alice);
///
/// assert_eq!(on_alice.displayable(), on_bob.displayable());
/// assert!(on_alice.scannable().compare_to(&on_bob.scannable().to_bytes()).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct NumericFingerprintGenerator<H = Sha512Hasher> {
    engine: HashEngine<H>,
    scannable_version: u32,
}

impl NumericFingerprintGenerator<Sha512Hasher> {
    /// SHA-512 generator with the given work factor and the current
    /// scannable version.
    pub fn new(iterations: u32) -> Result<Self, FingerprintError> {
        Self::from_config(GeneratorConfig::with_iterations(iterations))
    }

    /// SHA-512 generator from a full configuration.
    pub fn from_config(config: GeneratorConfig) -> Result<Self, FingerprintError> {
        Self::with_hasher(config, Sha512Hasher)
    }
}

impl<H: FingerprintHasher> NumericFingerprintGenerator<H> {
    /// Generator with an injected hash primitive.
    pub fn with_hasher(config: GeneratorConfig, hasher: H) -> Result<Self, FingerprintError> {
        config.validate()?;
        let engine = HashEngine::new(hasher, config.iterations)?;
        debug!(
            iterations = config.iterations,
            scannable_version = config.scannable_version,
            "fingerprint generator configured"
        );
        Ok(Self {
            engine,
            scannable_version: config.scannable_version,
        })
    }

    /// Configured work factor.
    pub fn iterations(&self) -> u32 {
        self.engine.iterations()
    }

    /// Version stamped into scannable blobs.
    pub fn scannable_version(&self) -> u32 {
        self.scannable_version
    }

    /// Core of both `create_for` variants, over already-serialized keys.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            iterations = self.engine.iterations(),
            local_key_len = local_key.as_bytes().len(),
            remote_key_len = remote_key.as_bytes().len(),
        )
    )]
    fn build(
        &self,
        local_identifier: &StableIdentifier,
        local_key: &IdentityKey,
        remote_identifier: &StableIdentifier,
        remote_key: &IdentityKey,
    ) -> Fingerprint {
        let local_digest = self
            .engine
            .compute(local_key.as_bytes(), local_identifier.as_bytes());
        let remote_digest = self
            .engine
            .compute(remote_key.as_bytes(), remote_identifier.as_bytes());

        let first = order(local_key.as_bytes(), remote_key.as_bytes());
        let (lead, follow) = arrange(
            first,
            local_digest.truncated::<DISPLAY_DIGEST_LENGTH>(),
            remote_digest.truncated::<DISPLAY_DIGEST_LENGTH>(),
        );
        let displayable = DisplayableFingerprint::new(&lead, &follow);

        let scannable = ScannableFingerprint::new(
            self.scannable_version,
            local_digest.truncated::<SCANNABLE_DIGEST_LENGTH>(),
            remote_digest.truncated::<SCANNABLE_DIGEST_LENGTH>(),
        );

        debug!(?first, "fingerprint generated");
        Fingerprint::new(displayable, scannable)
    }
}

impl<H: FingerprintHasher> FingerprintGenerator for NumericFingerprintGenerator<H> {
    fn create_for(
        &self,
        local_identifier: &StableIdentifier,
        local_key: &IdentityKey,
        remote_identifier: &StableIdentifier,
        remote_key: &IdentityKey,
    ) -> Fingerprint {
        self.build(local_identifier, local_key, remote_identifier, remote_key)
    }

    fn create_for_key_sets(
        &self,
        local_identifier: &StableIdentifier,
        local_keys: &[IdentityKey],
        remote_identifier: &StableIdentifier,
        remote_keys: &[IdentityKey],
    ) -> Result<Fingerprint, FingerprintError> {
        let local_key = IdentityKey::logical(local_keys)?;
        let remote_key = IdentityKey::logical(remote_keys)?;
        Ok(self.build(local_identifier, &local_key, remote_identifier, &remote_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DIGEST_LENGTH;

    fn key(bytes: &[u8]) -> IdentityKey {
        IdentityKey::new(bytes.to_vec()).unwrap()
    }

    fn id(s: &str) -> StableIdentifier {
        StableIdentifier::try_from(s).unwrap()
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(
            NumericFingerprintGenerator::new(0),
            Err(FingerprintError::InvalidIterations)
        ));
    }

    #[test]
    fn test_config_is_applied() {
        let config = GeneratorConfig {
            iterations: 7,
            scannable_version: 3,
        };
        let generator = NumericFingerprintGenerator::from_config(config).unwrap();
        assert_eq!(generator.iterations(), 7);
        assert_eq!(generator.scannable_version(), 3);

        let fp = generator.create_for(&id("a"), &key(&[5, 1]), &id("b"), &key(&[5, 2]));
        assert_eq!(fp.scannable().version(), 3);
    }

    #[test]
    fn test_display_symmetric_scannable_mirrored() {
        let generator = NumericFingerprintGenerator::new(16).unwrap();
        let (a, b) = (key(&[5, 0xf0]), key(&[5, 0x0f]));
        let on_a = generator.create_for(&id("alice"), &a, &id("bob"), &b);
        let on_b = generator.create_for(&id("bob"), &b, &id("alice"), &a);

        assert_eq!(on_a.displayable(), on_b.displayable());
        assert_ne!(on_a.scannable(), on_b.scannable());
        assert_eq!(on_a.scannable().local(), on_b.scannable().remote());
        assert_eq!(on_a.scannable().remote(), on_b.scannable().local());
    }

    #[test]
    fn test_scannable_uses_call_roles() {
        let generator = NumericFingerprintGenerator::new(4).unwrap();
        let engine = HashEngine::new(Sha512Hasher, 4).unwrap();
        // Remote key sorts first, so display order and call order disagree.
        let (local, remote) = (key(&[5, 0xff]), key(&[5, 0x00]));
        let fp = generator.create_for(&id("l"), &local, &id("r"), &remote);

        let local_digest = engine.compute(local.as_bytes(), b"l");
        let remote_digest = engine.compute(remote.as_bytes(), b"r");
        assert_eq!(fp.scannable().local(), &local_digest.truncated::<32>());
        assert_eq!(fp.scannable().remote(), &remote_digest.truncated::<32>());

        let expected = DisplayableFingerprint::new(
            &remote_digest.truncated::<30>(),
            &local_digest.truncated::<30>(),
        );
        assert_eq!(fp.displayable(), &expected);
    }

    #[test]
    fn test_single_key_set_equals_single_key() {
        let generator = NumericFingerprintGenerator::new(8).unwrap();
        let (a, b) = (key(&[5, 1, 2]), key(&[5, 3, 4]));
        let single = generator.create_for(&id("a"), &a, &id("b"), &b);
        let sets = generator
            .create_for_key_sets(&id("a"), &[a.clone()], &id("b"), &[b.clone()])
            .unwrap();
        assert_eq!(single, sets);
    }

    #[test]
    fn test_key_set_order_does_not_matter() {
        let generator = NumericFingerprintGenerator::new(8).unwrap();
        let (a1, a2, b) = (key(&[5, 1]), key(&[5, 2]), key(&[5, 3]));
        let one = generator
            .create_for_key_sets(&id("a"), &[a1.clone(), a2.clone()], &id("b"), &[b.clone()])
            .unwrap();
        let two = generator
            .create_for_key_sets(&id("a"), &[a2, a1], &id("b"), &[b])
            .unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_empty_key_set_rejected() {
        let generator = NumericFingerprintGenerator::new(8).unwrap();
        let result = generator.create_for_key_sets(&id("a"), &[], &id("b"), &[key(&[5])]);
        assert!(matches!(result, Err(FingerprintError::EmptyIdentityKey)));
    }

    #[test]
    fn test_custom_hasher() {
        /// XOR-fold hasher. Not cryptographic; just proves injection works.
        struct Fold;
        impl FingerprintHasher for Fold {
            fn hash(&self, parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
                let mut out = [0u8; DIGEST_LENGTH];
                for (i, byte) in parts.iter().flat_map(|p| p.iter()).enumerate() {
                    out[i % DIGEST_LENGTH] ^= byte;
                }
                out
            }
        }
        let generator =
            NumericFingerprintGenerator::with_hasher(GeneratorConfig::with_iterations(2), Fold)
                .unwrap();
        let (a, b) = (key(&[5, 1]), key(&[5, 2]));
        let on_a = generator.create_for(&id("a"), &a, &id("b"), &b);
        let on_b = generator.create_for(&id("b"), &b, &id("a"), &a);
        assert_eq!(on_a.displayable(), on_b.displayable());
        assert!(on_a.scannable().matches(on_b.scannable()).unwrap());
    }
}
