//! # Iterated Fingerprint Hashing
//!
//! The work-factor hash that turns one party's (identity key, identifier)
//! pair into a 64-byte digest:
//!
//! ```text
//! acc = version_be16 || identity || identifier
//! repeat iterations times:
//!     acc = H(acc || identity)
//! ```
//!
//! `H` is SHA-512 by default. It is injected through [`FingerprintHasher`]
//! rather than called as a free function, so tests and alternative builds
//! can swap it without touching the engine.
//!
//! ## Why iterate at all?
//!
//! A safety number is only 30 digits per party. Iterating makes it more
//! expensive for an attacker to grind through keypairs looking for one whose
//! number collides with the victim's. 5200 rounds is cheap for a phone doing
//! it once and expensive for someone doing it a few billion times.
//!
//! ## Symmetry
//!
//! The engine only ever sees one party's material. Mixing both parties into
//! one digest would make the output depend on argument order, which is
//! exactly what the display ordering and the scannable swap rule exist to
//! avoid.

use sha2::{Digest, Sha512};

use crate::config::{DIGEST_LENGTH, FINGERPRINT_VERSION};
use crate::error::FingerprintError;

/// A pure hash capability used by [`HashEngine`].
///
/// Implementations must be stateless per call: the engine is shared across
/// threads and calls `hash` concurrently.
pub trait FingerprintHasher: Send + Sync {
    /// Hash the concatenation of `parts` into a 64-byte digest.
    fn hash(&self, parts: &[&[u8]]) -> [u8; DIGEST_LENGTH];
}

/// SHA-512 via the `sha2` crate. The only hasher deployed peers accept.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512Hasher;

impl FingerprintHasher for Sha512Hasher {
    fn hash(&self, parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
        let mut hasher = Sha512::new();
        for part in parts {
            hasher.update(part);
        }
        let result = hasher.finalize();
        let mut output = [0u8; DIGEST_LENGTH];
        output.copy_from_slice(&result);
        output
    }
}

/// Full-length iterated digest for one party.
///
/// Callers truncate it differently depending on the use: the first 30
/// bytes feed the display encoding, the first 32 go into the scannable blob.
#[derive(Clone, PartialEq, Eq)]
pub struct FingerprintDigest([u8; DIGEST_LENGTH]);

impl FingerprintDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The whole 64-byte digest.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// The first `N` bytes. An `N` above [`DIGEST_LENGTH`] fails to build.
    pub fn truncated<const N: usize>(&self) -> [u8; N] {
        #[allow(clippy::let_unit_value)]
        let () = Truncation::<N>::FITS;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.0[..N]);
        out
    }

    /// Hex rendering, for debugging and test vectors.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Compile-time bound on truncation lengths, evaluated per `N` when
/// `truncated::<N>` is instantiated.
struct Truncation<const N: usize>;

impl<const N: usize> Truncation<N> {
    const FITS: () = assert!(N <= DIGEST_LENGTH, "truncation longer than the digest");
}

impl std::fmt::Debug for FingerprintDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FingerprintDigest({})", self.to_hex())
    }
}

/// Iterated hash with a fixed work factor and version prefix.
///
/// # Example
///
/// ```
/// use safety_number::crypto::hash::{HashEngine, Sha512Hasher};
///
/// let engine = HashEngine::new(Sha512Hasher, 1024).unwrap();
/// let digest = engine.compute(b"\x05identity-key", b"+14152222222");
/// assert_eq!(digest.as_bytes().len(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct HashEngine<H = Sha512Hasher> {
    hasher: H,
    iterations: u32,
    version: u16,
}

impl<H: FingerprintHasher> HashEngine<H> {
    /// Build an engine using the current [`FINGERPRINT_VERSION`].
    ///
    /// Fails if `iterations` is zero. There's no upper bound; a caller that
    /// wants to burn ten seconds per fingerprint is free to.
    pub fn new(hasher: H, iterations: u32) -> Result<Self, FingerprintError> {
        Self::with_version(hasher, iterations, FINGERPRINT_VERSION)
    }

    /// Build an engine with an explicit seed version.
    pub fn with_version(hasher: H, iterations: u32, version: u16) -> Result<Self, FingerprintError> {
        if iterations == 0 {
            return Err(FingerprintError::InvalidIterations);
        }
        Ok(Self {
            hasher,
            iterations,
            version,
        })
    }

    /// Number of hash rounds per digest.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Version prefix mixed into the seed.
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Compute one party's digest.
    ///
    /// `identity` is the serialized public key, `identifier` the stable
    /// identifier bytes. Both are used as-is; no normalization happens here.
    pub fn compute(&self, identity: &[u8], identifier: &[u8]) -> FingerprintDigest {
        let version_bytes = self.version.to_be_bytes();
        let mut acc = self.hasher.hash(&[version_bytes.as_slice(), identity, identifier, identity]);
        for _ in 1..self.iterations {
            acc = self.hasher.hash(&[acc.as_slice(), identity]);
        }
        FingerprintDigest(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight-line reference of the documented construction, without the
    /// first-round fusion `compute` does.
    fn reference(iterations: u32, version: u16, identity: &[u8], identifier: &[u8]) -> Vec<u8> {
        let mut acc = [version.to_be_bytes().as_slice(), identity, identifier].concat();
        for _ in 0..iterations {
            acc = Sha512::digest([acc.as_slice(), identity].concat()).to_vec();
        }
        acc
    }

    #[test]
    fn test_sha512_known_vector() {
        // SHA-512("abc"), FIPS 180-2 appendix C.1.
        let digest = Sha512Hasher.hash(&[b"abc".as_slice()]);
        let expected = hex::decode(
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        )
        .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_hasher_parts_equal_concatenation() {
        let split = Sha512Hasher.hash(&[b"hello".as_slice(), b" ", b"world"]);
        let whole = Sha512Hasher.hash(&[b"hello world".as_slice()]);
        assert_eq!(split, whole);
    }

    #[test]
    fn test_compute_matches_reference_construction() {
        let identity = b"\x05some-public-key-bytes";
        let identifier = b"+14152222222";
        for iterations in [1, 2, 7, 64] {
            let engine = HashEngine::new(Sha512Hasher, iterations).unwrap();
            let digest = engine.compute(identity, identifier);
            assert_eq!(
                digest.as_bytes().as_slice(),
                reference(iterations, FINGERPRINT_VERSION, identity, identifier).as_slice(),
                "iterations={iterations}"
            );
        }
    }

    #[test]
    fn test_compute_deterministic() {
        let engine = HashEngine::new(Sha512Hasher, 100).unwrap();
        let a = engine.compute(b"key", b"id");
        let b = engine.compute(b"key", b"id");
        assert_eq!(a, b);
    }

    #[test]
    fn test_iterations_change_digest() {
        let a = HashEngine::new(Sha512Hasher, 1024).unwrap().compute(b"key", b"id");
        let b = HashEngine::new(Sha512Hasher, 1025).unwrap().compute(b"key", b"id");
        assert_ne!(a, b);
    }

    #[test]
    fn test_version_changes_digest() {
        let a = HashEngine::with_version(Sha512Hasher, 10, 0).unwrap().compute(b"key", b"id");
        let b = HashEngine::with_version(Sha512Hasher, 10, 1).unwrap().compute(b"key", b"id");
        assert_ne!(a, b);
    }

    #[test]
    fn test_identifier_changes_digest() {
        let engine = HashEngine::new(Sha512Hasher, 10).unwrap();
        assert_ne!(
            engine.compute(b"key", b"+14152222222"),
            engine.compute(b"key", b"+141512222222")
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(
            HashEngine::new(Sha512Hasher, 0),
            Err(FingerprintError::InvalidIterations)
        ));
    }

    #[test]
    fn test_injected_hasher_is_used() {
        struct Constant;
        impl FingerprintHasher for Constant {
            fn hash(&self, _parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
                [0xAB; DIGEST_LENGTH]
            }
        }
        let digest = HashEngine::new(Constant, 3).unwrap().compute(b"key", b"id");
        assert_eq!(digest.as_bytes(), &[0xAB; DIGEST_LENGTH]);
    }

    #[test]
    fn test_truncation() {
        let digest = HashEngine::new(Sha512Hasher, 1).unwrap().compute(b"key", b"id");
        let short: [u8; 30] = digest.truncated();
        let long: [u8; 32] = digest.truncated();
        assert_eq!(&short[..], &digest.as_bytes()[..30]);
        assert_eq!(&long[..30], &short[..]);
    }

    #[test]
    fn test_truncation_up_to_full_length() {
        let digest = HashEngine::new(Sha512Hasher, 1).unwrap().compute(b"key", b"id");
        let full: [u8; DIGEST_LENGTH] = digest.truncated();
        assert_eq!(&full, digest.as_bytes());
        let empty: [u8; 0] = digest.truncated();
        assert!(empty.is_empty());
    }
}
