//! # Identity Keys
//!
//! The public half of a party's long-term identity, as it is fed into the
//! fingerprint hash.
//!
//! We treat the key as opaque bytes. Whoever hands us an `IdentityKey` has
//! already decided how to serialize it, and that serialization *is* the
//! identity as far as the safety number is concerned: the same curve point
//! with a different type prefix is a different fingerprint.
//!
//! ## Curve25519 keys
//!
//! Deployed clients serialize X25519 identity keys as 33 bytes: a `0x05`
//! type byte followed by the 32-byte Montgomery u-coordinate.
//! [`IdentityKey::from_x25519`] produces exactly that layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use x25519_dalek::PublicKey as X25519PublicKey;

use crate::error::FingerprintError;

/// Type prefix for serialized Curve25519 (DJB) public keys.
pub const DJB_KEY_TYPE: u8 = 0x05;

/// Length of a serialized Curve25519 identity key: type byte + 32 bytes.
pub const DJB_KEY_LENGTH: usize = 33;

/// A party's serialized public identity key.
///
/// Never empty. Ordering (`Ord`) is unsigned byte-wise lexicographic, which
/// is the ordering the display encoding relies on.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct IdentityKey {
    bytes: Vec<u8>,
}

impl IdentityKey {
    /// Wrap serialized key bytes. Rejects an empty slice.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, FingerprintError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(FingerprintError::EmptyIdentityKey);
        }
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded serialized key.
    pub fn from_hex(hex_str: &str) -> Result<Self, FingerprintError> {
        Self::new(hex::decode(hex_str.trim())?)
    }

    /// Serialize an X25519 public key with the `0x05` type prefix.
    pub fn from_x25519(public_key: &X25519PublicKey) -> Self {
        let mut bytes = Vec::with_capacity(DJB_KEY_LENGTH);
        bytes.push(DJB_KEY_TYPE);
        bytes.extend_from_slice(public_key.as_bytes());
        Self { bytes }
    }

    /// Merge several keys belonging to one party into a single logical key.
    ///
    /// The keys are sorted and concatenated, so the result does not depend on
    /// the order the caller happened to hold them in. A single-key set yields
    /// that key unchanged.
    pub fn logical(keys: &[IdentityKey]) -> Result<Self, FingerprintError> {
        let mut sorted: Vec<&IdentityKey> = keys.iter().collect();
        sorted.sort();
        let bytes: Vec<u8> = sorted
            .into_iter()
            .flat_map(|key| key.bytes.iter().copied())
            .collect();
        Self::new(bytes)
    }

    /// The serialized key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex rendering of the serialized key.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl TryFrom<Vec<u8>> for IdentityKey {
    type Error = FingerprintError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl From<IdentityKey> for Vec<u8> {
    fn from(key: IdentityKey) -> Self {
        key.bytes
    }
}

impl From<X25519PublicKey> for IdentityKey {
    fn from(public_key: X25519PublicKey) -> Self {
        Self::from_x25519(&public_key)
    }
}

impl AsRef<[u8]> for IdentityKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({})", self.to_hex())
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
