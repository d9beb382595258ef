//! Stable identifiers bound into a fingerprint.
//!
//! Binding the identifier means the same key reused under two accounts
//! yields two different safety numbers. We don't validate the format
//! (phone number, UUID, whatever); that's the caller's business.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FingerprintError;

/// A non-empty, opaque account identifier.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct StableIdentifier {
    bytes: Vec<u8>,
}

impl StableIdentifier {
    /// Wrap identifier bytes. Rejects an empty slice.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, FingerprintError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(FingerprintError::EmptyIdentifier);
        }
        Ok(Self { bytes })
    }

    /// The identifier as raw bytes, exactly as hashed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for StableIdentifier {
    type Error = FingerprintError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&str> for StableIdentifier {
    type Error = FingerprintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s.as_bytes())
    }
}

impl From<StableIdentifier> for Vec<u8> {
    fn from(id: StableIdentifier) -> Self {
        id.bytes
    }
}

impl fmt::Debug for StableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StableIdentifier({})", String::from_utf8_lossy(&self.bytes))
    }
}
