//! Error types for fingerprint generation and comparison.
//!
//! A key mismatch is not in here, and that's on purpose: detecting an
//! impersonator is the system working, so `compare` reports it as
//! `Ok(false)`. These variants are for inputs the system cannot reason about.

use thiserror::Error;

/// Errors produced by the fingerprint library.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// Scannable bytes violate the tag-length-value layout (truncated,
    /// inconsistent lengths, missing fields, wrong payload size).
    #[error("malformed scannable fingerprint: {0}")]
    Parsing(String),

    /// The two blobs were produced under different scannable versions.
    #[error("scannable fingerprint version mismatch: ours {ours}, theirs {theirs}")]
    VersionMismatch {
        /// Version of the locally generated blob.
        ours: u32,
        /// Version of the candidate blob.
        theirs: u32,
    },

    /// A generator was configured with zero hash rounds.
    #[error("iteration count must be positive")]
    InvalidIterations,

    /// An identity key with no bytes.
    #[error("identity key material is empty")]
    EmptyIdentityKey,

    /// A stable identifier with no bytes.
    #[error("stable identifier is empty")]
    EmptyIdentifier,

    /// Hex input could not be decoded.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl From<prost::DecodeError> for FingerprintError {
    fn from(err: prost::DecodeError) -> Self {
        FingerprintError::Parsing(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_mismatch_message() {
        let err = FingerprintError::VersionMismatch { ours: 1, theirs: 2 };
        assert_eq!(
            err.to_string(),
            "scannable fingerprint version mismatch: ours 1, theirs 2"
        );
    }

    #[test]
    fn test_decode_error_becomes_parsing() {
        // A continuation bit with nothing after it: truncated varint.
        let mut buf: &[u8] = &[0xff];
        let decode_err = prost::encoding::decode_varint(&mut buf).unwrap_err();
        let err: FingerprintError = decode_err.into();
        assert!(matches!(err, FingerprintError::Parsing(_)));
    }
}
