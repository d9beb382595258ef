//! # Scannable Fingerprint
//!
//! The machine-readable half: a compact blob one device shows (usually as a
//! QR code) and the other device scans and compares.
//!
//! ## Wire format
//!
//! Protobuf-compatible tag-length-value, so an independently written decoder
//! in any language parses it unambiguously:
//!
//! ```text
//! 08 <varint>                  field 1  version       (uint32)
//! 12 22 0a 20 <32 bytes>       field 2  local  { 1: content (bytes) }
//! 1a 22 0a 20 <32 bytes>       field 3  remote { 1: content (bytes) }
//! ```
//!
//! ## Roles are NOT normalized
//!
//! Unlike the displayable text, the blob keeps `local` and `remote` exactly
//! as the generating device saw them. Alice's blob is (alice, bob); Bob's is
//! (bob, alice). The [`compare`] swap rule reconciles the two.

use prost::Message;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::config::SCANNABLE_DIGEST_LENGTH;
use crate::error::FingerprintError;

/// Top-level scannable record.
#[derive(Clone, PartialEq, Message)]
struct CombinedFingerprints {
    #[prost(uint32, optional, tag = "1")]
    version: Option<u32>,
    #[prost(message, optional, tag = "2")]
    local_fingerprint: Option<LogicalFingerprint>,
    #[prost(message, optional, tag = "3")]
    remote_fingerprint: Option<LogicalFingerprint>,
}

/// One party's truncated digest.
#[derive(Clone, PartialEq, Message)]
struct LogicalFingerprint {
    #[prost(bytes = "vec", optional, tag = "1")]
    content: Option<Vec<u8>>,
}

impl LogicalFingerprint {
    fn wrap(content: &[u8; SCANNABLE_DIGEST_LENGTH]) -> Self {
        Self {
            content: Some(content.to_vec()),
        }
    }

    fn unwrap_content(
        field: Option<LogicalFingerprint>,
        name: &str,
    ) -> Result<[u8; SCANNABLE_DIGEST_LENGTH], FingerprintError> {
        let content = field
            .and_then(|f| f.content)
            .ok_or_else(|| FingerprintError::Parsing(format!("missing {name} fingerprint")))?;
        content.as_slice().try_into().map_err(|_| {
            FingerprintError::Parsing(format!(
                "{name} fingerprint is {} bytes, expected {SCANNABLE_DIGEST_LENGTH}",
                content.len()
            ))
        })
    }
}

/// A decoded scannable fingerprint: version plus both 32-byte fields, in the
/// roles of the device that produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct ScannableFingerprint {
    version: u32,
    local: [u8; SCANNABLE_DIGEST_LENGTH],
    remote: [u8; SCANNABLE_DIGEST_LENGTH],
}

impl ScannableFingerprint {
    /// Build from truncated digests. Roles are kept as given.
    pub fn new(
        version: u32,
        local: [u8; SCANNABLE_DIGEST_LENGTH],
        remote: [u8; SCANNABLE_DIGEST_LENGTH],
    ) -> Self {
        Self {
            version,
            local,
            remote,
        }
    }

    /// Parse a serialized blob.
    ///
    /// Fails with [`FingerprintError::Parsing`] on truncated or inconsistent
    /// tag/length structure, on a missing field, or on a content field that
    /// is not exactly 32 bytes.
    pub fn from_bytes(blob: &[u8]) -> Result<Self, FingerprintError> {
        let decoded = CombinedFingerprints::decode(blob)?;
        let version = decoded
            .version
            .ok_or_else(|| FingerprintError::Parsing("missing version".to_string()))?;
        let local = LogicalFingerprint::unwrap_content(decoded.local_fingerprint, "local")?;
        let remote = LogicalFingerprint::unwrap_content(decoded.remote_fingerprint, "remote")?;
        Ok(Self::new(version, local, remote))
    }

    /// Serialize to the wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        CombinedFingerprints {
            version: Some(self.version),
            local_fingerprint: Some(LogicalFingerprint::wrap(&self.local)),
            remote_fingerprint: Some(LogicalFingerprint::wrap(&self.remote)),
        }
        .encode_to_vec()
    }

    /// Parse a hex-encoded blob.
    pub fn from_hex(hex_str: &str) -> Result<Self, FingerprintError> {
        Self::from_bytes(&hex::decode(hex_str.trim())?)
    }

    /// Hex rendering of the serialized blob.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Scannable protocol version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The generating device's own truncated digest.
    pub fn local(&self) -> &[u8; SCANNABLE_DIGEST_LENGTH] {
        &self.local
    }

    /// The generating device's view of its peer's truncated digest.
    pub fn remote(&self) -> &[u8; SCANNABLE_DIGEST_LENGTH] {
        &self.remote
    }

    /// Compare against a blob scanned from the peer.
    ///
    /// `Ok(true)` means the peer's view of both keys matches ours.
    /// `Ok(false)` is a genuine mismatch. Errors mean the candidate could not
    /// be judged at all and must not be read as either outcome.
    pub fn compare_to(&self, candidate: &[u8]) -> Result<bool, FingerprintError> {
        let theirs = ScannableFingerprint::from_bytes(candidate).map_err(|err| {
            warn!(error = %err, "scanned fingerprint could not be parsed");
            err
        })?;
        self.matches(&theirs)
    }

    /// Compare against an already-decoded peer fingerprint.
    pub fn matches(&self, theirs: &ScannableFingerprint) -> Result<bool, FingerprintError> {
        if self.version != theirs.version {
            warn!(
                ours = self.version,
                theirs = theirs.version,
                "scanned fingerprint has a different version"
            );
            return Err(FingerprintError::VersionMismatch {
                ours: self.version,
                theirs: theirs.version,
            });
        }

        // Their remote is us, their local is them. Both halves are always
        // evaluated; `&` on `Choice` doesn't short-circuit.
        let ours_seen = theirs.remote[..].ct_eq(&self.local[..]);
        let theirs_seen = theirs.local[..].ct_eq(&self.remote[..]);
        let matched: bool = (ours_seen & theirs_seen).into();
        debug!(matched, version = self.version, "compared scannable fingerprints");
        Ok(matched)
    }
}

impl std::fmt::Debug for ScannableFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannableFingerprint")
            .field("version", &self.version)
            .field("local", &hex::encode(self.local))
            .field("remote", &hex::encode(self.remote))
            .finish()
    }
}

/// Encode a scannable blob from truncated digests, roles preserved.
pub fn encode(
    version: u32,
    local: &[u8; SCANNABLE_DIGEST_LENGTH],
    remote: &[u8; SCANNABLE_DIGEST_LENGTH],
) -> Vec<u8> {
    ScannableFingerprint::new(version, *local, *remote).to_bytes()
}

/// Decode a scannable blob into `(version, local, remote)`.
pub fn decode(
    blob: &[u8],
) -> Result<(u32, [u8; SCANNABLE_DIGEST_LENGTH], [u8; SCANNABLE_DIGEST_LENGTH]), FingerprintError> {
    let fp = ScannableFingerprint::from_bytes(blob)?;
    Ok((fp.version, fp.local, fp.remote))
}

/// Compare our own serialized blob against a candidate blob from the peer.
///
/// A failure to parse *our own* blob is reported the same way as a bad
/// candidate: the comparison can't proceed either way.
pub fn compare(own: &[u8], candidate: &[u8]) -> Result<bool, FingerprintError> {
    ScannableFingerprint::from_bytes(own)?.compare_to(candidate)
}
