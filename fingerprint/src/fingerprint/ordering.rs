//! Canonical party ordering for the displayable fingerprint.
//!
//! Two people reading digits to each other must see the same 60 digits.
//! Alice's device calls her "local" and Bob "remote"; Bob's device does the
//! opposite. So the first half of the display text can't be "local" — it
//! has to be whichever party sorts first by serialized identity key.

use std::cmp::Ordering;

/// Which party's digits lead the displayable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum First {
    /// The caller's own identity sorts first (or both are equal).
    Local,
    /// The peer's identity sorts first.
    Remote,
}

/// Unsigned byte-wise lexicographic comparison of the two serialized
/// identities. Ties go to `Local`; with identical keys both halves come from
/// the same key anyway.
pub fn order(local_identity: &[u8], remote_identity: &[u8]) -> First {
    match local_identity.cmp(remote_identity) {
        Ordering::Less | Ordering::Equal => First::Local,
        Ordering::Greater => First::Remote,
    }
}

/// Arrange a (local, remote) pair into display order.
pub fn arrange<T>(first: First, local: T, remote: T) -> (T, T) {
    match first {
        First::Local => (local, remote),
        First::Remote => (remote, local),
    }
}
