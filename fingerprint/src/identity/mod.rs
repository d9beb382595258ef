//! # Identity Module
//!
//! The two inputs every fingerprint is built from, one pair per party:
//!
//! 1. **IdentityKey** — the serialized long-term public key. Opaque bytes;
//!    generating, storing and rotating the key pair happens elsewhere.
//! 2. **StableIdentifier** — the account the key belongs to.
//!
//! Both are validated once at construction (non-empty), so everything
//! downstream can take them by reference without re-checking.

pub mod identifier;
pub mod keys;

pub use identifier::StableIdentifier;
pub use keys::{IdentityKey, DJB_KEY_LENGTH, DJB_KEY_TYPE};
