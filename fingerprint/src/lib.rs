// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Safety Number — Core Library
//!
//! Numeric fingerprints for checking, out of band, that two people really
//! hold each other's identity keys. If a man in the middle swapped a key
//! during session setup, the numbers on the two phones won't match, and
//! that is the whole point.
//!
//! Each fingerprint comes in two forms:
//!
//! - a **displayable** 60-digit number two humans can read to each other,
//!   identical on both devices;
//! - a **scannable** blob one device shows and the other scans, which the
//!   scanning device compares with a role-swap rule.
//!
//! ## Architecture
//!
//! - **config** — Wire constants and generator configuration.
//! - **crypto** — The iterated SHA-512 behind every digest.
//! - **identity** — Identity keys and stable identifiers.
//! - **fingerprint** — Ordering, display encoding, scannable codec, and the
//!   generator tying them together.
//! - **error** — One error enum for the whole crate.
//!
//! ## Design Philosophy
//!
//! 1. Byte-exact over clever. Two devices that were never in the same room
//!    have to agree on every digit.
//! 2. Pure functions only. No I/O, no clocks, no randomness, no shared
//!    mutable state; call it from as many threads as you like.
//! 3. A mismatch is an answer, not an error. `compare` returns `Ok(false)`
//!    for an impostor and reserves `Err` for input it cannot judge.

pub mod config;
pub mod crypto;
pub mod error;
pub mod fingerprint;
pub mod identity;

pub use config::GeneratorConfig;
pub use error::FingerprintError;
pub use fingerprint::{
    DisplayableFingerprint, Fingerprint, FingerprintGenerator, NumericFingerprintGenerator,
    ScannableFingerprint,
};
pub use identity::{IdentityKey, StableIdentifier};
