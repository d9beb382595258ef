//! # Displayable Fingerprint
//!
//! Sixty decimal digits two humans can read aloud to each other.
//!
//! Each party contributes 30 digits from the first 30 bytes of its digest:
//! six 5-byte chunks, each read as a 40-bit big-endian integer, reduced
//! modulo 100000 and zero-padded to five digits.
//!
//! The modular reduction has a bias (2^40 isn't a multiple of 10^5), but it
//! is on the order of 10^-7 per chunk and irrelevant next to the 5200-round
//! work factor. Deployed peers use this exact reduction, so it stays.

use serde::Serialize;
use std::fmt::{self, Write};

use crate::config::{
    DISPLAY_CHUNK_BYTES, DISPLAY_CHUNK_DIGITS, DISPLAY_CHUNK_MODULUS, DISPLAY_DIGEST_LENGTH,
    DISPLAY_DIGITS_PER_PARTY, DISPLAY_TEXT_LENGTH,
};

/// The 60-digit safety number.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayableFingerprint {
    text: String,
}

impl DisplayableFingerprint {
    /// Encode two digests, already in display order.
    pub fn new(
        first: &[u8; DISPLAY_DIGEST_LENGTH],
        second: &[u8; DISPLAY_DIGEST_LENGTH],
    ) -> Self {
        let mut text = String::with_capacity(DISPLAY_TEXT_LENGTH);
        encode_party(first, &mut text);
        encode_party(second, &mut text);
        Self { text }
    }

    /// The full 60-digit text, no separators.
    pub fn display_text(&self) -> &str {
        &self.text
    }

    /// The text split into twelve 5-digit groups, for presentation layers
    /// that lay the number out in a grid.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        // All ASCII, so byte offsets are char offsets.
        (0..self.text.len())
            .step_by(DISPLAY_CHUNK_DIGITS)
            .map(move |start| &self.text[start..start + DISPLAY_CHUNK_DIGITS])
    }
}

/// Append one party's 30 digits.
fn encode_party(digest: &[u8; DISPLAY_DIGEST_LENGTH], out: &mut String) {
    for chunk in digest.chunks_exact(DISPLAY_CHUNK_BYTES) {
        // Writing to a String can't fail.
        let _ = write!(out, "{:05}", encode_chunk(chunk));
    }
    debug_assert_eq!(out.len() % DISPLAY_DIGITS_PER_PARTY, 0);
}

/// 40-bit big-endian integer, reduced to five decimal digits.
fn encode_chunk(chunk: &[u8]) -> u64 {
    let value = chunk
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
    value % DISPLAY_CHUNK_MODULUS
}

impl fmt::Display for DisplayableFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for DisplayableFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayableFingerprint({})", self.text)
    }
}
