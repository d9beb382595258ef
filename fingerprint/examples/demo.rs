//! Terminal walkthrough of a safety number check.
//!
//! Alice and Bob each generate a fingerprint on their own device, read the
//! digits to each other, and scan each other's blob. Then Mallory swaps a
//! key in the middle and we watch both checks fail.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use rand::rngs::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey};

use safety_number::config::DEFAULT_ITERATIONS;
use safety_number::{
    Fingerprint, FingerprintGenerator, IdentityKey, NumericFingerprintGenerator, StableIdentifier,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!(
        "{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================================================={RESET}"
    );
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn alarm(text: &str) {
    println!("{RED}{BOLD}  [!!] {text}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}  [{label}: {ms:.2} ms]{RESET}");
}

fn show_number(name: &str, fp: &Fingerprint, color: &str) {
    let groups: Vec<&str> = fp.displayable().groups().collect();
    println!("  {color}{BOLD}{name:<6}{RESET} {}", groups[..6].join(" "));
    println!("         {}", groups[6..].join(" "));
}

fn random_identity() -> IdentityKey {
    IdentityKey::from_x25519(&PublicKey::from(&EphemeralSecret::random_from_rng(OsRng)))
}

fn id(s: &str) -> StableIdentifier {
    StableIdentifier::try_from(s).expect("non-empty identifier")
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let generator =
        NumericFingerprintGenerator::new(DEFAULT_ITERATIONS).expect("positive iteration count");

    section(1, "Identity keys");
    let alice = random_identity();
    let bob = random_identity();
    let mallory = random_identity();
    println!("  {BLUE}Alice{RESET}   {DIM}{alice}{RESET}");
    println!("  {GREEN}Bob{RESET}     {DIM}{bob}{RESET}");

    section(2, "Each device computes its fingerprint");
    let t = Instant::now();
    let on_alice = generator.create_for(&id("+14152222222"), &alice, &id("+14153333333"), &bob);
    let on_bob = generator.create_for(&id("+14153333333"), &bob, &id("+14152222222"), &alice);
    timing("2 x create_for", t.elapsed());
    show_number("Alice", &on_alice, BLUE);
    show_number("Bob", &on_bob, GREEN);

    if on_alice.displayable() == on_bob.displayable() {
        success("Digits read aloud match");
    }
    if on_alice
        .scannable()
        .compare_to(&on_bob.scannable().to_bytes())
        .expect("well-formed blob")
    {
        success("Alice scanned Bob's code: match");
    }

    section(3, "Mallory substitutes her key for Bob's on Alice's device");
    let tampered =
        generator.create_for(&id("+14152222222"), &alice, &id("+14153333333"), &mallory);
    show_number("Alice", &tampered, BLUE);
    show_number("Bob", &on_bob, GREEN);

    if tampered.displayable() != on_bob.displayable() {
        alarm("Digits differ");
    }
    if !tampered
        .scannable()
        .compare_to(&on_bob.scannable().to_bytes())
        .expect("well-formed blob")
    {
        alarm("Alice scanned Bob's code: MISMATCH");
    }
    println!();
}
