// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Safety Number CLI
//!
//! Entry point for the `safety-number` binary. Parses CLI arguments,
//! initializes logging, and runs one of:
//!
//! - `generate` — compute the displayable number and scannable blob
//! - `compare`  — check a scanned blob against our own
//! - `decode`   — dump the fields of a blob
//! - `version`  — print build version information
//!
//! Exit codes: `0` success / match, `1` mismatch, `2` error (bad input,
//! version mismatch, unreadable config).

mod cli;
mod logging;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;

use safety_number::config::{FINGERPRINT_VERSION, SCANNABLE_VERSION};
use safety_number::{
    Fingerprint, FingerprintGenerator, GeneratorConfig, IdentityKey, NumericFingerprintGenerator,
    ScannableFingerprint, StableIdentifier,
};

use cli::{Commands, SafetyNumberCli};

/// Log target for events raised by the binary itself.
///
/// The bin is named `safety-number`, so its module path would be
/// `safety_number`, the same as the library's. A separate target lets
/// `RUST_LOG` tune the two independently.
pub(crate) const LOG_TARGET: &str = "safety_number_cli";

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "safety_number=warn,safety_number_cli=info";

/// Exit status for anything that kept a command from producing a verdict.
const EXIT_ERROR: u8 = 2;

/// How a command that ran to completion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Generated, decoded, or compared equal.
    Success,
    /// Compared and found different.
    Mismatch,
}

impl Outcome {
    fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Mismatch => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// JSON shape for `generate --json`.
#[derive(Debug, Serialize)]
struct GenerateOutput<'a> {
    displayable: &'a str,
    groups: Vec<&'a str>,
    scannable: String,
    iterations: u32,
    scannable_version: u32,
}

/// JSON shape for `decode --json`.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct DecodeOutput {
    version: u32,
    local: String,
    remote: String,
}

fn main() -> ExitCode {
    let cli = SafetyNumberCli::parse();
    logging::init_logging(DEFAULT_LOG_FILTER, cli.log_format.into());

    match run(cli.command) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            tracing::error!(target: LOG_TARGET, error = %format!("{err:#}"), "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(command: Commands) -> Result<Outcome> {
    match command {
        Commands::Generate(args) => generate(args),
        Commands::Compare(args) => compare(args),
        Commands::Decode(args) => decode(args),
        Commands::Version => {
            print_version();
            Ok(Outcome::Success)
        }
    }
}

/// Parses one or more hex keys for a party.
fn parse_keys(party: &str, hex_keys: &[String]) -> Result<Vec<IdentityKey>> {
    hex_keys
        .iter()
        .map(|k| {
            IdentityKey::from_hex(k).with_context(|| format!("invalid {party} identity key {k:?}"))
        })
        .collect()
}

fn parse_identifier(party: &str, id: &str) -> Result<StableIdentifier> {
    StableIdentifier::try_from(id).with_context(|| format!("invalid {party} identifier"))
}

/// Resolves settings and keys, then computes the fingerprint.
fn build_fingerprint(args: &cli::GenerateArgs) -> Result<(Fingerprint, GeneratorConfig)> {
    let config = settings::resolve(&args.generator)?;
    let generator = NumericFingerprintGenerator::from_config(config)?;

    let local_id = parse_identifier("local", &args.local_id)?;
    let remote_id = parse_identifier("remote", &args.remote_id)?;
    let local_keys = parse_keys("local", &args.local_keys)?;
    let remote_keys = parse_keys("remote", &args.remote_keys)?;

    tracing::info!(
        target: LOG_TARGET,
        iterations = config.iterations,
        local_keys = local_keys.len(),
        remote_keys = remote_keys.len(),
        "generating fingerprint"
    );

    let fingerprint: Fingerprint = match (local_keys.as_slice(), remote_keys.as_slice()) {
        ([local], [remote]) => generator.create_for(&local_id, local, &remote_id, remote),
        _ => generator.create_for_key_sets(&local_id, &local_keys, &remote_id, &remote_keys)?,
    };
    Ok((fingerprint, config))
}

/// Computes and prints the fingerprint for a local/remote pair.
fn generate(args: cli::GenerateArgs) -> Result<Outcome> {
    let (fingerprint, config) = build_fingerprint(&args)?;

    let displayable = fingerprint.displayable();
    let scannable_hex = fingerprint.scannable().to_hex();

    if args.json {
        let output = GenerateOutput {
            displayable: displayable.display_text(),
            groups: displayable.groups().collect(),
            scannable: scannable_hex,
            iterations: config.iterations,
            scannable_version: config.scannable_version,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let number = if args.grouped {
            displayable.groups().collect::<Vec<_>>().join(" ")
        } else {
            displayable.display_text().to_string()
        };
        println!("safety number : {number}");
        println!("scannable     : {scannable_hex}");
    }

    Ok(Outcome::Success)
}

/// Compares our blob against the peer's. Mismatch exits with status 1.
fn compare(args: cli::CompareArgs) -> Result<Outcome> {
    let own = ScannableFingerprint::from_hex(&args.own).context("our own blob is malformed")?;
    let candidate = hex::decode(args.candidate.trim()).context("candidate is not valid hex")?;

    let matched = own
        .compare_to(&candidate)
        .context("candidate could not be compared")?;

    if matched {
        tracing::info!(target: LOG_TARGET, "scanned fingerprint matches");
        println!("match");
        Ok(Outcome::Success)
    } else {
        tracing::warn!(target: LOG_TARGET, "scanned fingerprint does NOT match");
        println!("mismatch");
        Ok(Outcome::Mismatch)
    }
}

/// Splits a hex blob into its fields.
fn decode_blob(blob: &str) -> Result<DecodeOutput> {
    let fp = ScannableFingerprint::from_hex(blob).context("blob is malformed")?;
    Ok(DecodeOutput {
        version: fp.version(),
        local: hex::encode(fp.local()),
        remote: hex::encode(fp.remote()),
    })
}

/// Prints the fields of a scannable blob.
fn decode(args: cli::DecodeArgs) -> Result<Outcome> {
    let output = decode_blob(&args.blob)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("version : {}", output.version);
        println!("local   : {}", output.local);
        println!("remote  : {}", output.remote);
    }

    Ok(Outcome::Success)
}

/// Prints version information to stdout.
fn print_version() {
    println!("safety-number {}", env!("CARGO_PKG_VERSION"));
    println!("hash version      {}", FINGERPRINT_VERSION);
    println!("scannable version {}", SCANNABLE_VERSION);
    println!("rustc             {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
