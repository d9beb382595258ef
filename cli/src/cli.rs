//! # CLI Interface
//!
//! Defines the command-line argument structure for `safety-number` using
//! `clap` derive. Supports four subcommands: `generate`, `compare`,
//! `decode`, and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate and compare safety numbers.
///
/// Computes the 60-digit number two people read to each other, and the
/// scannable blob their devices exchange, from both parties' identity keys
/// and stable identifiers.
#[derive(Parser, Debug)]
#[command(
    name = "safety-number",
    about = "Generate and compare safety numbers",
    version,
    propagate_version = true
)]
pub struct SafetyNumberCli {
    /// Log output format.
    #[arg(long, global = true, value_enum, env = "FINGERPRINT_LOG_FORMAT", default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the fingerprint for a local and a remote identity.
    Generate(GenerateArgs),
    /// Compare our scannable blob against one scanned from the peer.
    Compare(CompareArgs),
    /// Print the fields of a scannable blob.
    Decode(DecodeArgs),
    /// Print version information and exit.
    Version,
}

/// Log formats selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable output.
    Pretty,
    /// JSON lines.
    Json,
}

/// Generator settings shared by commands that compute fingerprints.
///
/// Precedence: flag / environment variable, then the config file, then
/// built-in defaults.
#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// Path to a JSON generator config (`{"iterations": .., "scannable_version": ..}`).
    #[arg(long, short = 'c', env = "FINGERPRINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hash rounds per party. Must match the peer's.
    #[arg(long, env = "FINGERPRINT_ITERATIONS")]
    pub iterations: Option<u32>,

    /// Version stamped into the scannable blob.
    #[arg(long, env = "FINGERPRINT_SCANNABLE_VERSION")]
    pub scannable_version: Option<u32>,
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Our stable identifier (e.g. phone number).
    #[arg(long)]
    pub local_id: String,

    /// Our serialized identity key, hex. Repeat for a key set.
    #[arg(long = "local-key", required = true)]
    pub local_keys: Vec<String>,

    /// The peer's stable identifier.
    #[arg(long)]
    pub remote_id: String,

    /// The peer's serialized identity key, hex. Repeat for a key set.
    #[arg(long = "remote-key", required = true)]
    pub remote_keys: Vec<String>,

    /// Print the number as twelve 5-digit groups.
    #[arg(long)]
    pub grouped: bool,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

/// Arguments for the `compare` subcommand.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Our own scannable blob, hex.
    #[arg(long)]
    pub own: String,

    /// The blob scanned from the peer, hex.
    #[arg(long)]
    pub candidate: String,
}

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Scannable blob, hex.
    pub blob: String,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        SafetyNumberCli::command().debug_assert();
    }

    #[test]
    fn test_generate_accepts_key_sets() {
        let cli = SafetyNumberCli::try_parse_from([
            "safety-number",
            "generate",
            "--local-id",
            "+14152222222",
            "--local-key",
            "05aa",
            "--local-key",
            "05bb",
            "--remote-id",
            "+14153333333",
            "--remote-key",
            "05cc",
            "--iterations",
            "1024",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.local_keys, vec!["05aa", "05bb"]);
                assert_eq!(args.remote_keys, vec!["05cc"]);
                assert_eq!(args.generator.iterations, Some(1024));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_scannable_version_env_name() {
        let cmd = SafetyNumberCli::command();
        let generate = cmd.find_subcommand("generate").unwrap();
        let env_of = |id: &str| {
            generate
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };
        assert_eq!(
            env_of("scannable_version").as_deref(),
            Some("FINGERPRINT_SCANNABLE_VERSION")
        );
        assert_eq!(env_of("iterations").as_deref(), Some("FINGERPRINT_ITERATIONS"));
    }

    #[test]
    fn test_generate_requires_keys() {
        let result = SafetyNumberCli::try_parse_from([
            "safety-number",
            "generate",
            "--local-id",
            "a",
            "--remote-id",
            "b",
        ]);
        assert!(result.is_err());
    }
}
