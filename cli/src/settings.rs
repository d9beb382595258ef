//! Generator configuration layering.
//!
//! Defaults, then an optional JSON config file, then flags and environment
//! variables (clap already merged those two). Whatever comes out is
//! validated once, before any hashing starts.

use anyhow::{Context, Result};
use std::path::Path;

use safety_number::GeneratorConfig;

use crate::cli::GeneratorArgs;
use crate::LOG_TARGET;

/// Read a JSON generator config from disk. Missing fields take defaults.
pub fn load_config_file(path: &Path) -> Result<GeneratorConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: GeneratorConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::debug!(target: LOG_TARGET, path = %path.display(), ?config, "loaded generator config file");
    Ok(config)
}

/// Resolve the effective generator config for this invocation.
pub fn resolve(args: &GeneratorArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(version) = args.scannable_version {
        config.scannable_version = version;
    }
    config
        .validate()
        .context("invalid generator configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config: Option<&Path>, iterations: Option<u32>) -> GeneratorArgs {
        GeneratorArgs {
            config: config.map(Path::to_path_buf),
            iterations,
            scannable_version: None,
        }
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = resolve(&args(None, None)).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_file_then_flag_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"iterations": 1024, "scannable_version": 1}}"#).unwrap();

        let from_file = resolve(&args(Some(file.path()), None)).unwrap();
        assert_eq!(from_file.iterations, 1024);

        let overridden = resolve(&args(Some(file.path()), Some(2048))).unwrap();
        assert_eq!(overridden.iterations, 2048);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(resolve(&args(None, Some(0))).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = Path::new("/definitely/not/here.json");
        assert!(resolve(&args(Some(missing), None)).is_err());
    }
}
