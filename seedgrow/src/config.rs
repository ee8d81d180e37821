//! Batch configuration
//!
//! Settings are resolved in three tiers, later tiers winning:
//! 1. TOML file (or the built-in defaults when no file is given)
//! 2. Environment variables
//! 3. CLI arguments
//!
//! ```toml
//! input_dir = "imagens_exemplo"
//! output_dir = "resultados_imagens"
//! threshold = 20
//!
//! [[images]]
//! name = "astronaut_original.png"
//! seeds = [[200, 200], [100, 100]]
//! ```

use seedgrow_region::Seed;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Threshold of the default batch
pub const DEFAULT_BATCH_THRESHOLD: u32 = 20;

/// Errors in loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for a batch
    #[error("invalid TOML: {0}")]
    Parse(String),

    /// The configuration is well-formed but unusable
    #[error("validation failed: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// One input image and the seeds to grow from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageJob {
    /// File name, relative to the input directory
    pub name: String,
    /// Seeds as `[row, col]` pairs
    pub seeds: Vec<[i64; 2]>,
}

impl ImageJob {
    /// Create a job from `(row, col)` pairs
    pub fn new(name: impl Into<String>, seeds: &[(i64, i64)]) -> Self {
        Self {
            name: name.into(),
            seeds: seeds.iter().map(|&(r, c)| [r, c]).collect(),
        }
    }

    /// Seeds in configuration order
    pub fn seeds(&self) -> impl Iterator<Item = Seed> + '_ {
        self.seeds.iter().map(|&[row, col]| Seed::new(row, col))
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

/// A complete batch: where images live, where results go, and what to grow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    pub images: Vec<ImageJob>,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("imagens_exemplo")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("resultados_imagens")
}

fn default_threshold() -> u32 {
    DEFAULT_BATCH_THRESHOLD
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            threshold: default_threshold(),
            images: vec![
                ImageJob::new("astronaut_original.png", &[(200, 200), (100, 100)]),
                ImageJob::new("horse_original.png", &[(150, 200), (50, 50)]),
                ImageJob::new("text_original.png", &[(80, 100), (20, 20)]),
            ],
        }
    }
}

impl BatchConfig {
    /// Total number of seed jobs in the batch
    pub fn job_count(&self) -> usize {
        self.images.iter().map(|img| img.seeds.len()).sum()
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub threshold: Option<u32>,
}

/// Load a batch configuration
///
/// # Arguments
///
/// * `config_path` - TOML file to read; `None` starts from [`BatchConfig::default`]
/// * `cli` - Optional CLI overrides, applied after the environment
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// resulting configuration fails [`validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli: Option<&CliOverrides>,
) -> ConfigResult<BatchConfig> {
    let mut config = match config_path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            log::debug!("loaded configuration from {}", path.display());
            toml::from_str(&content)?
        }
        None => BatchConfig::default(),
    };

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SEEDGROW_INPUT_DIR` -> `input_dir`
/// - `SEEDGROW_OUTPUT_DIR` -> `output_dir`
/// - `SEEDGROW_THRESHOLD` -> `threshold`
pub fn apply_environment_overrides(config: &mut BatchConfig) {
    apply_overrides_from(config, |key| env::var(key).ok());
}

/// Apply overrides from any key lookup (the environment in production)
fn apply_overrides_from(config: &mut BatchConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(value) = lookup("SEEDGROW_INPUT_DIR") {
        config.input_dir = PathBuf::from(value);
    }
    if let Some(value) = lookup("SEEDGROW_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(value);
    }
    if let Some(value) = lookup("SEEDGROW_THRESHOLD") {
        match value.trim().parse::<u32>() {
            Ok(threshold) => config.threshold = threshold,
            Err(_) => log::warn!("ignoring SEEDGROW_THRESHOLD={:?}: not a threshold", value),
        }
    }
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut BatchConfig, cli: &CliOverrides) {
    if let Some(dir) = &cli.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
}

/// Check that a configuration describes at least one runnable job
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] for an empty image list, an
/// image with an empty name, or an image without seeds.
pub fn validate_config(config: &BatchConfig) -> ConfigResult<()> {
    if config.images.is_empty() {
        return Err(ConfigError::Validation("no images configured".to_string()));
    }
    for (i, image) in config.images.iter().enumerate() {
        if image.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "image #{} has an empty name",
                i + 1
            )));
        }
        if image.seeds.is_empty() {
            return Err(ConfigError::Validation(format!(
                "image {} has no seeds",
                image.name
            )));
        }
    }
    Ok(())
}
