//! Configuration file format.
//!
//! A TOML file with `[test]`, `[source]` and `[output]` sections. Every
//! section and field is optional; missing values take the defaults of
//! the canonical test (five digits, truncation, strict criterion) run
//! over the built-in sample.

use crate::analysis::PokerTest;
use crate::source::{FileSource, LiteralSource, NumberSource, RandomSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("random source needs a count of at least 1")]
    ZeroCount,
    #[error("file source needs a path")]
    MissingPath,
    #[error("continuous interval must be at least 1 ms")]
    ZeroInterval,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub test: PokerTest,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where numbers come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The built-in 30-value classroom sample.
    #[default]
    Sample,
    /// ChaCha20 uniform values.
    Random,
    /// A text file of numbers.
    File,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Sample => f.write_str("sample"),
            SourceKind::Random => f.write_str("random"),
            SourceKind::File => f.write_str("file"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sample" => Ok(SourceKind::Sample),
            "random" => Ok(SourceKind::Random),
            "file" => Ok(SourceKind::File),
            other => Err(format!("unknown source '{}' (expected sample, random or file)", other)),
        }
    }
}

/// Number source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Values per batch for the random source.
    pub count: usize,
    /// Seed for the random source; OS entropy if absent.
    pub seed: Option<u64>,
    /// Input file for the file source.
    pub path: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Sample,
            count: 1000,
            seed: None,
            path: None,
        }
    }
}

impl SourceConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            SourceKind::Random if self.count == 0 => Err(ConfigError::ZeroCount),
            SourceKind::File if self.path.is_none() => Err(ConfigError::MissingPath),
            _ => Ok(()),
        }
    }

    /// Builds the configured source.
    pub fn build(&self) -> Result<Box<dyn NumberSource>, ConfigError> {
        self.validate()?;

        let source: Box<dyn NumberSource> = match self.kind {
            SourceKind::Sample => Box::new(LiteralSource::class_sample()),
            SourceKind::Random => match self.seed {
                Some(seed) => Box::new(RandomSource::from_seed(seed, self.count)),
                None => Box::new(RandomSource::from_os_entropy(self.count)),
            },
            SourceKind::File => {
                let path = self.path.as_ref().ok_or(ConfigError::MissingPath)?;
                Box::new(FileSource::new(path))
            }
        };

        tracing::debug!(source = %source.describe(), "Built number source");
        Ok(source)
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text tables.
    #[default]
    Table,
    /// One JSON document per run.
    Json,
    /// Prometheus text exposition of the run metrics.
    Prometheus,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "prometheus" => Ok(OutputFormat::Prometheus),
            other => Err(format!(
                "unknown format '{}' (expected table, json or prometheus)",
                other
            )),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Also print the per-value classification table.
    pub records: bool,
    /// Pause between runs in continuous mode.
    pub interval_ms: u64,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            records: false,
            interval_ms: 1000,
            metrics_port: 0,
        }
    }
}

impl OutputConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.source.validate()?;
        config.output.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PassCriterion;
    use crate::classify::{DigitLength, ExtractionPolicy};

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.source.validate().is_ok());
        assert!(config.output.validate().is_ok());
        assert_eq!(config.test.digit_length, DigitLength::Five);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.test, PokerTest::default());
        assert_eq!(config.source.kind, SourceKind::Sample);
    }

    #[test]
    fn test_full_file() {
        let config = FileConfig::from_toml(
            r#"
            [test]
            digit_length = 4
            extraction = "round"
            criterion = "inclusive"

            [source]
            kind = "random"
            count = 500
            seed = 9

            [output]
            format = "json"
            records = true
            metrics_port = 9191
            "#,
        )
        .unwrap();

        assert_eq!(config.test.digit_length, DigitLength::Four);
        assert_eq!(config.test.extraction, ExtractionPolicy::Round);
        assert_eq!(config.test.criterion, PassCriterion::Inclusive);
        assert_eq!(config.source.kind, SourceKind::Random);
        assert_eq!(config.source.count, 500);
        assert_eq!(config.source.seed, Some(9));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.records);
        assert_eq!(config.output.metrics_port, 9191);
        assert_eq!(config.output.interval_ms, 1000);
    }

    #[test]
    fn test_bad_digit_length_rejected() {
        assert!(matches!(
            FileConfig::from_toml("[test]\ndigit_length = 6\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_file_source_needs_path() {
        assert!(matches!(
            FileConfig::from_toml("[source]\nkind = \"file\"\n"),
            Err(ConfigError::MissingPath)
        ));
    }

    #[test]
    fn test_zero_count_invalid() {
        let config = SourceConfig {
            kind: SourceKind::Random,
            count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCount)));
    }

    #[test]
    fn test_build_seeded_source() {
        let config = SourceConfig {
            kind: SourceKind::Random,
            count: 3,
            seed: Some(1),
            path: None,
        };
        let mut source = config.build().unwrap();
        assert_eq!(source.next_batch().unwrap().len(), 3);
    }
}
