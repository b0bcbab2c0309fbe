use crate::extract::{PatternError, PatternSet, PatternSpec};
use crate::units::{BaseUnit, Prefix};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parameter analyzed when neither the config nor the command line names one
pub const DEFAULT_PARAMETER: &str = "static_power";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Histogram needs at least one bin")]
    InvalidBins,

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Scale every extracted value is converted to
    #[serde(default = "default_target")]
    pub target: BaseUnit,

    // Histogram bin count
    #[serde(default = "default_bins")]
    pub bins: usize,

    // label -> pattern
    #[serde(default)]
    pub patterns: BTreeMap<String, PatternSpec>,
}

fn default_target() -> BaseUnit {
    BaseUnit::from(Prefix::Pico)
}

fn default_bins() -> usize {
    15
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub params: Vec<String>,
    /// Also extract every name in [`PatternSet::common`]
    pub common: bool,
    pub target: Option<BaseUnit>,
    pub bins: Option<usize>,
}

/// Everything one run needs, fixed before any file is read
#[derive(Debug, Clone)]
pub struct Settings {
    pub target: BaseUnit,
    pub bins: usize,
    pub patterns: PatternSet,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        for (label, spec) in config.patterns.iter_mut() {
            spec.label = label.clone();
        }
        Ok(config)
    }

    pub fn empty() -> Self {
        Self {
            target: default_target(),
            bins: default_bins(),
            patterns: BTreeMap::new(),
        }
    }

    /// Apply command-line overrides and build the validated pattern table
    pub fn resolve(self, overrides: Overrides) -> Result<Settings, ConfigError> {
        let bins = overrides.bins.unwrap_or(self.bins);
        if bins == 0 {
            return Err(ConfigError::InvalidBins);
        }

        let mut patterns = self.patterns;
        if overrides.common {
            for spec in PatternSet::common().iter() {
                patterns
                    .entry(spec.label.clone())
                    .or_insert_with(|| spec.clone());
            }
        }
        for param in &overrides.params {
            patterns.insert(param.clone(), PatternSpec::parameter(param));
        }
        if patterns.is_empty() {
            log::debug!("No patterns configured, using '{}'", DEFAULT_PARAMETER);
            patterns.insert(
                DEFAULT_PARAMETER.to_string(),
                PatternSpec::parameter(DEFAULT_PARAMETER),
            );
        }

        Ok(Settings {
            target: overrides.target.unwrap_or(self.target),
            bins,
            patterns: PatternSet::new(patterns.into_values())?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::empty()
    }
}
