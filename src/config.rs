use std::fmt;

use crate::debugger::DebugLevel;
use crate::storage::btree::errors::BuildError;

pub const DEFAULT_MAX_KEYS_PER_LEAF: usize = 3;
pub const DEFAULT_MAX_KEYS_PER_INTERNAL: usize = 2;
pub const DEFAULT_ROWS_PER_PAGE: usize = 4;
pub const DEFAULT_DATASET: &str = "publisher";

/// Environment variable holding the initial debug level.
pub const LOG_ENV: &str = "ARBOR_LOG";

/// Shape parameters for one tree build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BTreeConfig {
    /// Maximum records per leaf (oversized duplicate runs excepted).
    pub max_keys_per_leaf: usize,
    /// Maximum separator keys per internal node.
    pub max_keys_per_internal: usize,
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            max_keys_per_leaf: DEFAULT_MAX_KEYS_PER_LEAF,
            max_keys_per_internal: DEFAULT_MAX_KEYS_PER_INTERNAL,
        }
    }
}

impl BTreeConfig {
    pub fn new(max_keys_per_leaf: usize, max_keys_per_internal: usize) -> Self {
        Self {
            max_keys_per_leaf,
            max_keys_per_internal,
        }
    }

    /// Saturates; [`BTreeConfig::validate`] rejects the saturating case.
    #[inline]
    pub fn max_children_per_internal(&self) -> usize {
        self.max_keys_per_internal.saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_keys_per_leaf < 1 {
            return Err(BuildError::Configuration {
                reason: format!(
                    "max_keys_per_leaf must be at least 1, got {}",
                    self.max_keys_per_leaf
                ),
            });
        }

        if self.max_keys_per_internal < 1 {
            return Err(BuildError::Configuration {
                reason: format!(
                    "max_keys_per_internal must be at least 1, got {}",
                    self.max_keys_per_internal
                ),
            });
        }

        if self.max_keys_per_internal.checked_add(1).is_none() {
            return Err(BuildError::Configuration {
                reason: format!(
                    "max_keys_per_internal must be below {}, got {}",
                    usize::MAX,
                    self.max_keys_per_internal
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownFlag { flag: String },
    InvalidValue { flag: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownFlag { flag } => write!(f, "unknown flag '{flag}'"),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "invalid value '{value}' for {flag}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Start-up settings of the visualizer binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tree: BTreeConfig,
    pub debug: DebugLevel,
    pub dataset: String,
    pub rows_per_page: usize,
    pub color: bool,
    /// Commands to run non-interactively, separated by `;`.
    pub exec: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree: BTreeConfig::default(),
            debug: DebugLevel::Off,
            dataset: DEFAULT_DATASET.to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            color: true,
            exec: None,
        }
    }
}

impl Settings {
    /// Reads `ARBOR_LOG`, then applies command-line flags on top.
    pub fn load<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let env_level = std::env::var(LOG_ENV).ok();
        Self::from_sources(env_level.as_deref(), args)
    }

    pub fn from_sources<I>(env_level: Option<&str>, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut settings = Settings::default();

        if let Some(level) = env_level {
            settings.debug = level.parse().map_err(|_| ConfigError::InvalidValue {
                flag: LOG_ENV.to_string(),
                value: level.to_string(),
            })?;
        }

        for arg in args {
            settings.apply_flag(&arg)?;
        }

        Ok(settings)
    }

    fn apply_flag(&mut self, arg: &str) -> Result<(), ConfigError> {
        if arg == "--no-color" {
            self.color = false;
            return Ok(());
        }

        let (flag, value) = arg.split_once('=').ok_or_else(|| ConfigError::UnknownFlag {
            flag: arg.to_string(),
        })?;

        let invalid = || ConfigError::InvalidValue {
            flag: flag.to_string(),
            value: value.to_string(),
        };

        match flag {
            "--debug" => self.debug = value.parse().map_err(|_| invalid())?,
            "--dataset" => self.dataset = value.to_string(),
            "--leaf" => self.tree.max_keys_per_leaf = value.parse().map_err(|_| invalid())?,
            "--internal" => {
                self.tree.max_keys_per_internal = value.parse().map_err(|_| invalid())?
            }
            "--rows-per-page" => self.rows_per_page = value.parse().map_err(|_| invalid())?,
            "--exec" => self.exec = Some(value.to_string()),
            _ => {
                return Err(ConfigError::UnknownFlag {
                    flag: flag.to_string(),
                });
            }
        }

        Ok(())
    }
}
