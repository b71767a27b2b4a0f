//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kinseed/kinseed.toml`
//! 3. Local config: an explicit file passed by the caller
//! 4. Environment variables: `KINSEED_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{DEFAULT_DEPTH_OFFSET_START, DEFAULT_MAX_ROUNDS};

const ENV_PREFIX: &str = "KINSEED";

/// Settings of the coalescing stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoalesceSettings {
    /// Rounds after which more than one surviving stub is an error
    pub max_rounds: usize,
}

impl Default for CoalesceSettings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Raw coalesce settings; `None` means "not specified, inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCoalesceSettings {
    pub max_rounds: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub depth_offset_start: Option<u32>,
    pub coalesce: RawCoalesceSettings,
}

/// Unified configuration for kinseed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Depth of the topmost collected generation
    pub depth_offset_start: u32,
    pub coalesce: CoalesceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            depth_offset_start: DEFAULT_DEPTH_OFFSET_START,
            coalesce: CoalesceSettings::default(),
        }
    }
}

/// Get the XDG config directory for kinseed.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kinseed").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("kinseed.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            depth_offset_start: overlay
                .depth_offset_start
                .unwrap_or(self.depth_offset_start),
            coalesce: CoalesceSettings {
                max_rounds: overlay
                    .coalesce
                    .max_rounds
                    .unwrap_or(self.coalesce.max_rounds),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional path of a local config file; a missing file is an error
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/kinseed/kinseed.toml` (skipped if absent)
    /// 3. Local config: `local`
    /// 4. Environment variables: `KINSEED_*`, nested keys separated by `__`
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            debug!("load: local config {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        current = current.apply_env_overrides(None)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply KINSEED_* environment variables as explicit overrides.
    ///
    /// `vars` replaces the process environment when given.
    fn apply_env_overrides(
        mut self,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            )
            .build()
            .map_err(config_err)?;

        match config.get::<u32>("depth_offset_start") {
            Ok(val) => self.depth_offset_start = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get::<usize>("coalesce.max_rounds") {
            Ok(val) => self.coalesce.max_rounds = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        Ok(self)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.coalesce.max_rounds == 0 {
            return Err(ApplicationError::Config {
                message: "coalesce.max_rounds must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# kinseed configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/kinseed/kinseed.toml
#   Local:  file passed to Settings::load
#   Env:    KINSEED_* environment variables, e.g. KINSEED_COALESCE__MAX_ROUNDS=200

# Depth assigned to the topmost collected generation
# depth_offset_start = 1

[coalesce]
# Rounds after which more than one surviving stub is reported as an error
# max_rounds = 100
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
