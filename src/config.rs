//! Showcase configuration, read from a RON file.
//!
//! Lookup order: first CLI argument, then `SIA_ORBIT_CONFIG`, else defaults.
//!
//! ```ron
//! (
//!     compact: false,
//!     dark_mode: true,
//!     initial_selection: Some(20),
//!     auto_advance: Some((interval_secs: 8.0, pause_after_click_secs: 20.0)),
//!     catalog: Some("agents.ron"),
//!     window_size: (1280.0, 800.0),
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::orbit::ItemId;

pub const CONFIG_ENV: &str = "SIA_ORBIT_CONFIG";

/// Shortest accepted auto-advance interval, in seconds.
pub const MIN_ADVANCE_INTERVAL_SECS: f32 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Host-page timer that moves the selection to the next product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoAdvanceConfig {
    pub interval_secs: f32,
    /// How long a user click suspends auto-advance
    #[serde(default = "default_pause_after_click")]
    pub pause_after_click_secs: f32,
}

fn default_pause_after_click() -> f32 {
    15.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Use the small ring preset
    pub compact: bool,
    pub dark_mode: bool,
    /// Product selected on start-up; the first product when unset or unknown
    pub initial_selection: Option<ItemId>,
    pub auto_advance: Option<AutoAdvanceConfig>,
    /// RON product list replacing the built-in catalog
    pub catalog: Option<PathBuf>,
    pub window_size: (f32, f32),
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            compact: false,
            dark_mode: false,
            initial_selection: None,
            auto_advance: None,
            catalog: None,
            window_size: (1280.0, 800.0),
        }
    }
}

impl ShowcaseConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text)?;
        // Catalog paths are relative to the config file.
        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }
        log::info!("config: loaded {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(auto) = &self.auto_advance {
            if !(auto.interval_secs.is_finite() && auto.interval_secs >= MIN_ADVANCE_INTERVAL_SECS) {
                return Err(ConfigError::Invalid(format!(
                    "auto_advance.interval_secs must be at least {}, got {}",
                    MIN_ADVANCE_INTERVAL_SECS, auto.interval_secs
                )));
            }
            if !(auto.pause_after_click_secs.is_finite() && auto.pause_after_click_secs >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "auto_advance.pause_after_click_secs must not be negative, got {}",
                    auto.pause_after_click_secs
                )));
            }
        }
        let (w, h) = self.window_size;
        if !(w >= 320.0 && h >= 240.0) {
            return Err(ConfigError::Invalid(format!(
                "window_size must be at least 320x240, got {}x{}",
                w, h
            )));
        }
        Ok(())
    }

    /// Pick the config path: explicit argument wins over the environment.
    pub fn resolve_path(arg: Option<String>, env: Option<String>) -> Option<PathBuf> {
        arg.or(env)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Load from the CLI argument or `SIA_ORBIT_CONFIG`, defaulting when
    /// neither is set.
    pub fn from_env_and_args() -> Result<Self, ConfigError> {
        let path = Self::resolve_path(std::env::args().nth(1), std::env::var(CONFIG_ENV).ok());
        match path {
            Some(path) => Self::load(&path),
            None => {
                log::info!("config: no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}
