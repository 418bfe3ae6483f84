use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

use super::schema::Settings;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("search.threshold must be within [0, 1], got {0}")]
    Threshold(f64),
    #[error("cache.recent_paths must be >= 1")]
    RecentPaths,
}

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `CADENZA__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENZA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let threshold = self.search.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ValidationError::Threshold(threshold));
        }
        if self.cache.recent_paths == 0 {
            return Err(ValidationError::RecentPaths);
        }
        Ok(())
    }

    /// Render the settings as TOML, in the same shape `load` reads.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// The cache file to use: explicit setting first, then the default location.
    pub fn cache_path(&self) -> Option<PathBuf> {
        self.cache.path.clone().or_else(resolve_cache_path)
    }
}

/// Resolve the config path from `CADENZA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENZA_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cadenza/config.toml`
/// or `~/.config/cadenza/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("cadenza").join("config.toml"))
}

/// Resolve the cache file from `CADENZA_CACHE_PATH` or XDG defaults.
pub fn resolve_cache_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENZA_CACHE_PATH") {
        return Some(PathBuf::from(p));
    }
    default_cache_path()
}

/// `$XDG_CACHE_HOME/cadenza/state.json`, or `~/.cache/cadenza/state.json`.
pub fn default_cache_path() -> Option<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache").map(|d| d.join("cadenza").join("state.json"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
