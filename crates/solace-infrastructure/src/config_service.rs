//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` under the solace config
//! directory, falling back to defaults when the file is missing or
//! unreadable.

use crate::paths::SolacePaths;
use solace_core::config::RootConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_file: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading from the default `config.toml`
    /// location. Configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            config_file: SolacePaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading from an explicit path.
    pub fn with_path(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: Some(config_file.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing or unparsable file yields `RootConfig::default()`.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_default();

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config(&self) -> Option<RootConfig> {
        let path = self.config_file.as_ref()?;
        let raw = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Failed to parse config.toml, using defaults: {}", e);
                None
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let config = service.get_config();
        assert_eq!(config.mood.history_limit, 100);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[mood]
history_limit = 10

[companion]
model_name = "gemini-2.5-pro"
temperature = 0.3
"#,
        )
        .unwrap();

        let service = ConfigService::with_path(&path);
        let config = service.get_config();
        assert_eq!(config.mood.history_limit, 10);
        assert_eq!(config.companion.model_name, "gemini-2.5-pro");
        // Untouched section keeps defaults.
        assert_eq!(config.sensing.warmup_secs, 8.0);
    }

    #[test]
    fn test_cache_and_invalidate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[mood]\nhistory_limit = 5\n").unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().mood.history_limit, 5);

        std::fs::write(&path, "[mood]\nhistory_limit = 7\n").unwrap();
        // Cached value until invalidated.
        assert_eq!(service.get_config().mood.history_limit, 5);
        service.invalidate_cache();
        assert_eq!(service.get_config().mood.history_limit, 7);
    }
}
