//! Secret service implementation.
//!
//! This module provides a service for managing secret configuration (API
//! keys) stored in `secret.json`.

use crate::paths::SolacePaths;
use anyhow::Result;
use async_trait::async_trait;
use solace_core::config::{GeminiConfig, SecretConfig};
use solace_core::secret::SecretService;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Service for managing secret configuration.
///
/// Reads `secret.json` once and caches the result to avoid repeated file
/// I/O. When the file is missing, a template with an empty API key is
/// created (mode 600 on Unix) so the user has something to fill in.
#[derive(Clone)]
pub struct SecretServiceImpl {
    secret_file: PathBuf,
    /// Cached secret config loaded from storage.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service using the default secret file location.
    pub fn default_location() -> Result<Self> {
        let secret_file = SolacePaths::secret_file()
            .map_err(|e| anyhow::anyhow!("Failed to get secret path: {}", e))?;
        Ok(Self::new(secret_file))
    }

    /// Creates a service reading secrets from `secret_file`.
    pub fn new(secret_file: impl AsRef<Path>) -> Self {
        Self {
            secret_file: secret_file.as_ref().to_path_buf(),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Ensures the secret file exists, creating it with a template if it
    /// doesn't.
    ///
    /// # Security Note
    ///
    /// Sets file permissions to 600 (user read/write only) on Unix systems.
    pub fn ensure_secret_file(&self) -> std::io::Result<&Path> {
        if self.secret_file.exists() {
            return Ok(&self.secret_file);
        }

        if let Some(parent) = self.secret_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: Some("gemini-2.5-flash".to_string()),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&self.secret_file, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.secret_file, permissions)?;
        }

        Ok(&self.secret_file)
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig, String> {
        {
            let read_lock = self.secrets.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let raw = std::fs::read_to_string(&self.secret_file)
            .map_err(|e| format!("Failed to read secret file: {}", e))?;
        let loaded: SecretConfig = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse secret file: {}", e))?;

        {
            let mut write_lock = self.secrets.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }
}

#[async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.secret_file.exists()
    }
}
