//! Unified path management for solace configuration and data files.
//!
//! All configuration, secrets, and profile documents live under the platform
//! config/data directories resolved via the `dirs` crate, ensuring
//! consistency across Linux, macOS, and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for solace.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/solace/            # Config directory
/// ├── config.toml              # Application configuration
/// ├── secret.json              # API keys
/// └── users.json               # Registered identities
///
/// ~/.local/share/solace/       # Data directory
/// └── profiles/                # One JSON document per user
///     └── <user_id>.json
/// ```
pub struct SolacePaths;

impl SolacePaths {
    /// Returns the solace configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/solace/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("solace"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the solace data directory.
    ///
    /// This is where larger files (per-user profile documents) are stored.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("solace"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the registered-users file.
    pub fn users_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("users.json"))
    }

    /// Returns the path to the per-user profile documents directory.
    pub fn profiles_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("profiles"))
    }
}
