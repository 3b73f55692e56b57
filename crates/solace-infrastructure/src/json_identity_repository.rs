//! JSON-file IdentityService implementation.
//!
//! Registered users live in a single `users.json` list. Registration assigns
//! a `usr_` prefixed id, enforces email uniqueness, and initializes the
//! user's empty profile record; login returns the identity without its
//! credential.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use solace_core::identity::{IdentityService, UserIdentity};
use solace_core::profile::{ProfileRepository, UserRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// One stored credential record. Never leaves this module; callers only see
/// [`UserIdentity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    id: String,
    name: String,
    email: String,
    password: String,
}

impl StoredUser {
    fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// File-backed identity service.
pub struct JsonIdentityRepository {
    users_file: PathBuf,
    profile_repository: Arc<dyn ProfileRepository>,
    /// Serializes register/login against the shared users file.
    write_lock: Mutex<()>,
}

impl JsonIdentityRepository {
    /// Creates an identity service at the default location
    /// (`~/.config/solace/users.json`).
    ///
    /// # Arguments
    ///
    /// * `profile_repository` - Used to initialize the empty record at registration
    pub async fn default_location(
        profile_repository: Arc<dyn ProfileRepository>,
    ) -> anyhow::Result<Self> {
        let users_file = crate::paths::SolacePaths::users_file()
            .map_err(|e| anyhow::anyhow!("Failed to get users file path: {}", e))?;
        Self::new(users_file, profile_repository).await
    }

    /// Creates an identity service storing users at `users_file`.
    pub async fn new(
        users_file: impl AsRef<Path>,
        profile_repository: Arc<dyn ProfileRepository>,
    ) -> anyhow::Result<Self> {
        let users_file = users_file.as_ref().to_path_buf();
        if let Some(parent) = users_file.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            users_file,
            profile_repository,
            write_lock: Mutex::new(()),
        })
    }

    async fn load_users(&self) -> Vec<StoredUser> {
        let raw = match fs::read_to_string(&self.users_file).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!("Unreadable users file, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    async fn save_users(&self, users: &[StoredUser]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(users)?;
        fs::write(&self.users_file, json).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityService for JsonIdentityRepository {
    async fn login(&self, email: &str, password: &str) -> Option<UserIdentity> {
        let users = self.load_users().await;
        users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(StoredUser::identity)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Option<UserIdentity> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load_users().await;
        if users.iter().any(|u| u.email == email) {
            return None;
        }

        let user = StoredUser {
            id: format!("usr_{}", uuid::Uuid::new_v4().simple()),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let identity = user.identity();
        users.push(user);

        if let Err(e) = self.save_users(&users).await {
            tracing::warn!("Failed to persist users file: {}", e);
            return None;
        }

        // Initialize the default-shaped record for the new user.
        if let Err(e) = self
            .profile_repository
            .save(&identity.id, &UserRecord::default())
            .await
        {
            tracing::warn!("Failed to initialize profile for '{}': {}", identity.id, e);
        }

        Some(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_profile_repository::JsonProfileRepository;
    use tempfile::TempDir;

    async fn service(dir: &TempDir) -> JsonIdentityRepository {
        let profiles = Arc::new(
            JsonProfileRepository::new(dir.path().join("profiles"))
                .await
                .unwrap(),
        );
        JsonIdentityRepository::new(dir.path().join("users.json"), profiles)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let temp_dir = TempDir::new().unwrap();
        let identity_service = service(&temp_dir).await;

        let registered = identity_service
            .register("Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        assert!(registered.id.starts_with("usr_"));
        assert_eq!(registered.name, "Ada");

        let logged_in = identity_service.login("ada@example.com", "pw").await;
        assert_eq!(logged_in, Some(registered));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let identity_service = service(&temp_dir).await;

        identity_service
            .register("Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        let second = identity_service
            .register("Eve", "ada@example.com", "other")
            .await;
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_is_no_identity() {
        let temp_dir = TempDir::new().unwrap();
        let identity_service = service(&temp_dir).await;

        identity_service
            .register("Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        assert!(identity_service.login("ada@example.com", "nope").await.is_none());
        assert!(identity_service.login("bob@example.com", "pw").await.is_none());
    }

    #[tokio::test]
    async fn test_registration_initializes_profile() {
        let temp_dir = TempDir::new().unwrap();
        let profiles = Arc::new(
            JsonProfileRepository::new(temp_dir.path().join("profiles"))
                .await
                .unwrap(),
        );
        let identity_service = JsonIdentityRepository::new(
            temp_dir.path().join("users.json"),
            profiles.clone(),
        )
        .await
        .unwrap();

        let identity = identity_service
            .register("Ada", "ada@example.com", "pw")
            .await
            .unwrap();

        // The document exists on disk with the default shape.
        let path = temp_dir
            .path()
            .join("profiles")
            .join(format!("{}.json", identity.id));
        assert!(path.exists());
        assert_eq!(profiles.load(&identity.id).await, UserRecord::default());
    }
}
