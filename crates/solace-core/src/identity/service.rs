//! Identity service trait.

use super::model::UserIdentity;
use async_trait::async_trait;

/// An abstract service resolving user identities.
///
/// Failure to authenticate or register is "no identity" (`None`), never an
/// error: a wrong password and an already-taken email both yield `None`, and
/// callers surface that however they see fit.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Authenticates a user by email and password.
    ///
    /// # Returns
    ///
    /// - `Some(UserIdentity)`: Credentials matched a registered user
    /// - `None`: Unknown email or wrong password
    async fn login(&self, email: &str, password: &str) -> Option<UserIdentity>;

    /// Registers a new user.
    ///
    /// Implementations must enforce email uniqueness and initialize the
    /// user's empty profile record.
    ///
    /// # Returns
    ///
    /// - `Some(UserIdentity)`: The freshly created identity
    /// - `None`: Email already registered
    async fn register(&self, name: &str, email: &str, password: &str) -> Option<UserIdentity>;
}
