//! UserIdentity domain model.

use serde::{Deserialize, Serialize};

/// A resolved user identity.
///
/// Created once at registration and immutable thereafter. The identity never
/// carries credentials; those stay inside the identity service's own storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Unique user identifier (`usr_` prefixed)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, unique across all users
    pub email: String,
}
