//! User identity domain.
//!
//! Identity resolution is a collaborator of the companion core: it supplies a
//! `{id, name, email}` identity at sign-in and nothing else. Password handling
//! stays behind the [`IdentityService`] trait.

mod model;
mod service;

pub use model::UserIdentity;
pub use service::IdentityService;
