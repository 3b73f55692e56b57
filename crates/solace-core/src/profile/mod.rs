//! Per-user profile domain.
//!
//! A profile is the single document persisted per user. It is split into
//! four facets (messages, journal, settings, mood history) that are each
//! replaced wholesale by facet-scoped writes; see [`ProfileRepository`] for
//! the consistency contract.

mod message;
mod model;
mod mood;
mod repository;

pub use message::{Message, MessageRole};
pub use model::{AppearanceSettings, JournalEntry, UserRecord};
pub use mood::{merge_observation, MoodBucket, DEFAULT_HISTORY_LIMIT};
pub use repository::ProfileRepository;
