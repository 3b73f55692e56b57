//! Facial expression analyzer trait.

use super::camera::CameraFrame;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One structured result from the facial-analysis service.
///
/// Transient: only the emotion label reaches persistent storage (as a mood
/// bucket); the suggestion surfaces once as a synthetic companion message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionReading {
    /// Open-set emotion label, e.g. "Happy", "Stressed".
    pub emotion: String,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
    /// Short wellbeing suggestion produced alongside the label.
    pub suggestion: String,
}

/// An abstract facial-analysis service.
#[async_trait]
pub trait FacialAnalyzer: Send + Sync {
    /// Classifies the emotional state visible in a still frame.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reading))`: Well-formed analysis result
    /// - `Ok(None)`: The service answered but the payload was unparsable or
    ///   incomplete; the caller discards the cycle silently
    /// - `Err(_)`: Transport-level failure; equally discarded by the caller
    async fn analyze(&self, frame: &CameraFrame) -> Result<Option<EmotionReading>>;
}
