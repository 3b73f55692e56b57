//! Camera device trait.

use crate::error::Result;
use async_trait::async_trait;

/// A single encoded still frame taken from the camera.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl CameraFrame {
    /// Wraps already-encoded JPEG bytes.
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "image/jpeg".to_string(),
        }
    }
}

/// An abstract camera resource with single ownership per session.
///
/// The sensing pipeline acquires the device once on activation, reads frames
/// exclusively during capture cycles, and releases it exactly once on
/// teardown. Implementations back this with a real device, a still-image
/// source, or a test double.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Acquires the underlying resource.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Device ready; frames may be captured
    /// - `Err(_)`: Permission denied or device failure. The caller treats
    ///   this as permanent for the session - no retry.
    async fn acquire(&self) -> Result<()>;

    /// Captures the current frame as an encoded still image.
    async fn capture_frame(&self) -> Result<CameraFrame>;

    /// Releases the underlying resource.
    ///
    /// Must be safe to call regardless of acquisition state; release of an
    /// unacquired or already-released device is a no-op.
    async fn release(&self);
}
