//! Still-image camera device.
//!
//! Stands in for a live webcam on rigs without one: every capture re-reads a
//! JPEG from a fixed path, so the "camera" can be driven by whatever writes
//! that file (a capture daemon, a test fixture, a single portrait).

use async_trait::async_trait;
use solace_core::error::Result;
use solace_core::sensing::{CameraDevice, CameraFrame};
use solace_core::SolaceError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::fs;

/// Camera device backed by a JPEG file on disk.
pub struct StillImageCamera {
    image_path: PathBuf,
    acquired: AtomicBool,
}

impl StillImageCamera {
    pub fn new(image_path: impl AsRef<Path>) -> Self {
        Self {
            image_path: image_path.as_ref().to_path_buf(),
            acquired: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl CameraDevice for StillImageCamera {
    async fn acquire(&self) -> Result<()> {
        if !self.image_path.exists() {
            return Err(SolaceError::camera(format!(
                "still image not found: {}",
                self.image_path.display()
            )));
        }
        self.acquired.store(true, Ordering::SeqCst);
        tracing::info!("Still-image camera acquired: {}", self.image_path.display());
        Ok(())
    }

    async fn capture_frame(&self) -> Result<CameraFrame> {
        if !self.acquired.load(Ordering::SeqCst) {
            return Err(SolaceError::camera("device not acquired"));
        }
        let bytes = fs::read(&self.image_path)
            .await
            .map_err(|e| SolaceError::camera(format!("failed to read frame: {}", e)))?;
        Ok(CameraFrame::jpeg(bytes))
    }

    async fn release(&self) {
        if self.acquired.swap(false, Ordering::SeqCst) {
            tracing::info!("Still-image camera released");
        }
    }
}
