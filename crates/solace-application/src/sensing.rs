//! Expression sensing pipeline.
//!
//! One pipeline per active chat session. It owns the camera resource,
//! schedules capture cycles on a warm-up one-shot followed by a recurring
//! interval, and emits readings on a channel consumed by independent
//! subscribers (mood ledger, conversation). Scheduling never preempts an
//! in-flight cycle; a cycle already running at cancellation completes and
//! its reading is still delivered.

use crate::conversation::ConversationService;
use crate::mood_ledger::MoodLedger;
use solace_core::config::SensingSettings;
use solace_core::sensing::{CameraDevice, EmotionReading, FacialAnalyzer};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Lifecycle states of the sensing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensingState {
    /// Not started, or permanently disabled after a failed acquisition.
    Idle,
    /// Camera acquisition in progress.
    Requesting,
    /// Camera held; waiting for the next timer firing.
    Active,
    /// A capture cycle is running.
    Capturing,
    /// Torn down; camera released.
    Stopped,
}

impl SensingState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => SensingState::Requesting,
            2 => SensingState::Active,
            3 => SensingState::Capturing,
            4 => SensingState::Stopped,
            _ => SensingState::Idle,
        }
    }
}

/// Shared state cell readable from both the pipeline handle and its task.
#[derive(Clone)]
struct StateCell(Arc<AtomicU8>);

impl StateCell {
    fn new(state: SensingState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    fn get(&self) -> SensingState {
        SensingState::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn set(&self, state: SensingState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

/// Periodic capture-and-analyze pipeline bound to one camera resource.
pub struct SensingPipeline {
    camera: Arc<dyn CameraDevice>,
    analyzer: Arc<dyn FacialAnalyzer>,
    settings: SensingSettings,
    state: StateCell,
    cancel: CancellationToken,
    /// Set after a failed acquisition; the pipeline stays off for the
    /// whole session.
    disabled: AtomicBool,
    released: AtomicBool,
    task: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl SensingPipeline {
    pub fn new(
        camera: Arc<dyn CameraDevice>,
        analyzer: Arc<dyn FacialAnalyzer>,
        settings: SensingSettings,
    ) -> Self {
        Self {
            camera,
            analyzer,
            settings,
            state: StateCell::new(SensingState::Idle),
            cancel: CancellationToken::new(),
            disabled: AtomicBool::new(false),
            released: AtomicBool::new(false),
            task: std::sync::Mutex::new(None),
        }
    }

    /// Current lifecycle state (drives the session's "sensing active"
    /// indicator).
    pub fn state(&self) -> SensingState {
        self.state.get()
    }

    /// Acquires the camera and starts the capture schedule.
    ///
    /// # Returns
    ///
    /// - `Some(receiver)`: Pipeline active; readings arrive on the channel
    /// - `None`: Camera denied or unavailable, or the pipeline was already
    ///   started. Denial disables sensing for the whole session - no retry.
    pub async fn start(&self) -> Option<mpsc::UnboundedReceiver<EmotionReading>> {
        if self.state.get() != SensingState::Idle
            || self.disabled.load(Ordering::SeqCst)
            || self.released.load(Ordering::SeqCst)
        {
            return None;
        }

        self.state.set(SensingState::Requesting);
        if let Err(e) = self.camera.acquire().await {
            tracing::warn!("Camera unavailable, sensing disabled for session: {}", e);
            self.disabled.store(true, Ordering::SeqCst);
            self.state.set(SensingState::Idle);
            return None;
        }
        self.state.set(SensingState::Active);

        let (tx, rx) = mpsc::unbounded_channel();
        let cycle = CaptureCycle {
            camera: self.camera.clone(),
            analyzer: self.analyzer.clone(),
            state: self.state.clone(),
            tx,
        };
        let token = self.cancel.clone();
        let warmup = self.settings.warmup();
        let period = self.settings.interval();

        let handle = tokio::spawn(async move {
            // Warm-up one-shot.
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(warmup) => {}
            }
            cycle.run().await;

            let mut ticker = tokio::time::interval(period);
            // An interval's first tick completes immediately; the warm-up
            // cycle already covered it.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = ticker.tick() => cycle.run().await,
                }
            }
        });
        *self.task.lock().unwrap() = Some(handle);

        tracing::info!(
            "Sensing pipeline active (warm-up {:?}, interval {:?})",
            warmup,
            period
        );
        Some(rx)
    }

    /// Tears the pipeline down: cancels the schedule and releases the
    /// camera.
    ///
    /// Idempotent - the camera is released exactly once no matter how many
    /// times this runs, and it is safe to call on a pipeline that never
    /// became active.
    pub async fn shutdown(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        self.cancel.cancel();
        self.camera.release().await;
        self.state.set(SensingState::Stopped);
        tracing::info!("Sensing pipeline stopped");
    }
}

impl Drop for SensingPipeline {
    fn drop(&mut self) {
        // Stop scheduling even if shutdown was never awaited.
        self.cancel.cancel();
    }
}

/// One capture-analyze-dispatch iteration, shared by both timers.
struct CaptureCycle {
    camera: Arc<dyn CameraDevice>,
    analyzer: Arc<dyn FacialAnalyzer>,
    state: StateCell,
    tx: mpsc::UnboundedSender<EmotionReading>,
}

impl CaptureCycle {
    async fn run(&self) {
        // Timer firings only capture while the resource is still held.
        if self.state.get() != SensingState::Active {
            return;
        }
        self.state.set(SensingState::Capturing);

        let result = self.capture_and_analyze().await;
        match result {
            Some(reading) => {
                tracing::debug!(
                    "Detected emotion '{}' ({:.2})",
                    reading.emotion,
                    reading.confidence
                );
                let _ = self.tx.send(reading);
            }
            None => tracing::debug!("Capture cycle produced no reading"),
        }

        // Teardown may have happened mid-cycle; don't resurrect Active.
        if self.state.get() == SensingState::Capturing {
            self.state.set(SensingState::Active);
        }
    }

    async fn capture_and_analyze(&self) -> Option<EmotionReading> {
        let frame = match self.camera.capture_frame().await {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("Frame capture failed: {}", e);
                return None;
            }
        };
        match self.analyzer.analyze(&frame).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::debug!("Facial analysis failed: {}", e);
                None
            }
        }
    }
}

/// Feeds pipeline readings to the two downstream subscribers.
///
/// Each reading updates the mood ledger and injects a synthetic companion
/// message; either subscriber failing degrades only its own path. The task
/// ends when the pipeline's sender side closes.
pub fn spawn_observers(
    mut readings: mpsc::UnboundedReceiver<EmotionReading>,
    user_id: String,
    ledger: Arc<MoodLedger>,
    conversation: Arc<ConversationService>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(reading) = readings.recv().await {
            if let Err(e) = ledger.record(&user_id, &reading.emotion).await {
                tracing::warn!("Failed to record mood: {}", e);
            }
            if let Err(e) = conversation.inject_emotion_message(&reading).await {
                tracing::warn!("Failed to inject emotion message: {}", e);
            }
        }
    })
}
