//! Session-scoped application context.
//!
//! Replaces ad-hoc global session state with one explicit object: built when
//! an identity resolves (login/registration), passed to whatever drives the
//! session, and torn down on sign-out. Teardown is the single exit boundary
//! and always releases the sensing pipeline's camera.

use crate::conversation::ConversationService;
use crate::mood_ledger::MoodLedger;
use crate::sensing::{spawn_observers, SensingPipeline, SensingState};
use solace_core::companion::CompanionResponder;
use solace_core::config::RootConfig;
use solace_core::error::Result;
use solace_core::identity::UserIdentity;
use solace_core::insights::MoodInsights;
use solace_core::profile::ProfileRepository;
use solace_core::sensing::{CameraDevice, FacialAnalyzer};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Everything one signed-in session needs, wired once.
pub struct AppContext {
    identity: UserIdentity,
    profiles: Arc<dyn ProfileRepository>,
    conversation: Arc<ConversationService>,
    ledger: Arc<MoodLedger>,
    config: RootConfig,
    pipeline: Option<Arc<SensingPipeline>>,
    observer: Option<JoinHandle<()>>,
}

impl AppContext {
    /// Builds a context for a freshly resolved identity.
    pub fn new(
        identity: UserIdentity,
        profiles: Arc<dyn ProfileRepository>,
        responder: Arc<dyn CompanionResponder>,
        config: RootConfig,
    ) -> Self {
        let conversation = Arc::new(ConversationService::new(
            identity.id.clone(),
            profiles.clone(),
            responder,
        ));
        let ledger = Arc::new(
            MoodLedger::new(profiles.clone()).with_history_limit(config.mood.history_limit),
        );
        Self {
            identity,
            profiles,
            conversation,
            ledger,
            config,
            pipeline: None,
            observer: None,
        }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn conversation(&self) -> &Arc<ConversationService> {
        &self.conversation
    }

    pub fn ledger(&self) -> &Arc<MoodLedger> {
        &self.ledger
    }

    /// Starts the sensing pipeline and wires its readings to the ledger and
    /// the transcript.
    ///
    /// # Returns
    ///
    /// `true` when the camera was acquired and sensing is running; `false`
    /// when it was denied (sensing stays off for this session).
    pub async fn start_sensing(
        &mut self,
        camera: Arc<dyn CameraDevice>,
        analyzer: Arc<dyn FacialAnalyzer>,
    ) -> bool {
        let pipeline = Arc::new(SensingPipeline::new(
            camera,
            analyzer,
            self.config.sensing.clone(),
        ));
        let started = match pipeline.start().await {
            Some(readings) => {
                self.observer = Some(spawn_observers(
                    readings,
                    self.identity.id.clone(),
                    self.ledger.clone(),
                    self.conversation.clone(),
                ));
                true
            }
            None => false,
        };
        self.pipeline = Some(pipeline);
        started
    }

    /// Whether the sensing pipeline currently holds the camera.
    pub fn sensing_active(&self) -> bool {
        self.pipeline.as_ref().is_some_and(|p| {
            matches!(p.state(), SensingState::Active | SensingState::Capturing)
        })
    }

    /// Derives dashboard statistics for the signed-in user.
    pub async fn insights(&self) -> MoodInsights {
        self.ledger.insights(&self.identity.id).await
    }

    /// Clears the user's record back to the empty-facets shape. The
    /// identity itself is untouched.
    pub async fn reset_profile(&self) -> Result<()> {
        self.profiles.reset(&self.identity.id).await
    }

    /// Tears the session down.
    ///
    /// Runs on every exit path (sign-out, navigation away, error) and is
    /// idempotent: the pipeline releases its camera exactly once, and the
    /// observer drains any reading already in flight before finishing.
    pub async fn teardown(&mut self) {
        if let Some(pipeline) = &self.pipeline {
            pipeline.shutdown().await;
        }
        if let Some(observer) = self.observer.take() {
            let _ = observer.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solace_core::profile::Message;
    use solace_core::sensing::{CameraFrame, EmotionReading};
    use solace_core::SolaceError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use solace_infrastructure::JsonProfileRepository;
    use tempfile::TempDir;

    struct EchoResponder;

    #[async_trait]
    impl CompanionResponder for EchoResponder {
        async fn reply(&self, _history: &[Message], user_input: &str) -> Result<String> {
            Ok(format!("echo: {}", user_input))
        }
    }

    struct MockCamera {
        deny: bool,
        acquired: AtomicBool,
        releases: AtomicUsize,
    }

    impl MockCamera {
        fn new(deny: bool) -> Self {
            Self {
                deny,
                acquired: AtomicBool::new(false),
                releases: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CameraDevice for MockCamera {
        async fn acquire(&self) -> Result<()> {
            if self.deny {
                return Err(SolaceError::camera("permission denied"));
            }
            self.acquired.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn capture_frame(&self) -> Result<CameraFrame> {
            Ok(CameraFrame::jpeg(vec![1, 2, 3]))
        }

        async fn release(&self) {
            if self.acquired.swap(false, Ordering::SeqCst) {
                self.releases.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    struct SilentAnalyzer;

    #[async_trait]
    impl FacialAnalyzer for SilentAnalyzer {
        async fn analyze(&self, _frame: &CameraFrame) -> Result<Option<EmotionReading>> {
            Ok(None)
        }
    }

    fn identity() -> UserIdentity {
        UserIdentity {
            id: "usr_1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    async fn context(dir: &TempDir) -> AppContext {
        let repo = Arc::new(JsonProfileRepository::new(dir.path()).await.unwrap());
        AppContext::new(
            identity(),
            repo,
            Arc::new(EchoResponder),
            RootConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_sensing_lifecycle_through_context() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir).await;
        let camera = Arc::new(MockCamera::new(false));

        assert!(!ctx.sensing_active());
        assert!(ctx.start_sensing(camera.clone(), Arc::new(SilentAnalyzer)).await);
        assert!(ctx.sensing_active());

        ctx.teardown().await;
        ctx.teardown().await;
        assert!(!ctx.sensing_active());
        assert_eq!(camera.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_denied_camera_leaves_sensing_off() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir).await;
        let camera = Arc::new(MockCamera::new(true));

        assert!(!ctx.start_sensing(camera, Arc::new(SilentAnalyzer)).await);
        assert!(!ctx.sensing_active());
        ctx.teardown().await;
    }

    #[tokio::test]
    async fn test_reset_clears_profile() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir).await;

        ctx.conversation().ensure_welcome().await.unwrap();
        assert_eq!(ctx.conversation().transcript().await.len(), 1);

        ctx.reset_profile().await.unwrap();
        assert!(ctx.conversation().transcript().await.is_empty());
        assert_eq!(ctx.insights().await.total, 0);
    }
}
