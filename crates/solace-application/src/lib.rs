pub mod context;
pub mod conversation;
pub mod mood_ledger;
pub mod sensing;

pub use context::AppContext;
pub use conversation::ConversationService;
pub use mood_ledger::MoodLedger;
pub use sensing::{spawn_observers, SensingPipeline, SensingState};
