pub mod companion_agent;
pub mod facial_analyzer;
mod gemini;

pub use companion_agent::GeminiCompanionAgent;
pub use facial_analyzer::GeminiFacialAnalyzer;
