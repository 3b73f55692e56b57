use serde::{Deserialize, Serialize};

/// Root configuration loaded from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RootConfig {
    #[serde(default)]
    pub companion: CompanionSettings,
    #[serde(default)]
    pub sensing: SensingSettings,
    #[serde(default)]
    pub mood: MoodSettings,
}

/// Settings for the generative companion service.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CompanionSettings {
    /// Model name used for chat completions.
    pub model_name: String,
    /// Sampling temperature for replies.
    pub temperature: f64,
}

impl Default for CompanionSettings {
    fn default() -> Self {
        Self {
            model_name: "gemini-2.5-flash".to_string(),
            temperature: 0.8,
        }
    }
}

/// Timing settings for the expression sensing pipeline.
///
/// Durations are stored in seconds so they can be edited by hand in
/// `config.toml`. Tests compress them to milliseconds via
/// [`SensingSettings::warmup`] / [`SensingSettings::interval`] overrides.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SensingSettings {
    /// Delay before the first capture after the camera becomes active.
    pub warmup_secs: f64,
    /// Period between recurring captures.
    pub interval_secs: f64,
}

impl Default for SensingSettings {
    fn default() -> Self {
        Self {
            warmup_secs: 8.0,
            interval_secs: 600.0,
        }
    }
}

impl SensingSettings {
    /// Warm-up delay as a `Duration`.
    pub fn warmup(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.warmup_secs)
    }

    /// Recurring capture period as a `Duration`.
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.interval_secs)
    }
}

/// Settings for the mood ledger.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MoodSettings {
    /// Maximum number of retained mood buckets; the oldest bucket is
    /// evicted once the bound is exceeded.
    pub history_limit: usize,
}

impl Default for MoodSettings {
    fn default() -> Self {
        Self { history_limit: 100 }
    }
}

/// Secret configuration loaded from `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}
