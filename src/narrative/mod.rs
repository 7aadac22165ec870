//! Generated compatibility readings.
//!
//! A reading is never required: whatever goes wrong, [`narrate`] hands back
//! the canned [`FALLBACK_NARRATIVE`]. There is no retry.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{parse_reply, strip_code_fences, ChatCompletionClient, NarrativeProvider};
pub use error::NarrativeError;
pub use prompt::build_prompt;

use serde::Serialize;

use crate::config::NarrativeConfig;
use crate::features::FaceRecord;
use crate::scoring::CompatibilityResult;

/// Environment variable for the chat-completion API key
pub const ENV_API_KEY_VAR: &str = "FATE_SYNC_API_KEY";

pub const FALLBACK_NARRATIVE: &str = "The stars have aligned to bring you two together! \
Your energies complement each other in wonderful ways, creating a natural harmony that's \
both exciting and comforting. There's a spark between you that promises many shared laughs \
and meaningful moments.\n\n\
Your connection shows the beautiful balance of similarities and differences that make \
relationships thrive. Where one leads, the other supports, creating a dance of mutual \
understanding and growth.\n\n\
Embrace this cosmic connection and see where the journey takes you!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub text: String,
    pub source: NarrativeSource,
}

impl Narrative {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_NARRATIVE.to_string(),
            source: NarrativeSource::Fallback,
        }
    }
}

/// Read an API key from `var`.
/// Returns None if the variable is unset or blank.
pub fn api_key_from_env(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Build a client for the configured service, if an API key is available.
pub fn client_from_config(config: &NarrativeConfig) -> Result<ChatCompletionClient, NarrativeError> {
    let api_key = api_key_from_env(&config.api_key_env)
        .ok_or_else(|| NarrativeError::MissingApiKey(config.api_key_env.clone()))?;
    ChatCompletionClient::new(config, api_key)
}

/// Ask `provider` for a reading of `result`, falling back to the canned
/// text on any failure.
pub async fn narrate<P: NarrativeProvider>(
    provider: &P,
    result: &CompatibilityResult,
    faces: &[&FaceRecord],
    language: &str,
) -> Narrative {
    let prompt = build_prompt(result, faces, language);
    match provider.generate(&prompt).await {
        Ok(text) => Narrative {
            text,
            source: NarrativeSource::Generated,
        },
        Err(e) => {
            tracing::warn!(error = %e, "narrative unavailable, using fallback");
            Narrative::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FacialFeatureSet;
    use crate::scoring::score;
    use std::sync::Mutex;

    struct StubProvider {
        reply: Result<&'static str, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(reply: Result<&'static str, ()>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl NarrativeProvider for StubProvider {
        async fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(NarrativeError::Timeout),
            }
        }
    }

    fn sample_result() -> CompatibilityResult {
        let face = FacialFeatureSet::from_box(150, 220);
        score(&face, &face)
    }

    #[tokio::test]
    async fn test_narrate_uses_generated_text() {
        let provider = StubProvider::new(Ok("You two sparkle."));
        let result = sample_result();
        let narrative = narrate(&provider, &result, &[], "en").await;
        assert_eq!(narrative.source, NarrativeSource::Generated);
        assert_eq!(narrative.text, "You two sparkle.");

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(&result.label));
    }

    #[tokio::test]
    async fn test_narrate_falls_back_without_retry() {
        let provider = StubProvider::new(Err(()));
        let narrative = narrate(&provider, &sample_result(), &[], "en").await;
        assert_eq!(narrative, Narrative::fallback());
        assert_eq!(provider.prompts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_api_key() {
        let config = NarrativeConfig {
            api_key_env: "FATE_SYNC_TEST_UNSET_KEY_VAR".to_string(),
            ..NarrativeConfig::default()
        };
        assert!(matches!(
            client_from_config(&config),
            Err(NarrativeError::MissingApiKey(var)) if var == "FATE_SYNC_TEST_UNSET_KEY_VAR"
        ));
    }

    #[test]
    fn test_api_key_from_env_unset() {
        assert_eq!(api_key_from_env("FATE_SYNC_TEST_UNSET_KEY_VAR"), None);
    }

    #[test]
    fn test_narrative_source_serializes_lowercase() {
        let json = serde_json::to_string(&Narrative::fallback()).unwrap();
        assert!(json.contains("\"source\":\"fallback\""));
    }
}
