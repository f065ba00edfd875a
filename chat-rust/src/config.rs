use crate::{openai::ChatCompletionMessageParam, ChatError, ChatResult};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.llm7.io/v1";
/// llm7 accepts anonymous requests; a free token from https://token.llm7.io/
/// raises the rate limit.
pub const DEFAULT_API_KEY: &str = "unused";
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
pub const DEFAULT_PROMPT: &str = "Tell me a short story about a brave squirrel.";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const BASE_URL_VAR: &str = "LLM_CHAT_BASE_URL";
pub const API_KEY_VAR: &str = "LLM_CHAT_API_KEY";
pub const MODEL_VAR: &str = "LLM_CHAT_MODEL";
pub const PROMPT_VAR: &str = "LLM_CHAT_PROMPT";
pub const TIMEOUT_VAR: &str = "LLM_CHAT_TIMEOUT_SECS";
pub const SYSTEM_PROMPT_VAR: &str = "LLM_CHAT_SYSTEM_PROMPT";

// Names used by the game server's LLM client. Read when the `LLM_CHAT_*`
// counterpart is unset.
pub const LEGACY_BASE_URL_VAR: &str = "LLM_API_ENDPOINT";
pub const LEGACY_API_KEY_VAR: &str = "LLM_API_KEY";
pub const LEGACY_MODEL_VAR: &str = "LLM_MODEL_NAME";

/// Everything needed to issue the one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub base_url: String,
    /// Opaque; sent as a bearer token.
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    /// Sent ahead of the prompt when set.
    pub system_prompt: Option<String>,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            system_prompt: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ChatConfig {
    /// Defaults, overridden by any `LLM_CHAT_*` variables (or their
    /// `LLM_API_ENDPOINT` / `LLM_API_KEY` / `LLM_MODEL_NAME` fallbacks) in the
    /// process environment or a `.env` file.
    pub fn from_env() -> ChatResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ChatConfig::from_env`], reading variables through `lookup`.
    /// Unset and empty values keep the default.
    pub fn from_lookup<F>(lookup: F) -> ChatResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or_legacy = |key: &str, legacy: &str| get(key).or_else(|| get(legacy));
        let defaults = Self::default();

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => defaults.timeout,
        };

        let config = Self {
            base_url: get_or_legacy(BASE_URL_VAR, LEGACY_BASE_URL_VAR)
                .unwrap_or(defaults.base_url),
            api_key: get_or_legacy(API_KEY_VAR, LEGACY_API_KEY_VAR).unwrap_or(defaults.api_key),
            model: get_or_legacy(MODEL_VAR, LEGACY_MODEL_VAR).unwrap_or(defaults.model),
            prompt: get(PROMPT_VAR).unwrap_or(defaults.prompt),
            system_prompt: get(SYSTEM_PROMPT_VAR),
            timeout,
        };

        tracing::debug!(
            base_url = %config.base_url,
            model = %config.model,
            system_prompt = config.system_prompt.is_some(),
            timeout_secs = config.timeout.as_secs(),
            "loaded chat config"
        );

        Ok(config)
    }

    /// The conversation to send: the optional system message, then the
    /// prompt as the only user message.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatCompletionMessageParam> {
        self.system_prompt
            .iter()
            .map(ChatCompletionMessageParam::system)
            .chain(std::iter::once(ChatCompletionMessageParam::user(
                self.prompt.as_str(),
            )))
            .collect()
    }

    pub(crate) fn validate(&self) -> ChatResult<()> {
        if self.model.trim().is_empty() {
            return Err(ChatError::InvalidInput("model must not be empty".to_string()));
        }
        if self.prompt.trim().is_empty() {
            return Err(ChatError::InvalidInput("prompt must not be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> ChatResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ChatError::InvalidInput(format!(
            "{TIMEOUT_VAR} must be greater than zero"
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(error) => Err(ChatError::InvalidInput(format!(
            "{TIMEOUT_VAR} must be a number of seconds, got '{raw}': {error}"
        ))),
    }
}
