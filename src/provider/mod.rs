//! Provider adapters: one fixed wire mapping per supported LLM vendor.
//!
//! Supported providers:
//! - OpenAI: /v1/chat/completions (Bearer auth)
//! - DeepSeek: OpenAI-compatible chat completions with `stream: false`
//! - Anthropic: /v1/messages (x-api-key + anthropic-version)
//! - Google Gemini: models/{model}:generateContent (key in query string)
//! - OpenRouter: OpenAI-compatible chat completions, model is mandatory

mod anthropic;
pub mod errors;
mod gemini;
mod openai;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::ChatCompletionsAdapter;

/// Sampling temperature used for every provider.
pub const TEMPERATURE: f64 = 0.6;

/// Output token ceiling used for every provider.
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// The closed set of providers the refiner can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    DeepSeek,
    Anthropic,
    Google,
    OpenRouter,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::DeepSeek,
        Provider::Anthropic,
        Provider::Google,
        Provider::OpenRouter,
    ];

    /// Identifier as stored in settings.
    pub fn id(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::DeepSeek => "deepseek",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::OpenRouter => "openrouter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A provider identifier outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.id() == value.trim())
            .ok_or_else(|| UnknownProvider(value.to_string()))
    }
}

/// Mapping between the canonical refinement call and one provider's wire format.
pub trait ProviderAdapter: Send + Sync {
    /// Model used when the user has not configured one. `None` means a model
    /// must be supplied.
    fn default_model(&self) -> Option<&'static str>;

    /// Full request URL for a model and key.
    fn endpoint(&self, model: &str, api_key: &str) -> String;

    /// Authentication and provider-specific headers.
    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)>;

    /// JSON request body.
    fn build_body(&self, system_instruction: &str, user_text: &str, model: &str) -> Value;

    /// Generated text from a successful response, if the expected field exists.
    fn extract_text(&self, response: &Value) -> Option<String>;

    /// Human-readable detail from an error response body.
    fn extract_error_message(&self, response: &Value, status: u16) -> String;
}

static OPENAI: ChatCompletionsAdapter = ChatCompletionsAdapter::openai();
static DEEPSEEK: ChatCompletionsAdapter = ChatCompletionsAdapter::deepseek();
static OPENROUTER: ChatCompletionsAdapter = ChatCompletionsAdapter::openrouter();
static ANTHROPIC: AnthropicAdapter = AnthropicAdapter;
static GEMINI: GeminiAdapter = GeminiAdapter;

/// Adapter for a provider.
pub fn adapter_for(provider: Provider) -> &'static dyn ProviderAdapter {
    match provider {
        Provider::OpenAi => &OPENAI,
        Provider::DeepSeek => &DEEPSEEK,
        Provider::Anthropic => &ANTHROPIC,
        Provider::Google => &GEMINI,
        Provider::OpenRouter => &OPENROUTER,
    }
}

