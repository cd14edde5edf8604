//! OpenAI-style chat completions, shared by OpenAI, DeepSeek and OpenRouter.

use super::errors::{message_from, CHAT_COMPLETIONS_STRATEGIES};
use super::{ProviderAdapter, MAX_OUTPUT_TOKENS, TEMPERATURE};
use serde_json::{json, Value};

/// Attribution headers sent to OpenRouter.
pub const OPENROUTER_REFERER: &str = "https://github.com/prompt-refiner/prompt-refiner";
pub const OPENROUTER_TITLE: &str = "Prompt Refiner";

/// Adapter for any endpoint speaking the chat completions dialect.
#[derive(Debug, Clone, Copy)]
pub struct ChatCompletionsAdapter {
    url: &'static str,
    default_model: Option<&'static str>,
    /// DeepSeek expects an explicit `stream: false`.
    explicit_stream_flag: bool,
    /// OpenRouter ranks apps by referer and title.
    attribution: bool,
}

impl ChatCompletionsAdapter {
    pub const fn openai() -> Self {
        Self {
            url: "https://api.openai.com/v1/chat/completions",
            default_model: Some("gpt-3.5-turbo"),
            explicit_stream_flag: false,
            attribution: false,
        }
    }

    pub const fn deepseek() -> Self {
        Self {
            url: "https://api.deepseek.com/v1/chat/completions",
            default_model: Some("deepseek-chat"),
            explicit_stream_flag: true,
            attribution: false,
        }
    }

    pub const fn openrouter() -> Self {
        Self {
            url: "https://openrouter.ai/api/v1/chat/completions",
            default_model: None,
            explicit_stream_flag: false,
            attribution: true,
        }
    }
}

impl ProviderAdapter for ChatCompletionsAdapter {
    fn default_model(&self) -> Option<&'static str> {
        self.default_model
    }

    fn endpoint(&self, _model: &str, _api_key: &str) -> String {
        self.url.to_string()
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Authorization", format!("Bearer {}", api_key))];
        if self.attribution {
            headers.push(("HTTP-Referer", OPENROUTER_REFERER.to_string()));
            headers.push(("X-Title", OPENROUTER_TITLE.to_string()));
        }
        headers
    }

    fn build_body(&self, system_instruction: &str, user_text: &str, model: &str) -> Value {
        let mut body = json!({
            "model": model,
            "messages": [
                {"role": "system", "content": system_instruction},
                {"role": "user", "content": user_text},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_OUTPUT_TOKENS,
        });
        if self.explicit_stream_flag {
            body["stream"] = Value::Bool(false);
        }
        body
    }

    fn extract_text(&self, response: &Value) -> Option<String> {
        response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn extract_error_message(&self, response: &Value, status: u16) -> String {
        message_from(response, CHAT_COMPLETIONS_STRATEGIES, status)
    }
}
