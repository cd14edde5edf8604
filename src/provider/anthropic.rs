//! Anthropic Messages API.

use super::errors::{message_from, ANTHROPIC_STRATEGIES};
use super::{ProviderAdapter, MAX_OUTPUT_TOKENS, TEMPERATURE};
use serde_json::{json, Value};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

impl ProviderAdapter for AnthropicAdapter {
    fn default_model(&self) -> Option<&'static str> {
        Some("claude-3-haiku-20240307")
    }

    fn endpoint(&self, _model: &str, _api_key: &str) -> String {
        MESSAGES_URL.to_string()
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ]
    }

    fn build_body(&self, system_instruction: &str, user_text: &str, model: &str) -> Value {
        json!({
            "model": model,
            "system": system_instruction,
            "messages": [{"role": "user", "content": user_text}],
            "max_tokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE,
        })
    }

    // Only a leading text block counts; tool_use or thinking blocks are not a refinement.
    fn extract_text(&self, response: &Value) -> Option<String> {
        let first = response.pointer("/content/0")?;
        if first.get("type").and_then(Value::as_str) != Some("text") {
            return None;
        }
        first.get("text").and_then(Value::as_str).map(str::to_string)
    }

    fn extract_error_message(&self, response: &Value, status: u16) -> String {
        message_from(response, ANTHROPIC_STRATEGIES, status)
    }
}
