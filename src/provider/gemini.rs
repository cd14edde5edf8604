//! Google Gemini generateContent.

use super::errors::{message_from, GEMINI_STRATEGIES};
use super::{ProviderAdapter, MAX_OUTPUT_TOKENS, TEMPERATURE};
use reqwest::Url;
use serde_json::{json, Value};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiAdapter;

impl ProviderAdapter for GeminiAdapter {
    fn default_model(&self) -> Option<&'static str> {
        Some("gemini-1.5-flash-latest")
    }

    fn endpoint(&self, model: &str, api_key: &str) -> String {
        generate_content_url(model, api_key)
            .map(String::from)
            .unwrap_or_else(|| format!("{}/{}:generateContent", API_BASE, model))
    }

    // The key travels in the URL.
    fn auth_headers(&self, _api_key: &str) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn build_body(&self, system_instruction: &str, user_text: &str, _model: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": format!("{}\n\n{}", system_instruction, user_text)}],
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        })
    }

    fn extract_text(&self, response: &Value) -> Option<String> {
        response
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn extract_error_message(&self, response: &Value, status: u16) -> String {
        message_from(response, GEMINI_STRATEGIES, status)
    }
}

/// `{API_BASE}/{model}:generateContent?key={api_key}` with both values percent-encoded.
fn generate_content_url(model: &str, api_key: &str) -> Option<Url> {
    let mut url = Url::parse(API_BASE).ok()?;
    url.path_segments_mut()
        .ok()?
        .push(&format!("{}:generateContent", model));
    url.query_pairs_mut().append_pair("key", api_key);
    Some(url)
}
