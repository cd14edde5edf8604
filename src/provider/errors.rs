//! Error-message extraction for provider error bodies.
//!
//! Each adapter carries an ordered list of JSON pointers. The first one that
//! resolves to a non-empty string wins; otherwise the HTTP status line is used.

use reqwest::StatusCode;
use serde_json::Value;

/// `{"error": {"message": "..."}}` (OpenAI, OpenRouter, Anthropic, Gemini).
pub const NESTED_MESSAGE: &str = "/error/message";

/// `{"message": "..."}` (some DeepSeek and gateway failures).
pub const BARE_MESSAGE: &str = "/message";

/// Detail used when an error body is not JSON at all.
pub const UNPARSEABLE_ERROR: &str = "Could not parse error response from API.";

/// Strategy order shared by the chat-completions family.
pub const CHAT_COMPLETIONS_STRATEGIES: &[&str] = &[NESTED_MESSAGE, BARE_MESSAGE];

/// Anthropic reports errors under `error`; proxies in front of it may not.
pub const ANTHROPIC_STRATEGIES: &[&str] = &[NESTED_MESSAGE, BARE_MESSAGE];

/// Gemini wraps errors in a Google RPC status under `error`.
pub const GEMINI_STRATEGIES: &[&str] = &[NESTED_MESSAGE, BARE_MESSAGE];

/// First non-empty message found by `strategies`, or the status line.
pub fn message_from(body: &Value, strategies: &[&str], status: u16) -> String {
    strategies
        .iter()
        .filter_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| status_line(status))
}

/// Canonical reason phrase for a status code, e.g. "Unauthorized".
pub fn status_line(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown status")
        .to_string()
}
