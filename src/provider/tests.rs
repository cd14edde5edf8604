//! Tests for the provider adapters.

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn header<'a>(headers: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[test]
fn parses_every_known_provider_id() {
    for provider in Provider::ALL {
        assert_eq!(provider.id().parse::<Provider>().unwrap(), provider);
    }
}

#[test]
fn rejects_unknown_provider_id() {
    let err = "unknown-x".parse::<Provider>().unwrap_err();
    assert_eq!(err, UnknownProvider("unknown-x".to_string()));
    assert!(err.to_string().contains("unknown-x"));
}

#[test]
fn provider_ids_are_case_sensitive() {
    assert!("OpenAI".parse::<Provider>().is_err());
}

#[test]
fn default_models_match_provider_table() {
    assert_eq!(adapter_for(Provider::OpenAi).default_model(), Some("gpt-3.5-turbo"));
    assert_eq!(adapter_for(Provider::DeepSeek).default_model(), Some("deepseek-chat"));
    assert_eq!(
        adapter_for(Provider::Anthropic).default_model(),
        Some("claude-3-haiku-20240307")
    );
    assert_eq!(
        adapter_for(Provider::Google).default_model(),
        Some("gemini-1.5-flash-latest")
    );
    assert_eq!(adapter_for(Provider::OpenRouter).default_model(), None);
}

// =========================================================================
// Endpoints and headers
// =========================================================================

#[test]
fn endpoints_match_provider_table() {
    assert_eq!(
        adapter_for(Provider::OpenAi).endpoint("m", "k"),
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(
        adapter_for(Provider::DeepSeek).endpoint("m", "k"),
        "https://api.deepseek.com/v1/chat/completions"
    );
    assert_eq!(
        adapter_for(Provider::Anthropic).endpoint("m", "k"),
        "https://api.anthropic.com/v1/messages"
    );
    assert_eq!(
        adapter_for(Provider::OpenRouter).endpoint("m", "k"),
        "https://openrouter.ai/api/v1/chat/completions"
    );
}

#[test]
fn gemini_endpoint_embeds_model_and_key() {
    assert_eq!(
        adapter_for(Provider::Google).endpoint("gemini-1.5-pro", "abc"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent?key=abc"
    );
}

#[test]
fn gemini_endpoint_percent_encodes_model_and_key() {
    assert_eq!(
        adapter_for(Provider::Google).endpoint("tuned/model#1", "a&b#c"),
        "https://generativelanguage.googleapis.com/v1beta/models/tuned%2Fmodel%231:generateContent?key=a%26b%23c"
    );
}

#[test]
fn bearer_auth_for_chat_completions_family() {
    for provider in [Provider::OpenAi, Provider::DeepSeek, Provider::OpenRouter] {
        let headers = adapter_for(provider).auth_headers("sk-1");
        assert_eq!(header(&headers, "Authorization"), Some("Bearer sk-1"));
    }
}

#[test]
fn openrouter_sends_attribution_headers() {
    let headers = adapter_for(Provider::OpenRouter).auth_headers("sk-or");
    assert!(header(&headers, "HTTP-Referer").is_some());
    assert!(header(&headers, "X-Title").is_some());

    let headers = adapter_for(Provider::OpenAi).auth_headers("sk");
    assert!(header(&headers, "HTTP-Referer").is_none());
}

#[test]
fn anthropic_uses_api_key_and_version_headers() {
    let headers = adapter_for(Provider::Anthropic).auth_headers("ant-key");
    assert_eq!(header(&headers, "x-api-key"), Some("ant-key"));
    assert_eq!(header(&headers, "anthropic-version"), Some("2023-06-01"));
    assert!(header(&headers, "Authorization").is_none());
}

#[test]
fn gemini_sends_no_auth_headers() {
    assert!(adapter_for(Provider::Google).auth_headers("k").is_empty());
}

// =========================================================================
// Request bodies
// =========================================================================

#[test]
fn openai_body_shape() {
    let body = adapter_for(Provider::OpenAi).build_body("SYS", "USER", "gpt-4o");
    assert_eq!(
        body,
        json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "SYS"},
                {"role": "user", "content": "USER"},
            ],
            "temperature": 0.6,
            "max_tokens": 2048,
        })
    );
}

#[test]
fn deepseek_body_disables_streaming() {
    let body = adapter_for(Provider::DeepSeek).build_body("SYS", "USER", "deepseek-chat");
    assert_eq!(body["stream"], json!(false));
    assert_eq!(body["messages"][1]["content"], "USER");
}

#[test]
fn openrouter_body_matches_openai_shape() {
    let openai = adapter_for(Provider::OpenAi).build_body("S", "U", "openai/gpt-4o");
    let openrouter = adapter_for(Provider::OpenRouter).build_body("S", "U", "openai/gpt-4o");
    assert_eq!(openai, openrouter);
}

#[test]
fn anthropic_body_puts_system_at_top_level() {
    let body = adapter_for(Provider::Anthropic).build_body("SYS", "USER", "claude");
    assert_eq!(
        body,
        json!({
            "model": "claude",
            "system": "SYS",
            "messages": [{"role": "user", "content": "USER"}],
            "max_tokens": 2048,
            "temperature": 0.6,
        })
    );
}

#[test]
fn gemini_body_joins_system_and_user_text() {
    let body = adapter_for(Provider::Google).build_body("SYS", "USER", "gemini");
    assert_eq!(
        body,
        json!({
            "contents": [{"role": "user", "parts": [{"text": "SYS\n\nUSER"}]}],
            "generationConfig": {"temperature": 0.6, "maxOutputTokens": 2048},
        })
    );
}

// =========================================================================
// Response extraction
// =========================================================================

#[test]
fn extracts_text_from_chat_completions_response() {
    let response = json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "refined openai"}}]
    });
    for provider in [Provider::OpenAi, Provider::DeepSeek, Provider::OpenRouter] {
        assert_eq!(
            adapter_for(provider).extract_text(&response).as_deref(),
            Some("refined openai")
        );
    }
}

#[test]
fn chat_completions_without_choices_yields_nothing() {
    for body in [json!({}), json!({"choices": []}), json!({"choices": [{"message": {}}]})] {
        assert_eq!(adapter_for(Provider::OpenAi).extract_text(&body), None);
    }
}

#[test]
fn extracts_text_from_anthropic_response() {
    let response = json!({
        "id": "msg_1",
        "type": "message",
        "content": [{"type": "text", "text": "refined claude"}],
        "stop_reason": "end_turn"
    });
    assert_eq!(
        adapter_for(Provider::Anthropic).extract_text(&response).as_deref(),
        Some("refined claude")
    );
}

#[test]
fn anthropic_non_text_first_block_yields_nothing() {
    let response = json!({
        "content": [{"type": "tool_use", "id": "t", "name": "x", "input": {}}]
    });
    assert_eq!(adapter_for(Provider::Anthropic).extract_text(&response), None);
    assert_eq!(adapter_for(Provider::Anthropic).extract_text(&json!({"content": []})), None);
}

#[test]
fn extracts_text_from_gemini_response() {
    let response = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "refined gemini"}]},
            "finishReason": "STOP"
        }]
    });
    assert_eq!(
        adapter_for(Provider::Google).extract_text(&response).as_deref(),
        Some("refined gemini")
    );
}

#[test]
fn gemini_blocked_prompt_yields_nothing() {
    let response = json!({"promptFeedback": {"blockReason": "SAFETY"}});
    assert_eq!(adapter_for(Provider::Google).extract_text(&response), None);
}

#[test]
fn error_messages_from_each_provider() {
    let nested = json!({"error": {"message": "invalid api key", "type": "invalid_request_error"}});
    for provider in Provider::ALL {
        assert_eq!(
            adapter_for(provider).extract_error_message(&nested, 401),
            "invalid api key"
        );
    }
}

#[test]
fn deepseek_bare_message_is_used() {
    let body = json!({"message": "Insufficient Balance"});
    assert_eq!(
        adapter_for(Provider::DeepSeek).extract_error_message(&body, 402),
        "Insufficient Balance"
    );
}

#[test]
fn error_without_message_falls_back_to_status_line() {
    assert_eq!(
        adapter_for(Provider::Google).extract_error_message(&json!({"error": {}}), 404),
        "Not Found"
    );
}
