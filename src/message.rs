//! Message boundary between the page layer and the refiner.
//!
//! Inbound: `{ "action": "enhancePrompt", "prompt": "...", "refinementStyle": "creative" }`
//! Outbound: `{ "enhancedPrompt": "..." }` or `{ "error": "..." }` (localized).

use crate::config::SettingsStore;
use crate::i18n::{describe_failure, text, Language, MessageKey};
use crate::refine::{RefinementOutcome, RefinementRequest, Refiner};
use crate::style::RefinementStyle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

/// The only action the boundary understands.
pub const ENHANCE_ACTION: &str = "enhancePrompt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    pub action: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinement_style: Option<String>,
}

impl InboundMessage {
    pub fn enhance(prompt: impl Into<String>, style: Option<RefinementStyle>) -> Self {
        Self {
            action: ENHANCE_ACTION.to_string(),
            prompt: prompt.into(),
            refinement_style: style.map(|s| s.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundResponse {
    Enhanced {
        #[serde(rename = "enhancedPrompt")]
        enhanced_prompt: String,
    },
    Error {
        error: String,
    },
}

impl OutboundResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// Runs the full flow for one inbound message: load settings, build the
/// request, refine, localize. Stateless, so a repeated message regenerates.
#[derive(Clone)]
pub struct MessageHandler {
    store: Arc<dyn SettingsStore>,
    refiner: Refiner,
}

impl MessageHandler {
    pub fn new(store: Arc<dyn SettingsStore>, refiner: Refiner) -> Self {
        Self { store, refiner }
    }

    pub async fn handle(&self, message: InboundMessage) -> OutboundResponse {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("enhance", %request_id);
        self.handle_inner(message).instrument(span).await
    }

    async fn handle_inner(&self, message: InboundMessage) -> OutboundResponse {
        let settings = match self.store.load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(error = %e, "failed to load settings");
                return OutboundResponse::error(format!(
                    "{}: {}",
                    text(MessageKey::SettingsUnavailable, Language::En),
                    e
                ));
            }
        };
        let language = settings.language();

        if message.action != ENHANCE_ACTION {
            tracing::warn!(action = %message.action, "unsupported action");
            return OutboundResponse::error(format!(
                "{}: {}",
                text(MessageKey::UnsupportedAction, language),
                message.action
            ));
        }

        let style = message
            .refinement_style
            .as_deref()
            .map(RefinementStyle::from_str_lossy)
            .unwrap_or_else(|| settings.default_style());

        let request = match RefinementRequest::new(message.prompt, style, language) {
            Ok(request) => request,
            Err(_) => return OutboundResponse::error(text(MessageKey::EmptyPrompt, language)),
        };

        match self
            .refiner
            .refine(&request, &settings.provider_settings())
            .await
        {
            RefinementOutcome::Success { enhanced_text } => OutboundResponse::Enhanced {
                enhanced_prompt: enhanced_text,
            },
            RefinementOutcome::Failure(failure) => {
                OutboundResponse::error(describe_failure(&failure, request.language()))
            }
        }
    }
}
