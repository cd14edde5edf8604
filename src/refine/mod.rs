//! Refinement dispatcher.
//!
//! Turns one `RefinementRequest` plus the current provider settings into a
//! single provider call and maps whatever comes back into a
//! [`RefinementOutcome`]. Nothing is retried; every failure is terminal for
//! the call that produced it.


use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::i18n::Language;
use crate::provider::errors::UNPARSEABLE_ERROR;
use crate::provider::{adapter_for, Provider, ProviderAdapter, UnknownProvider};
use crate::style::{system_instruction, RefinementStyle};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One user-triggered refinement. Regenerating re-sends the same request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinementRequest {
    text: String,
    style: RefinementStyle,
    language: Language,
}

/// The draft text was empty after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("prompt text is empty")]
pub struct EmptyPrompt;

impl RefinementRequest {
    pub fn new(
        text: impl Into<String>,
        style: RefinementStyle,
        language: Language,
    ) -> Result<Self, EmptyPrompt> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptyPrompt);
        }
        Ok(Self { text, style, language })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> RefinementStyle {
        self.style
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Provider configuration as read from the settings store. The provider is
/// kept as the raw stored identifier so unknown values can be reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    pub provider: String,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl ProviderSettings {
    pub fn new(provider: impl Into<String>, api_key: Option<&str>, model: Option<&str>) -> Self {
        Self {
            provider: provider.into(),
            api_key: api_key.map(str::to_string),
            model: model.map(str::to_string),
        }
    }
}

/// Which required setting was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSetting {
    ApiKey,
    Model,
}

/// Language-neutral failure category; the message boundary localizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigMissing(MissingSetting),
    UnsupportedProvider,
    ApiRejected,
    InvalidResponseShape,
    NetworkError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMissing(MissingSetting::ApiKey) => write!(f, "api key missing"),
            Self::ConfigMissing(MissingSetting::Model) => write!(f, "model missing"),
            Self::UnsupportedProvider => write!(f, "unsupported provider"),
            Self::ApiRejected => write!(f, "api rejected request"),
            Self::InvalidResponseShape => write!(f, "invalid response shape"),
            Self::NetworkError => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RefinementFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl RefinementFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Terminal result of one refinement call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefinementOutcome {
    Success { enhanced_text: String },
    Failure(RefinementFailure),
}

impl RefinementOutcome {
    pub fn failure_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(failure) => Some(failure.kind),
        }
    }
}

impl From<RefinementFailure> for RefinementOutcome {
    fn from(failure: RefinementFailure) -> Self {
        Self::Failure(failure)
    }
}

/// A validated, fully built provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    pub provider: Provider,
    pub model: String,
    pub request: HttpRequest,
}

/// Dispatches refinements over an [`HttpTransport`]. Holds no per-call state.
#[derive(Clone)]
pub struct Refiner {
    transport: Arc<dyn HttpTransport>,
}

impl Default for Refiner {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::default()))
    }
}

impl Refiner {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Validate settings and build the provider request without any I/O.
    pub fn prepare(
        request: &RefinementRequest,
        settings: &ProviderSettings,
    ) -> Result<PreparedCall, RefinementFailure> {
        let api_key = non_blank(settings.api_key.as_deref()).ok_or_else(|| {
            RefinementFailure::new(
                ErrorKind::ConfigMissing(MissingSetting::ApiKey),
                "API key is not set",
            )
        })?;

        let provider: Provider = settings
            .provider
            .parse()
            .map_err(|e: UnknownProvider| {
                RefinementFailure::new(ErrorKind::UnsupportedProvider, e.to_string())
            })?;

        let adapter = adapter_for(provider);
        let model = non_blank(settings.model.as_deref())
            .or(adapter.default_model())
            .ok_or_else(|| {
                RefinementFailure::new(
                    ErrorKind::ConfigMissing(MissingSetting::Model),
                    format!("a model name is required for {}", provider),
                )
            })?
            .to_string();

        let instruction = system_instruction(request.style());
        let http = HttpRequest {
            url: adapter.endpoint(&model, api_key),
            headers: adapter
                .auth_headers(api_key)
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            body: adapter.build_body(&instruction, request.text(), &model),
        };

        tracing::debug!(%provider, %model, style = %request.style(), "built refinement request");

        Ok(PreparedCall {
            provider,
            model,
            request: http,
        })
    }

    /// Run one refinement: validate, call the provider exactly once, map the result.
    pub async fn refine(
        &self,
        request: &RefinementRequest,
        settings: &ProviderSettings,
    ) -> RefinementOutcome {
        let call = match Self::prepare(request, settings) {
            Ok(call) => call,
            Err(failure) => {
                tracing::warn!(kind = %failure.kind, "refinement rejected before dispatch");
                return failure.into();
            }
        };

        let PreparedCall {
            provider,
            model,
            request: http,
        } = call;
        let adapter = adapter_for(provider);

        let outcome = match self.transport.send(http).await {
            Ok(response) => interpret(adapter, response),
            Err(e) => RefinementFailure::new(ErrorKind::NetworkError, e.to_string()).into(),
        };

        match &outcome {
            RefinementOutcome::Success { enhanced_text } => {
                tracing::info!(%provider, %model, chars = enhanced_text.chars().count(), "refinement succeeded");
            }
            RefinementOutcome::Failure(failure) => {
                tracing::warn!(%provider, %model, kind = %failure.kind, message = %failure.message, "refinement failed");
            }
        }

        outcome
    }
}

/// Map a raw provider response through the adapter.
fn interpret(adapter: &dyn ProviderAdapter, response: HttpResponse) -> RefinementOutcome {
    if !response.is_success() {
        let detail = match serde_json::from_str::<Value>(&response.body) {
            Ok(body) => adapter.extract_error_message(&body, response.status),
            Err(_) => UNPARSEABLE_ERROR.to_string(),
        };
        return RefinementFailure::new(
            ErrorKind::ApiRejected,
            format!("{} {}", response.status, detail),
        )
        .into();
    }

    let text = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| adapter.extract_text(&body));

    match text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => RefinementOutcome::Success {
            enhanced_text: text.to_string(),
        },
        _ => RefinementFailure::new(
            ErrorKind::InvalidResponseShape,
            "response contained no generated text",
        )
        .into(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
