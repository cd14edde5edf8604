//! Prompt Refiner - turn a rough draft into a sharper LLM prompt.
//!
//! Features:
//! - One refinement call translated to OpenAI, DeepSeek, Anthropic, Gemini or OpenRouter
//! - Five refinement styles layered on a fixed prompt-engineering instruction
//! - Provider errors normalized into a small, localized error taxonomy
//! - Extension-compatible message boundary, usable in-process or over local HTTP

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod i18n;
pub mod message;
pub mod provider;
pub mod refine;
pub mod style;

#[cfg(test)]
pub(crate) mod test_support;

pub use message::{InboundMessage, MessageHandler, OutboundResponse};
pub use refine::{
    ErrorKind, MissingSetting, ProviderSettings, RefinementFailure, RefinementOutcome,
    RefinementRequest, Refiner,
};
pub use style::RefinementStyle;
