//! User-facing strings for the message boundary (English and Chinese).

use crate::refine::{ErrorKind, MissingSetting, RefinementFailure};
use serde::{Deserialize, Serialize};

/// UI language for boundary messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Parse a language code; anything other than Chinese falls back to English.
    pub fn from_str_lossy(value: &str) -> Self {
        let code = value.trim().to_ascii_lowercase();
        if code == "zh" || code.starts_with("zh-") || code.starts_with("zh_") {
            Self::Zh
        } else {
            Self::En
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ApiKeyMissing,
    ModelMissing,
    UnsupportedProvider,
    ApiRequestFailed,
    InvalidApiResponse,
    NetworkOrOther,
    EmptyPrompt,
    UnsupportedAction,
    SettingsUnavailable,
}

pub fn text(key: MessageKey, language: Language) -> &'static str {
    use MessageKey::*;
    match (language, key) {
        (Language::En, ApiKeyMissing) => "API Key is not set. Please set it in the settings.",
        (Language::En, ModelMissing) => "Model name is required for OpenRouter.",
        (Language::En, UnsupportedProvider) => {
            "Unsupported API provider or not selected correctly in the settings."
        }
        (Language::En, ApiRequestFailed) => "API request failed",
        (Language::En, InvalidApiResponse) => {
            "Invalid API response structure or empty content received."
        }
        (Language::En, NetworkOrOther) => "Network or other error",
        (Language::En, EmptyPrompt) => "Please enter text to refine!",
        (Language::En, UnsupportedAction) => "Unsupported action",
        (Language::En, SettingsUnavailable) => "Could not load settings",

        (Language::Zh, ApiKeyMissing) => "API 密钥未设置。请在设置中进行设置。",
        (Language::Zh, ModelMissing) => "OpenRouter 需要指定模型名称。",
        (Language::Zh, UnsupportedProvider) => "不支持的 API 服务商或未在设置中正确选择。",
        (Language::Zh, ApiRequestFailed) => "API 请求失败",
        (Language::Zh, InvalidApiResponse) => "从 API 收到的响应结构无效或内容为空。",
        (Language::Zh, NetworkOrOther) => "网络或其他错误",
        (Language::Zh, EmptyPrompt) => "请输入内容后再润色！",
        (Language::Zh, UnsupportedAction) => "不支持的操作",
        (Language::Zh, SettingsUnavailable) => "无法加载设置",
    }
}

/// Localized, human-readable text for a refinement failure. Provider and
/// transport details are appended verbatim after the template.
pub fn describe_failure(failure: &RefinementFailure, language: Language) -> String {
    let (key, with_detail) = match failure.kind {
        ErrorKind::ConfigMissing(MissingSetting::ApiKey) => (MessageKey::ApiKeyMissing, false),
        ErrorKind::ConfigMissing(MissingSetting::Model) => (MessageKey::ModelMissing, false),
        ErrorKind::UnsupportedProvider => (MessageKey::UnsupportedProvider, false),
        ErrorKind::ApiRejected => (MessageKey::ApiRequestFailed, true),
        ErrorKind::InvalidResponseShape => (MessageKey::InvalidApiResponse, false),
        ErrorKind::NetworkError => (MessageKey::NetworkOrOther, true),
    };

    let template = text(key, language);
    if with_detail && !failure.message.is_empty() {
        format!("{}: {}", template, failure.message)
    } else {
        template.to_string()
    }
}
