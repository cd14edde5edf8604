//! Refinement styles and the system instruction sent to every provider.
//!
//! The instruction is always assembled in the same order: the base
//! instruction, a line naming the active style, then that style's clause.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base instruction shared by every style. Kept in English for best results
/// across providers; the model is told to keep the user's own language.
pub const BASE_INSTRUCTION: &str = "You are an expert prompt engineer. Your primary task is to transform the user's input into a clearer, more specific, and more effective prompt. This refined prompt is intended to be used as input for another large language model to generate a high-quality response.
Focus on:
1. Clarity: Ensure the prompt is unambiguous and easy for an LLM to understand.
2. Specificity: Add necessary details to narrow the scope and guide the LLM.
3. Actionability: Frame the prompt to request a concrete output or task.
4. Conciseness: Remove fluff or unnecessary parts, making it direct.
5. Completeness: Ensure all critical information for the LLM is present.
The user's original input might be in any language. Preserve the original language of the core request in your refined prompt.
IMPORTANT: Your entire response MUST be ONLY the refined prompt text. Do NOT include any conversational phrases, greetings, self-references, explanations of your changes, or any text other than the final, ready-to-use prompt.
If the original input is already an excellent or very short and clear prompt, you can return it as is or with very minimal, impactful adjustments.
The goal is to produce a prompt, not to answer the question or fulfill the request in the user's original input.";

/// How aggressively the input should be rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementStyle {
    #[default]
    Balanced,
    Subtle,
    Creative,
    Concise,
    Programming,
}

impl RefinementStyle {
    pub const ALL: [RefinementStyle; 5] = [
        RefinementStyle::Balanced,
        RefinementStyle::Subtle,
        RefinementStyle::Creative,
        RefinementStyle::Concise,
        RefinementStyle::Programming,
    ];

    /// Parse a style identifier. Unknown values fall back to `Balanced`.
    pub fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "subtle" => Self::Subtle,
            "creative" => Self::Creative,
            "concise" => Self::Concise,
            "programming" => Self::Programming,
            _ => Self::Balanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Subtle => "subtle",
            Self::Creative => "creative",
            Self::Concise => "concise",
            Self::Programming => "programming",
        }
    }

    /// Style-specific clause appended after the style announcement.
    pub fn clause(&self) -> &'static str {
        match self {
            Self::Balanced => "Strike a balance: improve structure and add only the detail that clearly helps, keeping the user's intent and tone intact.",
            Self::Subtle => "Make minimal edits: fix ambiguity, grammar and ordering, but keep the user's wording and length as close to the original as possible.",
            Self::Creative => "Expand creatively: enrich the prompt with vivid context, perspective, constraints on tone and imaginative directions the answer could explore.",
            Self::Concise => "Be ruthlessly brief: cut every non-essential word and reduce the prompt to a short, direct instruction.",
            Self::Programming => "Treat this as a software task: name the language, framework and versions if implied, state inputs, outputs, edge cases, error handling and the expected code format.",
        }
    }
}

impl fmt::Display for RefinementStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full system instruction for a style identifier; unknown styles get the
/// `balanced` instruction.
pub fn instruction_for(style: &str) -> String {
    system_instruction(RefinementStyle::from_str_lossy(style))
}

/// Full system instruction for a parsed style.
pub fn system_instruction(style: RefinementStyle) -> String {
    format!(
        "{}\nRefinement style: {}.\n{}",
        BASE_INSTRUCTION,
        style.as_str(),
        style.clause()
    )
}
