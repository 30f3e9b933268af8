//! Fixed prompt templates.
//!
//! Each prompt pairs a system instruction with a user message and picks its
//! token budget from the active [`ProviderProfile`].

use lucid_config::ProviderProfile;
use lucid_protocols::{CompletionRequest, ExplanationMode};

const CONCISE_SYSTEM: &str =
    "You are a helpful assistant. Explain concepts clearly and concisely in 50 words or less.";
const QUESTION_SYSTEM: &str =
    "You are a helpful coding assistant. Provide clear, technical answers to questions about code.";
const ANALYSIS_SYSTEM: &str =
    "You are a helpful coding assistant. Explain code clearly and concisely.";
const IMPROVEMENTS_SYSTEM: &str = "You are an expert code reviewer. Analyze the code and suggest specific improvements for better performance, readability, and best practices. If the code is already optimal, explain why no improvements are needed. Always provide concrete suggestions or explanations.";

/// Returned when the provider answers with an empty explanation.
pub const EMPTY_EXPLANATION: &str = "Could not generate explanation.";
/// Returned when the provider answers with empty improvement suggestions.
pub const EMPTY_IMPROVEMENTS: &str = "Could not analyze improvements.";

/// Which template a prompt was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Concise,
    Question,
    Analysis,
    Improvements,
}

/// A rendered prompt, ready to become a completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub system: &'static str,
    pub user: String,
}

impl Prompt {
    /// Short explanation of plain text, worded by `mode`.
    pub fn concise(text: &str, mode: &ExplanationMode) -> Self {
        let user = match mode {
            ExplanationMode::Simple => format!(
                "Give a clear explanation of the following text in a simple and easy way within 50 words:\n\n{}",
                text
            ),
            ExplanationMode::Detailed => format!(
                "Give a detailed explanation of the following text. The explanation should not exceed 100 words:\n\n{}",
                text
            ),
            ExplanationMode::Custom(instruction) => format!("{}\n\n{}", instruction.trim(), text),
        };
        Self {
            kind: PromptKind::Concise,
            system: CONCISE_SYSTEM,
            user,
        }
    }

    pub fn question(text: &str, question: &str) -> Self {
        Self {
            kind: PromptKind::Question,
            system: QUESTION_SYSTEM,
            user: format!("Given this code:\n{}\n\nQuestion: {}\n\nAnswer:", text, question),
        }
    }

    pub fn analysis(text: &str) -> Self {
        Self {
            kind: PromptKind::Analysis,
            system: ANALYSIS_SYSTEM,
            user: format!("Explain what this code does:\n{}", text),
        }
    }

    pub fn improvements(text: &str) -> Self {
        Self {
            kind: PromptKind::Improvements,
            system: IMPROVEMENTS_SYSTEM,
            user: format!("Review this code and suggest improvements:\n{}", text),
        }
    }

    /// Build the provider request using the profile's model and budgets.
    pub fn into_request(self, profile: &ProviderProfile) -> CompletionRequest {
        let max_tokens = match self.kind {
            PromptKind::Concise => profile.concise_max_tokens,
            PromptKind::Question => profile.question_max_tokens,
            PromptKind::Analysis => profile.analysis_max_tokens,
            PromptKind::Improvements => profile.improvements_max_tokens,
        };
        let request = CompletionRequest::single_turn(profile.model.clone(), self.user)
            .with_system(self.system)
            .with_max_tokens(max_tokens)
            .with_temperature(profile.temperature);
        match profile.top_p {
            Some(top_p) => request.with_top_p(top_p),
            None => request,
        }
    }
}
