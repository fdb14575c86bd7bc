use thiserror::Error;

use crate::interview::models::Step;
use crate::questions::GenerationError;
use crate::storage::StorageError;

/// Severity of a transient notice shown to the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, dismissable message. Notices are rendered by the front end
/// and never enter the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }
}

/// Application-level error type.
/// Every variant is recoverable; `notice()` turns it into what the candidate sees.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("Action '{action}' is not accepted at step '{step}'")]
    UnexpectedAction { step: Step, action: &'static str },

    #[error("Interview already completed")]
    SessionEnded,
}

impl AppError {
    pub fn notice(&self) -> Notice {
        match self {
            AppError::Validation(msg) => Notice::new(NoticeLevel::Warning, msg.clone()),
            AppError::Generation(e) => {
                tracing::warn!("Question generation failed: {e}");
                Notice::new(NoticeLevel::Warning, e.marker())
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                Notice::new(
                    NoticeLevel::Error,
                    format!("⚠️ Oh no! There was an error saving your data: {e}"),
                )
            }
            AppError::UnexpectedAction { step, .. } => Notice::new(
                NoticeLevel::Warning,
                format!("That doesn't fit right now. {}", step.hint()),
            ),
            AppError::SessionEnded => Notice::info(
                "🎉 This interview is already complete. Start a new conversation to begin again.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_warning_with_same_text() {
        let notice = AppError::Validation("Please enter a valid email address.".into()).notice();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.text, "Please enter a valid email address.");
    }

    #[test]
    fn test_generation_notice_carries_marker_verbatim() {
        let err = GenerationError::NoSkills;
        let marker = err.marker();
        let notice = AppError::from(err).notice();
        assert_eq!(notice.text, marker);
    }

    #[test]
    fn test_session_ended_is_info() {
        assert_eq!(AppError::SessionEnded.notice().level, NoticeLevel::Info);
    }

    #[test]
    fn test_unexpected_action_mentions_step_hint() {
        let notice = AppError::UnexpectedAction {
            step: Step::AskTechStack,
            action: "input",
        }
        .notice();
        assert!(notice.text.contains(Step::AskTechStack.hint()));
    }
}
