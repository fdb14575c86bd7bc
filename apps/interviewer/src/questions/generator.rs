//! Question generation — one tech stack in, 3 to 5 questions out.
//!
//! Flow: guard empty stack → build prompt → try each model in preference
//! order until one answers → parse lines → pad with fallbacks → cap at 5.
//!
//! Failure never panics or propagates a transport error: callers get a
//! `GenerationError`, whose `marker()` is the text shown to the candidate.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{LlmError, TextCompletion};
use crate::questions::parser::parse_questions;
use crate::questions::prompts::{build_question_prompt, fallback_questions};

/// Models tried in order. The first one that returns text wins.
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-2.0-flash", "gemini-1.5-pro"];

pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 5;

/// Prefix shared by every error marker string.
pub const ERROR_MARKER: &str = "⚠️ Error:";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no tech stack provided")]
    NoSkills,

    #[error("no models configured")]
    NoModels,

    #[error("all {attempts} model attempts failed; last error: {last}")]
    AllModelsFailed { attempts: usize, last: LlmError },
}

impl GenerationError {
    /// The human-readable sentinel surfaced to the candidate.
    pub fn marker(&self) -> String {
        match self {
            GenerationError::NoSkills => format!(
                "{ERROR_MARKER} 🤔 It looks like you haven't provided your tech stack yet. \
                 Please tell me your key skills so I can generate relevant questions!"
            ),
            GenerationError::NoModels | GenerationError::AllModelsFailed { .. } => format!(
                "{ERROR_MARKER} I couldn't generate technical questions at this moment. \
                 Please try again or simplify your tech stack. Error details: {self}"
            ),
        }
    }
}

/// True if `text` is a generation error marker rather than a question.
pub fn is_error_marker(text: &str) -> bool {
    text.starts_with(ERROR_MARKER)
}

/// Stateless question generator over an ordered list of model attempts.
#[derive(Clone)]
pub struct QuestionGenerator {
    backend: Arc<dyn TextCompletion>,
    models: Vec<String>,
}

impl QuestionGenerator {
    pub fn new(backend: Arc<dyn TextCompletion>, models: &[&str]) -> Self {
        Self {
            backend,
            models: models.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generates interview questions for `skills`.
    ///
    /// Never calls the backend for an empty stack. Each configured model is
    /// attempted at most once.
    pub async fn generate(&self, skills: &[String]) -> Result<Vec<String>, GenerationError> {
        let first_skill = skills.first().ok_or(GenerationError::NoSkills)?;

        let prompt = build_question_prompt(skills);
        let raw = self.complete_with_fallback(&prompt).await?;

        let mut questions = parse_questions(&raw);
        if questions.len() < MIN_QUESTIONS {
            warn!(
                "Model produced {} questions (< {}), padding with generic ones",
                questions.len(),
                MIN_QUESTIONS
            );
            pad_with_fallbacks(&mut questions, first_skill);
        }
        questions.truncate(MAX_QUESTIONS);

        info!(
            "Generated {} questions for stack [{}]",
            questions.len(),
            skills.join(", ")
        );
        Ok(questions)
    }

    async fn complete_with_fallback(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut last_error: Option<LlmError> = None;

        for (attempt, model) in self.models.iter().enumerate() {
            match self.backend.complete(model, prompt).await {
                Ok(text) => {
                    info!("Model {} answered on attempt {}", model, attempt + 1);
                    return Ok(text);
                }
                Err(e) => {
                    warn!(
                        "Model attempt {}/{} ({}) failed: {}",
                        attempt + 1,
                        self.models.len(),
                        model,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(GenerationError::AllModelsFailed {
                attempts: self.models.len(),
                last,
            }),
            None => Err(GenerationError::NoModels),
        }
    }
}

/// Appends pool questions not already present until there are `MIN_QUESTIONS`.
fn pad_with_fallbacks(questions: &mut Vec<String>, first_skill: &str) {
    for fallback in fallback_questions(first_skill) {
        if questions.len() >= MIN_QUESTIONS {
            break;
        }
        if !questions.contains(&fallback) {
            questions.push(fallback);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextCompletion};

    /// Scripted backend: per-model canned replies, records the models it was asked.
    #[derive(Default)]
    pub struct ScriptedBackend {
        replies: HashMap<String, Result<String, u16>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        pub fn reply(mut self, model: &str, text: &str) -> Self {
            self.replies.insert(model.to_string(), Ok(text.to_string()));
            self
        }

        pub fn fail(mut self, model: &str, status: u16) -> Self {
            self.replies.insert(model.to_string(), Err(status));
            self
        }

        pub fn called(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextCompletion for ScriptedBackend {
        async fn complete(&self, model: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(model.to_string());
            match self.replies.get(model) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(status)) => Err(LlmError::Api {
                    status: *status,
                    message: format!("{model} unavailable"),
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }
}
