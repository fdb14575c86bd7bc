//! Conversation controller — drives one `Session` through the interview steps.
//!
//! Each `Action` is handled to completion before the next one is accepted
//! (`&mut self`), including the awaited question generation call. Handlers
//! either commit a whole transition or return an `AppError` having changed
//! nothing; the error becomes a transient `Notice` and never enters the
//! transcript.

use std::path::PathBuf;

use tracing::info;

use crate::errors::{AppError, Notice};
use crate::interview::messages;
use crate::interview::models::{Role, Session, Step, TranscriptEntry};
use crate::interview::validation::{split_tech_stack, validate_field};
use crate::questions::QuestionGenerator;
use crate::storage::CandidateStore;

/// Something the candidate did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the greeting and open the dialogue.
    Start,
    /// Chat reply for one of the profile steps.
    Input(String),
    /// Tech stack form submission.
    TechStack(String),
    /// Draft answer for question `index` (1-based).
    Answer { index: usize, text: String },
    SubmitAnswers,
    EndEarly,
    Reset,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Input(_) => "input",
            Action::TechStack(_) => "tech_stack",
            Action::Answer { .. } => "answer",
            Action::SubmitAnswers => "submit_answers",
            Action::EndEarly => "end_early",
            Action::Reset => "reset",
        }
    }
}

/// What a handled action produced.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Transcript entries appended by this action, in order.
    pub appended: Vec<TranscriptEntry>,
    pub notice: Option<Notice>,
    /// Where the record was written, if this action finished the interview.
    pub saved_to: Option<PathBuf>,
}

impl Outcome {
    fn rejected(err: AppError) -> Self {
        Self {
            notice: Some(err.notice()),
            ..Self::default()
        }
    }
}

/// Result of a committed transition.
struct Transition {
    appended: Vec<TranscriptEntry>,
    finished: bool,
}

impl Transition {
    fn advanced(appended: Vec<TranscriptEntry>) -> Self {
        Self {
            appended,
            finished: false,
        }
    }

    fn finished(appended: Vec<TranscriptEntry>) -> Self {
        Self {
            appended,
            finished: true,
        }
    }

    fn unchanged() -> Self {
        Self::advanced(Vec::new())
    }
}

/// Owns one interview: its session, the question generator and the record sink.
pub struct Interview {
    session: Session,
    generator: QuestionGenerator,
    store: CandidateStore,
}

impl Interview {
    pub fn new(generator: QuestionGenerator, store: CandidateStore) -> Self {
        Self {
            session: Session::new(),
            generator,
            store,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn handle(&mut self, action: Action) -> Outcome {
        let result = match action {
            Action::Reset => {
                self.reset();
                return Outcome {
                    notice: Some(Notice::info("🔄 Starting a new conversation.")),
                    ..Outcome::default()
                };
            }
            Action::EndEarly => self.end_early(),
            _ if self.session.is_ended() => Err(AppError::SessionEnded),
            Action::Start => self.start(),
            Action::Input(input) => self.submit_field(&input),
            Action::TechStack(input) => self.submit_tech_stack(&input).await,
            Action::Answer { index, text } => self.set_answer(index, text),
            Action::SubmitAnswers => self.submit_answers(),
        };

        match result {
            Ok(transition) if transition.finished => {
                let mut outcome = Outcome {
                    appended: transition.appended,
                    ..Outcome::default()
                };
                self.persist(&mut outcome);
                outcome
            }
            Ok(transition) => Outcome {
                appended: transition.appended,
                ..Outcome::default()
            },
            Err(err) => Outcome::rejected(err),
        }
    }

    /// Replaces the session with a fresh one at `greeting`.
    pub fn reset(&mut self) {
        info!("Resetting session {}", self.session.id());
        self.session = Session::new();
    }

    fn expect_step(&self, step: Step, action: &'static str) -> Result<(), AppError> {
        if self.session.step == step {
            Ok(())
        } else {
            Err(AppError::UnexpectedAction {
                step: self.session.step,
                action,
            })
        }
    }

    fn advance(&mut self) {
        let from = self.session.step;
        self.session.step = from.next();
        info!(
            "Session {}: {} -> {}",
            self.session.id(),
            from,
            self.session.step
        );
    }

    fn start(&mut self) -> Result<Transition, AppError> {
        self.expect_step(Step::Greeting, Action::Start.name())?;
        let greeting = self.session.push(Role::Assistant, messages::GREETING);
        self.advance();
        Ok(Transition::advanced(vec![greeting]))
    }

    fn submit_field(&mut self, input: &str) -> Result<Transition, AppError> {
        let step = self.session.step;
        if !step.is_profile_field() {
            return Err(AppError::UnexpectedAction {
                step,
                action: "input",
            });
        }
        validate_field(step, input)?;

        let value = input.trim();
        self.session.profile.record(step, value.to_string());
        let user = self.session.push(Role::User, input);
        let assistant = self
            .session
            .push(Role::Assistant, messages::acknowledge(step, value));
        self.advance();
        Ok(Transition::advanced(vec![user, assistant]))
    }

    async fn submit_tech_stack(&mut self, input: &str) -> Result<Transition, AppError> {
        self.expect_step(Step::AskTechStack, "tech_stack")?;
        if input.trim().is_empty() {
            return Err(AppError::Validation(
                "Please list your tech stack before submitting. 🤔".to_string(),
            ));
        }

        let stack = split_tech_stack(input);
        info!(
            "Session {}: generating questions for {} skills",
            self.session.id(),
            stack.len()
        );
        let questions = self.generator.generate(&stack).await?;

        let summary = messages::tech_stack_summary(&stack);
        let listing = messages::question_listing(&questions);
        self.session.profile.tech_stack = stack;
        self.session.answers = (1..=questions.len()).map(|i| (i, String::new())).collect();
        self.session.questions = questions;

        let user = self.session.push(Role::User, summary);
        let assistant = self.session.push(Role::Assistant, listing);
        self.advance();
        Ok(Transition::advanced(vec![user, assistant]))
    }

    fn set_answer(&mut self, index: usize, text: String) -> Result<Transition, AppError> {
        self.expect_step(Step::TechnicalQuestions, "answer")?;
        let count = self.session.questions.len();
        let slot = self.session.answers.get_mut(&index).ok_or_else(|| {
            AppError::Validation(format!(
                "There is no question {index}. Pick a number between 1 and {count}."
            ))
        })?;
        *slot = text;
        Ok(Transition::unchanged())
    }

    fn submit_answers(&mut self) -> Result<Transition, AppError> {
        self.expect_step(Step::TechnicalQuestions, Action::SubmitAnswers.name())?;
        if self.session.next_unanswered().is_some() {
            return Err(AppError::Validation(messages::ANSWER_ALL.to_string()));
        }

        let block = messages::consolidated_answers(
            self.session
                .questions
                .iter()
                .zip(self.session.answers.values())
                .map(|(q, a)| (q.as_str(), a.as_str())),
        );
        let user = self.session.push(Role::User, block);
        let closing = self.session.push(Role::Assistant, messages::CLOSING);
        self.advance();
        Ok(Transition::finished(vec![user, closing]))
    }

    fn end_early(&mut self) -> Result<Transition, AppError> {
        match self.session.step {
            Step::Ended => Ok(Transition::unchanged()),
            Step::Greeting => Err(AppError::UnexpectedAction {
                step: Step::Greeting,
                action: "end_early",
            }),
            from => {
                let closing = self.session.push(Role::Assistant, messages::CLOSING);
                self.session.step = Step::Ended;
                info!("Session {} ended early at {}", self.session.id(), from);
                Ok(Transition::finished(vec![closing]))
            }
        }
    }

    fn persist(&self, outcome: &mut Outcome) {
        match self.store.save(&self.session) {
            Ok(path) => {
                outcome.notice = Some(Notice::success(format!(
                    "✅ Your data has been successfully saved as `{}`!",
                    path.display()
                )));
                outcome.saved_to = Some(path);
            }
            Err(e) => outcome.notice = Some(AppError::from(e).notice()),
        }
    }
}
