use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position in the fixed interview sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Greeting,
    AskName,
    AskEmail,
    AskPhone,
    AskExperience,
    AskPosition,
    AskLocation,
    AskTechStack,
    TechnicalQuestions,
    Ended,
}

impl Step {
    /// The successor in the fixed order. `Ended` is its own successor.
    pub fn next(self) -> Step {
        match self {
            Step::Greeting => Step::AskName,
            Step::AskName => Step::AskEmail,
            Step::AskEmail => Step::AskPhone,
            Step::AskPhone => Step::AskExperience,
            Step::AskExperience => Step::AskPosition,
            Step::AskPosition => Step::AskLocation,
            Step::AskLocation => Step::AskTechStack,
            Step::AskTechStack => Step::TechnicalQuestions,
            Step::TechnicalQuestions | Step::Ended => Step::Ended,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Greeting => "greeting",
            Step::AskName => "ask_name",
            Step::AskEmail => "ask_email",
            Step::AskPhone => "ask_phone",
            Step::AskExperience => "ask_experience",
            Step::AskPosition => "ask_position",
            Step::AskLocation => "ask_location",
            Step::AskTechStack => "ask_tech_stack",
            Step::TechnicalQuestions => "technical_questions",
            Step::Ended => "ended",
        }
    }

    /// True for the six chat steps that collect a single profile field.
    pub fn is_profile_field(&self) -> bool {
        matches!(
            self,
            Step::AskName
                | Step::AskEmail
                | Step::AskPhone
                | Step::AskExperience
                | Step::AskPosition
                | Step::AskLocation
        )
    }

    /// Input placeholder shown while waiting at this step.
    pub fn hint(&self) -> &'static str {
        match self {
            Step::Greeting => "Say hi to get started.",
            Step::AskName => "👤 What's your full name?",
            Step::AskEmail => "📧 Could you please share your email address?",
            Step::AskPhone => "📞 What's your phone number?",
            Step::AskExperience => {
                "💼 How many years of professional experience do you have? (e.g., 5)"
            }
            Step::AskPosition => {
                "🎯 What kind of position(s) are you interested in? (e.g., Software Engineer, Data Scientist)"
            }
            Step::AskLocation => {
                "🌍 What's your current or preferred work location? (e.g., Bengaluru, Remote)"
            }
            Step::AskTechStack => {
                "🛠️ List your tech stack separated by commas (e.g., Python, Django, React, Kubernetes)."
            }
            Step::TechnicalQuestions => "📝 Answer each question, then submit all answers.",
            Step::Ended => "🎉 Conversation completed. Start a new conversation to begin again.",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

/// Candidate attributes assembled across the profile steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_years: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub tech_stack: Vec<String>,
}

impl Profile {
    /// Stores `value` in the field collected at `step`. Non-field steps are ignored.
    pub(crate) fn record(&mut self, step: Step, value: String) {
        let slot = match step {
            Step::AskName => &mut self.full_name,
            Step::AskEmail => &mut self.email,
            Step::AskPhone => &mut self.phone,
            Step::AskExperience => &mut self.experience_years,
            Step::AskPosition => &mut self.position,
            Step::AskLocation => &mut self.location,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// State of one interview. Mutated only by the controller.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) id: Uuid,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) step: Step,
    pub(crate) profile: Profile,
    pub(crate) transcript: Vec<TranscriptEntry>,
    pub(crate) questions: Vec<String>,
    pub(crate) answers: BTreeMap<usize, String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            step: Step::Greeting,
            profile: Profile::default(),
            transcript: Vec::new(),
            questions: Vec::new(),
            answers: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn is_ended(&self) -> bool {
        self.step == Step::Ended
    }

    /// 1-based index of the first question whose answer is still blank.
    pub fn next_unanswered(&self) -> Option<usize> {
        self.answers
            .iter()
            .find(|(_, answer)| answer.trim().is_empty())
            .map(|(index, _)| *index)
    }

    pub(crate) fn push(&mut self, role: Role, content: impl Into<String>) -> TranscriptEntry {
        let entry = TranscriptEntry {
            role,
            content: content.into(),
        };
        self.transcript.push(entry.clone());
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_is_total_and_forward() {
        let mut step = Step::Greeting;
        let mut seen = vec![step];
        while step != Step::Ended {
            let next = step.next();
            assert!(next > step, "{next} must come after {step}");
            step = next;
            seen.push(step);
        }
        assert_eq!(seen.len(), 10);
        assert_eq!(Step::Ended.next(), Step::Ended);
    }

    #[test]
    fn test_profile_field_steps() {
        let fields: Vec<Step> = [
            Step::Greeting,
            Step::AskName,
            Step::AskEmail,
            Step::AskPhone,
            Step::AskExperience,
            Step::AskPosition,
            Step::AskLocation,
            Step::AskTechStack,
            Step::TechnicalQuestions,
            Step::Ended,
        ]
        .into_iter()
        .filter(Step::is_profile_field)
        .collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0], Step::AskName);
        assert_eq!(fields[5], Step::AskLocation);
    }

    #[test]
    fn test_step_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Step::TechnicalQuestions).unwrap(),
            "\"technical_questions\""
        );
        assert_eq!(Step::AskTechStack.to_string(), "ask_tech_stack");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let entry = TranscriptEntry {
            role: Role::Assistant,
            content: "hi".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_profile_record_ignores_non_field_steps() {
        let mut profile = Profile::default();
        profile.record(Step::AskTechStack, "Rust".into());
        profile.record(Step::AskEmail, "a@b.co".into());
        assert_eq!(profile.email.as_deref(), Some("a@b.co"));
        assert_eq!(
            profile,
            Profile {
                email: Some("a@b.co".into()),
                ..Profile::default()
            }
        );
    }

    #[test]
    fn test_new_session_is_empty_greeting() {
        let session = Session::new();
        assert_eq!(session.step(), Step::Greeting);
        assert!(session.transcript().is_empty());
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
        assert!(!session.is_ended());
        assert_eq!(session.next_unanswered(), None);
    }
}
