//! Persistence sink — one pretty-printed JSON file per finished interview.
//!
//! Writes go to a temp file in the target directory and are renamed into
//! place, so a failed write never leaves a half-written record behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::interview::models::{Profile, Session, TranscriptEntry};

pub const DEFAULT_DATA_DIR: &str = "candidate_data";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not move record into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// The on-disk shape of a saved interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
    pub ended: bool,
    pub candidate_info: Profile,
    pub technical_questions: Vec<String>,
    /// Keyed `Q1`, `Q2`, ... in question order.
    pub technical_answers: BTreeMap<String, String>,
    pub conversation_history: Vec<TranscriptEntry>,
}

impl CandidateRecord {
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            started_at: session.started_at(),
            saved_at: Utc::now(),
            ended: session.is_ended(),
            candidate_info: session.profile().clone(),
            technical_questions: session.questions().to_vec(),
            technical_answers: session
                .answers()
                .iter()
                .map(|(idx, answer)| (format!("Q{idx}"), answer.clone()))
                .collect(),
            conversation_history: session.transcript().to_vec(),
        }
    }
}

/// Directory-backed store for candidate records.
#[derive(Debug, Clone)]
pub struct CandidateStore {
    dir: PathBuf,
}

impl CandidateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a profile: `<name>_<email-local-part>.json`.
    pub fn path_for(&self, profile: &Profile) -> PathBuf {
        self.dir.join(record_file_name(profile))
    }

    /// Writes the session's record, replacing any earlier record for the same candidate.
    pub fn save(&self, session: &Session) -> Result<PathBuf, StorageError> {
        std::fs::create_dir_all(&self.dir)?;

        let record = CandidateRecord::from_session(session);
        let path = self.path_for(&record.candidate_info);

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, &record)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)?;

        info!("Saved candidate record for session {} to {}", session.id(), path.display());
        Ok(path)
    }

    #[cfg(test)]
    pub fn load(&self, path: &Path) -> Result<CandidateRecord, StorageError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn record_file_name(profile: &Profile) -> String {
    let name = sanitize(profile.full_name.as_deref().unwrap_or_default());
    let email_local = profile
        .email
        .as_deref()
        .and_then(|e| e.split('@').next())
        .map(sanitize)
        .unwrap_or_default();

    let name = if name.is_empty() {
        "unknown_candidate".to_string()
    } else {
        name
    };
    let email_local = if email_local.is_empty() {
        "noemail".to_string()
    } else {
        email_local
    };

    format!("{name}_{email_local}.json")
}

/// Spaces become underscores; path separators are dropped.
fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '/' && *c != '\\')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::{Role, Step};

    fn profile(name: Option<&str>, email: Option<&str>) -> Profile {
        Profile {
            full_name: name.map(str::to_string),
            email: email.map(str::to_string),
            ..Profile::default()
        }
    }

    #[test]
    fn test_file_name_from_name_and_email_prefix() {
        assert_eq!(
            record_file_name(&profile(Some("Jane Doe"), Some("jane.doe@example.com"))),
            "Jane_Doe_jane.doe.json"
        );
    }

    #[test]
    fn test_file_name_strips_path_separators() {
        assert_eq!(
            record_file_name(&profile(Some("../a/b\\c d"), Some("x/y@z.io"))),
            "..abc_d_xy.json"
        );
    }

    #[test]
    fn test_file_name_defaults_when_fields_missing() {
        assert_eq!(
            record_file_name(&profile(None, None)),
            "unknown_candidate_noemail.json"
        );
        assert_eq!(
            record_file_name(&profile(Some("Ann"), Some("@example.com"))),
            "Ann_noemail.json"
        );
    }

    #[test]
    fn test_save_writes_pretty_json_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = CandidateStore::new(dir.path().join("nested"));

        let mut session = Session::new();
        session.profile = profile(Some("Jane Doe"), Some("jane@example.com"));
        session.questions = vec!["What is Rust?".to_string()];
        session.answers.insert(1, "A language.".to_string());
        session.push(Role::User, "hello");
        session.step = Step::Ended;

        let path = store.save(&session).unwrap();

        assert_eq!(path, dir.path().join("nested").join("Jane_Doe_jane.json"));
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"candidate_info\""));

        let record = store.load(&path).unwrap();
        assert!(record.ended);
        assert_eq!(record.session_id, session.id());
        assert_eq!(record.technical_answers["Q1"], "A language.");
        assert_eq!(record.conversation_history.len(), 1);
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = CandidateStore::new(dir.path());

        let mut session = Session::new();
        session.profile = profile(Some("Sam"), Some("sam@x.io"));
        store.save(&session).unwrap();
        session.push(Role::Assistant, "bye");
        let path = store.save(&session).unwrap();

        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
        assert_eq!(store.load(&path).unwrap().conversation_history.len(), 1);
    }

    #[test]
    fn test_save_into_unwritable_location_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file").unwrap();
        let store = CandidateStore::new(&blocker);

        assert!(matches!(
            store.save(&Session::new()),
            Err(StorageError::Io(_))
        ));
    }
}
