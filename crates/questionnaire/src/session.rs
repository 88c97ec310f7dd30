//! In-memory session store.
//!
//! The table maps ids to individually locked sessions. Lookups take the
//! table's read lock briefly; every mutation of a session then happens
//! under that session's own mutex, so two submits for the same id run one
//! after the other while different sessions proceed independently.

use crate::error::{QuestionnaireError, Result};
use crate::flow::{QuestionFlow, QuestionView};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

pub type SessionId = String;

/// One guest's progress through the questionnaire.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub question_index: usize,
    pub answers: Vec<String>,
    pub speech_enabled: bool,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            question_index: 0,
            answers: Vec::new(),
            speech_enabled: true,
            last_active: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}

/// An answer as sent by a client: a single string or a list of selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerInput {
    /// The recorded form. Lists keep only their first element.
    pub fn into_answer(self) -> String {
        match self {
            Self::Single(answer) => answer,
            Self::Multiple(answers) => answers.into_iter().next().unwrap_or_default(),
        }
    }
}

impl From<&str> for AnswerInput {
    fn from(answer: &str) -> Self {
        Self::Single(answer.to_string())
    }
}

/// Result of a successful `submit_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    /// Index of the question that was just answered.
    pub previous_index: usize,
    pub question_index: usize,
    pub answers: Vec<String>,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    question_count: usize,
}

impl SessionStore {
    /// `question_count` bounds how many answers a session accepts.
    pub fn new(question_count: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            question_count,
        }
    }

    pub fn create(&self) -> SessionId {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Mutex::new(Session::new(id.clone())));
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), session);

        info!(session = %id, "Session created");
        id
    }

    fn handle(&self, id: &str) -> Result<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| QuestionnaireError::InvalidSession(id.to_string()))
    }

    /// Run `f` on the session while holding its lock.
    pub fn update<T>(&self, id: &str, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let handle = self.handle(id)?;
        let mut session = handle.lock().unwrap_or_else(PoisonError::into_inner);
        session.touch();
        Ok(f(&mut session))
    }

    /// Snapshot of a session. Unknown ids are an error; nothing is created.
    pub fn get(&self, id: &str) -> Result<Session> {
        self.update(id, |session| session.clone())
    }

    pub fn submit_answer(&self, id: &str, answer: AnswerInput) -> Result<SubmittedAnswer> {
        let question_count = self.question_count;
        self.update(id, |session| {
            if session.question_index >= question_count {
                return Err(QuestionnaireError::NoMoreQuestions);
            }

            let previous_index = session.question_index;
            session.answers.push(answer.into_answer());
            session.question_index += 1;

            debug!(
                session = %session.id,
                question = previous_index,
                answers = ?session.answers,
                "Answer recorded"
            );

            Ok(SubmittedAnswer {
                previous_index,
                question_index: session.question_index,
                answers: session.answers.clone(),
            })
        })?
    }

    /// Start over. The speech preference survives.
    pub fn reset(&self, id: &str) -> Result<()> {
        self.update(id, |session| {
            session.question_index = 0;
            session.answers.clear();
        })?;
        info!(session = %id, "Session reset");
        Ok(())
    }

    pub fn set_speech_enabled(&self, id: &str, enabled: bool) -> Result<()> {
        self.update(id, |session| session.speech_enabled = enabled)
    }

    /// Pick the next question for the session and persist any skips.
    ///
    /// Selection and the index update happen under one lock, so a
    /// concurrent reset is never overwritten by a stale skip. The index
    /// only moves forward.
    pub fn next_question(&self, id: &str, flow: &QuestionFlow) -> Result<QuestionView> {
        self.update(id, |session| {
            let view = flow.next_question(session)?;
            session.question_index = session.question_index.max(view.index);
            Ok(view)
        })?
    }

    pub fn close(&self, id: &str) -> Result<()> {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);

        match removed {
            Some(_) => {
                info!(session = %id, "Session closed");
                Ok(())
            }
            None => Err(QuestionnaireError::InvalidSession(id.to_string())),
        }
    }

    /// Drop sessions idle for at least `ttl`. Returns how many were removed.
    pub fn purge_expired(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();

        sessions.retain(|_, session| {
            let session = session.lock().unwrap_or_else(PoisonError::into_inner);
            now.duration_since(session.last_active) < ttl
        });

        let purged = before - sessions.len();
        if purged > 0 {
            info!(purged, remaining = sessions.len(), "Expired sessions purged");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
