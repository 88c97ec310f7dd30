//! The bartender's questionnaire: a fixed script, a conditional flow over
//! it, and the session store that tracks each guest's answers.
//!
//! ## Example Usage
//! ```ignore
//! use questionnaire::{QuestionFlow, SessionStore};
//!
//! let flow = QuestionFlow::default();
//! let store = SessionStore::new(flow.len());
//! let id = store.create();
//!
//! let view = store.next_question(&id, &flow)?;
//! store.submit_answer(&id, "Beer".into())?;
//! ```

pub mod error;
pub mod flow;
pub mod script;
pub mod session;

pub use error::{QuestionnaireError, Result};
pub use flow::{QuestionFlow, QuestionView, condition_satisfied, resolve_question_view};
pub use script::{DependsOn, QuestionSpec, SCRIPT};
pub use session::{AnswerInput, Session, SessionId, SessionStore, SubmittedAnswer};
