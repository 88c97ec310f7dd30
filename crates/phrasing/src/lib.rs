//! Natural-language replies for the bartender.
//!
//! This crate provides:
//! - `PhrasingService`, the async seam the server talks to
//! - `OpenAiPhraser` for OpenAI-compatible chat completion APIs
//! - `TimeoutPhraser`, which bounds any service by a deadline
//! - `StaticPhraser` for offline use and tests
//! - Prompt builders for intermediate banter and the final pitch
//!
//! Callers treat every error as "use the fallback line"; nothing here is
//! allowed to fail a guest's request.

pub mod error;
pub mod openai;
pub mod prompts;
pub mod service;

pub use error::PhrasingError;
pub use openai::OpenAiPhraser;
pub use prompts::FALLBACK_RESPONSE;
pub use service::{DEFAULT_TIMEOUT, PhrasingRequest, PhrasingService, StaticPhraser, TimeoutPhraser};
