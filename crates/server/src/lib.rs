//! HTTP server for the bartender.
//!
//! This crate contains the `BartenderService` orchestrator, which ties
//! sessions, questions, recommendations and phrasing together, and the
//! axum router that exposes it.

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod router;

pub use config::ServerConfig;
pub use orchestrator::{AnswerReply, BartenderService, Health};
pub use router::{build_router, spawn_session_sweeper, start_server};
