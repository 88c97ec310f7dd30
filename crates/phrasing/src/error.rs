//! Errors from the phrasing service.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhrasingError {
    #[error("Phrasing request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Phrasing request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Phrasing service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Phrasing service returned no text")]
    EmptyResponse,

    #[error("No API key configured for the phrasing service")]
    MissingApiKey,
}
