//! Error taxonomy for the synchronization engine.
//!
//! Callers pattern-match on these variants to decide between retry, song
//! skip, and surfacing the failure. Budget exhaustion is deliberately absent:
//! it is a normal stop condition and the collectors return the partial result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A required UI element is not visible. Usually recoverable by retrying
    /// or falling back to another capture mode.
    #[error("ui element not found: {0}")]
    NotFound(&'static str),

    /// An element reference outlived its UI node. Terminates the current
    /// session, never the process.
    #[error("stale reference to {0}")]
    StaleReference(&'static str),

    /// OCR or language identification returned nothing usable.
    #[error("recognition produced no usable text")]
    Recognition,

    /// The anchor window does not contain advanceable content (one or fewer
    /// usable line groups) — the live session cannot continue.
    #[error("no advanceable content in lyric window")]
    NoAdvanceableContent,

    /// Tracking was disabled for this session after a stale click; further
    /// polls are refused until a fresh session is started.
    #[error("tracking disabled for this session: {0}")]
    SessionDisabled(&'static str),
}

impl EngineError {
    /// Whether the caller may retry within the same session.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::NotFound(_) | EngineError::Recognition)
    }
}
