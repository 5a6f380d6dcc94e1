//! Errors reported by the quiz control core
//!
//! Every failure is returned to the caller as a value. [`ActionResult`] is
//! the shape handed back to the admin console, carrying a success flag and
//! a message a human can read.

use serde::Serialize;
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{model::QuizControl, screen::Screen};

/// The kind of record a lookup failed to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum Entity {
    /// An event
    #[display("event")]
    Event,
    /// The per-event control row
    #[display("quiz control")]
    QuizControl,
    /// A period of an event
    #[display("period")]
    Period,
    /// A question
    #[display("question")]
    Question,
    /// The association placing a question inside a period
    #[display("period question")]
    PeriodQuestion,
    /// A question display window
    #[display("question display")]
    QuestionDisplay,
}

/// Errors produced while advancing or reading quiz control state
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced record does not exist
    #[error("{0} {1} was not found")]
    NotFound(Entity, String),
    /// A record with the same key already exists
    #[error("{0} {1} already exists")]
    AlreadyExists(Entity, String),
    /// The requested screen is not reachable from the current one
    #[error("cannot transition from {from} to {to}")]
    InvalidTransition {
        /// Screen the event is currently on
        from: Screen,
        /// Screen that was requested
        to: Screen,
    },
    /// The control row lacks data the transition needs
    #[error("current state is inconsistent: {0}")]
    InvalidState(&'static str),
    /// Another writer committed first
    #[error("quiz control changed concurrently (expected version {expected}, found {actual})")]
    Conflict {
        /// Version the caller read
        expected: u64,
        /// Version found at commit time
        actual: u64,
    },
    /// The caller is not an authenticated admin
    #[error("admin authentication required")]
    Unauthorized,
    /// A record failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] garde::Report),
    /// The backing store failed to read or write
    #[error("persistence failure: {0}")]
    Persistence(String),
}

/// Result type used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Outcome of an admin action, as reported back to the console
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    /// Whether the action was applied
    pub success: bool,
    /// Human readable description of the outcome
    pub message: String,
    /// The committed control row, on success
    pub control: Option<QuizControl>,
}

impl From<Result<QuizControl>> for ActionResult {
    fn from(result: Result<QuizControl>) -> Self {
        match result {
            Ok(control) => Self {
                success: true,
                message: format!("moved to {}", control.current_screen.label()),
                control: Some(control),
            },
            Err(error) => Self {
                success: false,
                message: error.to_string(),
                control: None,
            },
        }
    }
}
