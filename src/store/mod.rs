//! Persistence seam for quiz control state
//!
//! The control core never talks to a database directly. It reads through
//! [`QuizStore`] and writes a whole transition at once with
//! [`QuizStore::commit`], which checks the version the caller read so that
//! two admins racing on the same event cannot both win.

use std::future::Future;

use web_time::SystemTime;

use crate::{
    error::Result,
    ids::{EventId, PeriodId, QuestionId},
    model::{Period, PeriodQuestion, QuestionDisplay, QuizControl},
};

pub mod memory;

pub use memory::MemoryStore;

/// A staged write to the question display table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayWrite {
    /// Record that a question became visible
    Open(QuestionDisplay),
    /// Stamp `closed_at` on the display matching both ids
    Close {
        /// Period the question is shown in
        period_id: PeriodId,
        /// The question being closed
        question_id: QuestionId,
        /// Closing time
        closed_at: SystemTime,
    },
}

/// Everything a single transition writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCommit {
    /// The control row as it should look after the transition
    pub control: QuizControl,
    /// Display records to write alongside the row
    pub displays: Vec<DisplayWrite>,
}

impl ControlCommit {
    /// A commit touching only the control row
    pub fn control_only(control: QuizControl) -> Self {
        Self {
            control,
            displays: Vec::new(),
        }
    }
}

/// Storage used by the quiz control core
///
/// Implementations must apply [`ControlCommit`]s all-or-nothing: either
/// the display writes and the control row are all stored, or none are.
pub trait QuizStore: Send + Sync {
    /// Loads the control row of an event
    fn control(
        &self,
        event_id: EventId,
    ) -> impl Future<Output = Result<Option<QuizControl>>> + Send;

    /// Stores the initial control row of an event
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` if the event already has a control row.
    fn insert_control(
        &self,
        control: QuizControl,
    ) -> impl Future<Output = Result<QuizControl>> + Send;

    /// Loads a single period
    fn period(&self, period_id: PeriodId) -> impl Future<Output = Result<Option<Period>>> + Send;

    /// Loads all periods of an event, in no particular order
    fn periods(&self, event_id: EventId) -> impl Future<Output = Result<Vec<Period>>> + Send;

    /// Loads the question associations of a period, in no particular order
    fn period_questions(
        &self,
        period_id: PeriodId,
    ) -> impl Future<Output = Result<Vec<PeriodQuestion>>> + Send;

    /// Loads the display records of a question within a period
    fn question_displays(
        &self,
        period_id: PeriodId,
        question_id: QuestionId,
    ) -> impl Future<Output = Result<Vec<QuestionDisplay>>> + Send;

    /// Applies a transition if the stored row still has `expected_version`
    ///
    /// On success the stored row carries `expected_version + 1` and a fresh
    /// `updated_at`, and is returned.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the event has no control row
    /// * `Conflict` if the stored version differs from `expected_version`
    /// * `Persistence` if a display close matches no record
    fn commit(
        &self,
        commit: ControlCommit,
        expected_version: u64,
    ) -> impl Future<Output = Result<QuizControl>> + Send;
}
