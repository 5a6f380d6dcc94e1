//! Records owned by a quiz event
//!
//! The control row is the only record the state machine mutates. Periods,
//! questions and their ordering are read to decide where the event goes
//! next, and question displays record when each question was open.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use web_time::SystemTime;

use crate::{
    ids::{EventId, PeriodId, QuestionId},
    screen::Screen,
};

/// A quiz event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Event {
    /// Identifier of the event
    #[garde(skip)]
    pub id: EventId,
    /// Name shown on the monitor
    #[garde(length(max = crate::constants::event::MAX_NAME_LENGTH))]
    pub name: String,
}

/// An ordered segment of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Period {
    /// Identifier of the period
    #[garde(skip)]
    pub id: PeriodId,
    /// Event owning the period
    #[garde(skip)]
    pub event_id: EventId,
    /// Display order within the event
    #[garde(skip)]
    pub order_num: u32,
    /// Name shown on the period result screen
    #[garde(length(
        min = crate::constants::period::MIN_NAME_LENGTH,
        max = crate::constants::period::MAX_NAME_LENGTH
    ))]
    pub name: String,
}

/// A question that can be attached to one or more periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Identifier of the question
    #[garde(skip)]
    pub id: QuestionId,
    /// The question as read out
    #[garde(length(max = crate::constants::question::MAX_TEXT_LENGTH))]
    pub text: String,
}

/// Places a question inside a period at a given position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodQuestion {
    /// Period the question belongs to
    pub period_id: PeriodId,
    /// The question
    pub question_id: QuestionId,
    /// Display order within the period
    pub order_num: u32,
}

/// The window during which a question was shown in a period
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDisplay {
    /// Period the question was shown in
    pub period_id: PeriodId,
    /// The question shown
    pub question_id: QuestionId,
    /// When the question became visible
    pub displayed_at: SystemTime,
    /// When the question stopped accepting answers
    pub closed_at: Option<SystemTime>,
}

/// The per-event control row
///
/// Screen, period and question always move together: a row is only ever
/// replaced as a whole by a commit.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizControl {
    /// Event this row controls
    pub event_id: EventId,
    /// Screen currently presented
    pub current_screen: Screen,
    /// Active period, `None` before the first period starts
    pub current_period_id: Option<PeriodId>,
    /// Active question, `None` when no question is selected
    pub current_question_id: Option<QuestionId>,
    /// When the current question was opened for answers
    pub question_displayed_at: Option<SystemTime>,
    /// When the current question stopped accepting answers
    pub question_closed_at: Option<SystemTime>,
    /// Period that follows the current one, resolved on the period result screen
    pub next_period_id: Option<PeriodId>,
    /// Incremented on every commit
    pub version: u64,
    /// Time of the last commit
    pub updated_at: SystemTime,
}

impl QuizControl {
    /// Creates the row a freshly provisioned event starts with
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            current_screen: Screen::Waiting,
            current_period_id: None,
            current_question_id: None,
            question_displayed_at: None,
            question_closed_at: None,
            next_period_id: None,
            version: 0,
            updated_at: SystemTime::now(),
        }
    }

    /// Screens the admin may move to from here
    ///
    /// This is the rule table narrowed by what is already known about the
    /// event: on the period result screen exactly one of "next period" and
    /// "final result" is offered, depending on whether a later period exists.
    pub fn enabled_transitions(&self) -> Vec<Screen> {
        self.current_screen
            .permitted_next()
            .iter()
            .copied()
            .filter(|&target| self.is_enabled(target))
            .collect_vec()
    }

    /// Whether `target` is reachable from this row
    pub fn can_advance_to(&self, target: Screen) -> bool {
        self.current_screen.can_advance_to(target) && self.is_enabled(target)
    }

    fn is_enabled(&self, target: Screen) -> bool {
        match (self.current_screen, target) {
            (Screen::PeriodResult, Screen::QuestionReading) => self.next_period_id.is_some(),
            (Screen::PeriodResult, Screen::FinalResult) => self.next_period_id.is_none(),
            _ => true,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_new_control_is_waiting() {
        let event_id = EventId::new();
        let control = QuizControl::new(event_id);

        assert_eq!(control.event_id, event_id);
        assert_eq!(control.current_screen, Screen::Waiting);
        assert!(control.current_period_id.is_none());
        assert!(control.current_question_id.is_none());
        assert_eq!(control.version, 0);
        assert_eq!(control.enabled_transitions(), vec![Screen::QuestionReading]);
    }

    #[test]
    fn test_period_result_offers_next_period() {
        let mut control = QuizControl::new(EventId::new());
        control.current_screen = Screen::PeriodResult;
        control.next_period_id = Some(PeriodId::new());

        assert_eq!(control.enabled_transitions(), vec![Screen::QuestionReading]);
        assert!(!control.can_advance_to(Screen::FinalResult));
    }

    #[test]
    fn test_period_result_offers_final_result() {
        let mut control = QuizControl::new(EventId::new());
        control.current_screen = Screen::PeriodResult;

        assert_eq!(control.enabled_transitions(), vec![Screen::FinalResult]);
        assert!(!control.can_advance_to(Screen::QuestionReading));
    }

    #[test]
    fn test_answer_offers_all_rule_table_edges() {
        let mut control = QuizControl::new(EventId::new());
        control.current_screen = Screen::Answer;

        assert_eq!(
            control.enabled_transitions(),
            vec![Screen::QuestionReading, Screen::Break, Screen::PeriodResult]
        );
    }

    #[test]
    fn test_final_result_offers_nothing() {
        let mut control = QuizControl::new(EventId::new());
        control.current_screen = Screen::FinalResult;

        assert!(control.enabled_transitions().is_empty());
    }

    #[test]
    fn test_period_name_validation() {
        let mut period = Period {
            id: PeriodId::new(),
            event_id: EventId::new(),
            order_num: 1,
            name: "First half".to_owned(),
        };
        assert!(period.validate().is_ok());

        period.name = String::new();
        assert!(period.validate().is_err());

        period.name = "x".repeat(crate::constants::period::MAX_NAME_LENGTH + 1);
        assert!(period.validate().is_err());
    }

    #[test]
    fn test_question_text_validation() {
        let question = Question {
            id: QuestionId::new(),
            text: "x".repeat(crate::constants::question::MAX_TEXT_LENGTH + 1),
        };
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_control_serialization_skips_empty_fields() {
        let control = QuizControl::new(EventId::new());
        let json = serde_json::to_string(&control).unwrap();

        assert!(json.contains("\"current_screen\":\"waiting\""));
        assert!(!json.contains("current_period_id"));
        assert!(!json.contains("question_closed_at"));
    }
}
