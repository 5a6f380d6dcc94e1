//! Quiz screens and the transition rule table
//!
//! A quiz event is always showing exactly one screen. The admin moves the
//! event forward one screen at a time, and only along the edges listed in
//! the rule table below. `FinalResult` has no outgoing edges.

use std::{fmt::Display, str::FromStr};

use enum_map::{Enum, EnumMap, enum_map};
use heck::ToTitleCase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The screen currently presented to the monitor and participants
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Enum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Lobby shown before the first question
    #[default]
    Waiting,
    /// The question is being read out, answers are not yet accepted
    QuestionReading,
    /// The question is open for answers
    Question,
    /// Answers are closed and being checked
    AnswerCheck,
    /// The correct answer is revealed
    Answer,
    /// Intermission between questions
    Break,
    /// Results of the current period
    PeriodResult,
    /// Results of the whole event
    FinalResult,
}

/// Error returned when a screen name is not one of the known screens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown screen `{0}`")]
pub struct ParseScreenError(String);

impl Screen {
    /// All screens, in the order the admin console lists them
    pub const ALL: [Screen; 8] = [
        Screen::Waiting,
        Screen::QuestionReading,
        Screen::Question,
        Screen::AnswerCheck,
        Screen::Answer,
        Screen::Break,
        Screen::PeriodResult,
        Screen::FinalResult,
    ];

    /// Screens this screen may advance to
    pub const fn permitted_next(self) -> &'static [Screen] {
        match self {
            Screen::Waiting => &[Screen::QuestionReading],
            Screen::QuestionReading => &[Screen::Question],
            Screen::Question => &[Screen::AnswerCheck],
            Screen::AnswerCheck => &[Screen::Answer],
            Screen::Answer => &[Screen::QuestionReading, Screen::Break, Screen::PeriodResult],
            Screen::Break => &[Screen::QuestionReading, Screen::PeriodResult],
            Screen::PeriodResult => &[Screen::QuestionReading, Screen::FinalResult],
            Screen::FinalResult => &[],
        }
    }

    /// Whether the rule table has an edge from `self` to `target`
    pub fn can_advance_to(self, target: Screen) -> bool {
        self.permitted_next().contains(&target)
    }

    /// Whether no further transition is possible
    pub fn is_terminal(self) -> bool {
        self.permitted_next().is_empty()
    }

    /// The snake_case name used in storage and on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Screen::Waiting => "waiting",
            Screen::QuestionReading => "question_reading",
            Screen::Question => "question",
            Screen::AnswerCheck => "answer_check",
            Screen::Answer => "answer",
            Screen::Break => "break",
            Screen::PeriodResult => "period_result",
            Screen::FinalResult => "final_result",
        }
    }

    /// Human readable label for admin console buttons, e.g. "Question Reading"
    pub fn label(self) -> String {
        self.as_str().to_title_case()
    }
}

/// The full rule table, indexed by the screen being left
pub fn transition_rules() -> EnumMap<Screen, &'static [Screen]> {
    enum_map! {
        screen => screen.permitted_next(),
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = ParseScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| ParseScreenError(s.to_owned()))
    }
}
