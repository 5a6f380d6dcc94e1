//! Per-screen transition handlers
//!
//! A handler takes the control row as loaded and stages what entering its
//! screen means: which period and question become current, which
//! timestamps are stamped, and which question display records are opened
//! or closed. Handlers only read from the store; the staged
//! [`ControlCommit`] is written by the advancer in a single commit.

use web_time::SystemTime;

use crate::{
    error::{Error, Result},
    model::{QuestionDisplay, QuizControl},
    resolver,
    screen::Screen,
    store::{ControlCommit, DisplayWrite, QuizStore},
};

/// Stages the transition of `control` into `target`
///
/// The rule table is not consulted here; callers validate first.
///
/// # Errors
///
/// Propagates the error of the handler associated with `target`.
pub async fn stage<S: QuizStore>(
    store: &S,
    control: &QuizControl,
    target: Screen,
    now: SystemTime,
) -> Result<ControlCommit> {
    let mut commit = match target {
        Screen::QuestionReading => handle_question_reading(store, control).await?,
        Screen::Question => handle_question(control, now)?,
        Screen::Answer => handle_answer(control, now)?,
        Screen::PeriodResult => handle_period_result(store, control).await?,
        Screen::Waiting | Screen::AnswerCheck | Screen::Break | Screen::FinalResult => {
            ControlCommit::control_only(control.clone())
        }
    };
    commit.control.current_screen = target;
    Ok(commit)
}

/// Selects the question to read out next
///
/// The period is chosen by where the event comes from:
///
/// * from the waiting screen, the already selected period or else the
///   event's first period, starting at its first question
/// * from the period result screen, the period resolved as next, starting
///   at its first question
/// * otherwise the current period, continuing after the current question
///
/// # Errors
///
/// * `InvalidState` if there is no period to continue, or the period has
///   no question left (the admin should have moved to the period result)
/// * any resolver error
pub async fn handle_question_reading<S: QuizStore>(
    store: &S,
    control: &QuizControl,
) -> Result<ControlCommit> {
    let (period_id, current_question_id) = match control.current_screen {
        Screen::Waiting => match control.current_period_id {
            Some(period_id) => (period_id, None),
            None => (resolver::first_period(store, control.event_id).await?, None),
        },
        Screen::PeriodResult => (
            control
                .next_period_id
                .ok_or(Error::InvalidState("no period follows the current one"))?,
            None,
        ),
        _ => (
            control
                .current_period_id
                .ok_or(Error::InvalidState("no current period"))?,
            control.current_question_id,
        ),
    };

    let question_id = resolver::next_question(store, period_id, current_question_id)
        .await?
        .ok_or(Error::InvalidState("no question remains in the current period"))?;

    Ok(ControlCommit::control_only(QuizControl {
        current_period_id: Some(period_id),
        current_question_id: Some(question_id),
        question_displayed_at: None,
        question_closed_at: None,
        next_period_id: None,
        ..control.clone()
    }))
}

/// Opens the current question for answers
///
/// # Errors
///
/// `InvalidState` if the row has no current period or question.
pub fn handle_question(control: &QuizControl, now: SystemTime) -> Result<ControlCommit> {
    let (Some(period_id), Some(question_id)) =
        (control.current_period_id, control.current_question_id)
    else {
        return Err(Error::InvalidState("no current period or question"));
    };

    Ok(ControlCommit {
        control: QuizControl {
            question_displayed_at: Some(now),
            question_closed_at: None,
            ..control.clone()
        },
        displays: vec![DisplayWrite::Open(QuestionDisplay {
            period_id,
            question_id,
            displayed_at: now,
            closed_at: None,
        })],
    })
}

/// Closes the display window of the current question
///
/// Closing twice is allowed and moves `closed_at` to the later time.
///
/// # Errors
///
/// `InvalidState` if the row has no current period or question. A close
/// that matches no display record fails later, at commit.
pub fn handle_answer(control: &QuizControl, now: SystemTime) -> Result<ControlCommit> {
    let (Some(period_id), Some(question_id)) =
        (control.current_period_id, control.current_question_id)
    else {
        return Err(Error::InvalidState("no current period or question"));
    };

    Ok(ControlCommit {
        control: QuizControl {
            question_closed_at: Some(now),
            ..control.clone()
        },
        displays: vec![DisplayWrite::Close {
            period_id,
            question_id,
            closed_at: now,
        }],
    })
}

/// Resolves which period, if any, follows the current one
///
/// The result is kept on the row as `next_period_id`, which decides
/// whether the period result screen leads to another period or to the
/// final result.
///
/// # Errors
///
/// `InvalidState` if the row has no current period, or any resolver error.
pub async fn handle_period_result<S: QuizStore>(
    store: &S,
    control: &QuizControl,
) -> Result<ControlCommit> {
    let period_id = control
        .current_period_id
        .ok_or(Error::InvalidState("no current period"))?;

    let next_period_id = resolver::next_period(store, control.event_id, period_id).await?;

    Ok(ControlCommit::control_only(QuizControl {
        next_period_id,
        ..control.clone()
    }))
}
