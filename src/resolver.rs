//! Next-question and next-period resolution
//!
//! Both resolvers walk display order numbers: questions are ordered within
//! their period, periods within their event. "Nothing left" is an ordinary
//! `Ok(None)`, while a reference that does not exist is an error because it
//! means the stored data is inconsistent.

use crate::{
    error::{Entity, Error, Result},
    ids::{EventId, PeriodId, QuestionId},
    store::QuizStore,
};

/// Finds the question that follows `current_question_id` in a period
///
/// With no current question, the period's first question is returned.
/// Returns `Ok(None)` once the current question is the period's last.
///
/// # Errors
///
/// * `NotFound(Question)` if there is no current question and the period is empty
/// * `NotFound(PeriodQuestion)` if the current question is not part of the period
pub async fn next_question<S: QuizStore>(
    store: &S,
    period_id: PeriodId,
    current_question_id: Option<QuestionId>,
) -> Result<Option<QuestionId>> {
    let links = store.period_questions(period_id).await?;

    let Some(current_question_id) = current_question_id else {
        let first = links
            .iter()
            .min_by_key(|pq| pq.order_num)
            .map(|pq| pq.question_id)
            .ok_or_else(|| {
                Error::NotFound(Entity::Question, format!("any question in period {period_id}"))
            })?;
        tracing::debug!(%period_id, question_id = %first, "resolved first question");
        return Ok(Some(first));
    };

    let current_order = links
        .iter()
        .find(|pq| pq.question_id == current_question_id)
        .map(|pq| pq.order_num)
        .ok_or_else(|| {
            Error::NotFound(
                Entity::PeriodQuestion,
                format!("{current_question_id} in period {period_id}"),
            )
        })?;

    let next = links
        .iter()
        .filter(|pq| pq.order_num > current_order)
        .min_by_key(|pq| pq.order_num)
        .map(|pq| pq.question_id);
    tracing::debug!(%period_id, %current_question_id, next = ?next, "resolved next question");

    Ok(next)
}

/// Finds the period that follows `current_period_id` in an event
///
/// Returns `Ok(None)` once the current period is the event's last.
///
/// # Errors
///
/// `NotFound(Period)` if the current period does not exist in the event.
pub async fn next_period<S: QuizStore>(
    store: &S,
    event_id: EventId,
    current_period_id: PeriodId,
) -> Result<Option<PeriodId>> {
    let current_order = store
        .period(current_period_id)
        .await?
        .filter(|p| p.event_id == event_id)
        .map(|p| p.order_num)
        .ok_or_else(|| Error::NotFound(Entity::Period, current_period_id.to_string()))?;

    let next = store
        .periods(event_id)
        .await?
        .into_iter()
        .filter(|p| p.order_num > current_order)
        .min_by_key(|p| p.order_num)
        .map(|p| p.id);
    tracing::debug!(%event_id, %current_period_id, next = ?next, "resolved next period");

    Ok(next)
}

/// Finds the first period of an event
///
/// # Errors
///
/// `NotFound(Period)` if the event has no periods.
pub async fn first_period<S: QuizStore>(store: &S, event_id: EventId) -> Result<PeriodId> {
    store
        .periods(event_id)
        .await?
        .into_iter()
        .min_by_key(|p| p.order_num)
        .map(|p| p.id)
        .ok_or_else(|| Error::NotFound(Entity::Period, format!("any period in event {event_id}")))
}
