//! In-process implementation of [`QuizStore`]
//!
//! All tables live behind one lock, which makes every commit atomic with
//! respect to every other store call. Besides the trait operations, the
//! store offers the provisioning calls used to set up an event.

use std::collections::{HashMap, hash_map::Entry};

use garde::Validate;
use itertools::Itertools;
use tokio::sync::RwLock;
use web_time::SystemTime;

use super::{ControlCommit, DisplayWrite, QuizStore};
use crate::{
    error::{Entity, Error, Result},
    ids::{EventId, PeriodId, QuestionId},
    model::{Event, Period, PeriodQuestion, Question, QuestionDisplay, QuizControl},
};

#[derive(Debug, Default)]
struct Tables {
    events: HashMap<EventId, Event>,
    controls: HashMap<EventId, QuizControl>,
    periods: HashMap<PeriodId, Period>,
    questions: HashMap<QuestionId, Question>,
    period_questions: Vec<PeriodQuestion>,
    question_displays: Vec<QuestionDisplay>,
}

/// A [`QuizStore`] keeping everything in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event
    ///
    /// # Errors
    ///
    /// Fails if the event is invalid or already present.
    pub async fn insert_event(&self, event: Event) -> Result<()> {
        event.validate()?;
        let mut tables = self.tables.write().await;
        match tables.events.entry(event.id) {
            Entry::Occupied(_) => Err(Error::AlreadyExists(Entity::Event, event.id.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(event);
                Ok(())
            }
        }
    }

    /// Adds a period to an existing event
    ///
    /// # Errors
    ///
    /// Fails if the period is invalid, its event is unknown, the event is
    /// full, or another period of the event already uses its order number.
    pub async fn insert_period(&self, period: Period) -> Result<()> {
        period.validate()?;
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&period.event_id) {
            return Err(Error::NotFound(Entity::Event, period.event_id.to_string()));
        }
        if tables.periods.contains_key(&period.id) {
            return Err(Error::AlreadyExists(Entity::Period, period.id.to_string()));
        }

        let siblings = tables
            .periods
            .values()
            .filter(|p| p.event_id == period.event_id)
            .collect_vec();
        if siblings.len() >= crate::constants::event::MAX_PERIODS {
            return Err(Error::InvalidState("event has reached its period limit"));
        }
        if siblings.iter().any(|p| p.order_num == period.order_num) {
            return Err(Error::AlreadyExists(
                Entity::Period,
                format!("order {} in event {}", period.order_num, period.event_id),
            ));
        }

        tables.periods.insert(period.id, period);
        Ok(())
    }

    /// Adds a question
    ///
    /// # Errors
    ///
    /// Fails if the question is invalid or already present.
    pub async fn insert_question(&self, question: Question) -> Result<()> {
        question.validate()?;
        let mut tables = self.tables.write().await;
        match tables.questions.entry(question.id) {
            Entry::Occupied(_) => Err(Error::AlreadyExists(
                Entity::Question,
                question.id.to_string(),
            )),
            Entry::Vacant(entry) => {
                entry.insert(question);
                Ok(())
            }
        }
    }

    /// Attaches an existing question to an existing period
    ///
    /// # Errors
    ///
    /// Fails if either side is unknown, the period is full, or the question
    /// is already attached to the period.
    pub async fn attach_question(&self, link: PeriodQuestion) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.periods.contains_key(&link.period_id) {
            return Err(Error::NotFound(Entity::Period, link.period_id.to_string()));
        }
        if !tables.questions.contains_key(&link.question_id) {
            return Err(Error::NotFound(
                Entity::Question,
                link.question_id.to_string(),
            ));
        }

        let siblings = tables
            .period_questions
            .iter()
            .filter(|pq| pq.period_id == link.period_id)
            .collect_vec();
        if siblings.len() >= crate::constants::period::MAX_QUESTIONS {
            return Err(Error::InvalidState("period has reached its question limit"));
        }
        if siblings.iter().any(|pq| pq.question_id == link.question_id) {
            return Err(Error::AlreadyExists(
                Entity::PeriodQuestion,
                format!("{} in period {}", link.question_id, link.period_id),
            ));
        }

        tables.period_questions.push(link);
        Ok(())
    }
}

impl QuizStore for MemoryStore {
    async fn control(&self, event_id: EventId) -> Result<Option<QuizControl>> {
        Ok(self.tables.read().await.controls.get(&event_id).cloned())
    }

    async fn insert_control(&self, control: QuizControl) -> Result<QuizControl> {
        let mut tables = self.tables.write().await;
        match tables.controls.entry(control.event_id) {
            Entry::Occupied(_) => Err(Error::AlreadyExists(
                Entity::QuizControl,
                control.event_id.to_string(),
            )),
            Entry::Vacant(entry) => Ok(entry.insert(control).clone()),
        }
    }

    async fn period(&self, period_id: PeriodId) -> Result<Option<Period>> {
        Ok(self.tables.read().await.periods.get(&period_id).cloned())
    }

    async fn periods(&self, event_id: EventId) -> Result<Vec<Period>> {
        Ok(self
            .tables
            .read()
            .await
            .periods
            .values()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect_vec())
    }

    async fn period_questions(&self, period_id: PeriodId) -> Result<Vec<PeriodQuestion>> {
        Ok(self
            .tables
            .read()
            .await
            .period_questions
            .iter()
            .filter(|pq| pq.period_id == period_id)
            .copied()
            .collect_vec())
    }

    async fn question_displays(
        &self,
        period_id: PeriodId,
        question_id: QuestionId,
    ) -> Result<Vec<QuestionDisplay>> {
        Ok(self
            .tables
            .read()
            .await
            .question_displays
            .iter()
            .filter(|d| d.period_id == period_id && d.question_id == question_id)
            .copied()
            .collect_vec())
    }

    async fn commit(&self, commit: ControlCommit, expected_version: u64) -> Result<QuizControl> {
        let mut tables = self.tables.write().await;
        let tables = &mut *tables;

        let event_id = commit.control.event_id;
        let actual = tables
            .controls
            .get(&event_id)
            .ok_or_else(|| Error::NotFound(Entity::QuizControl, event_id.to_string()))?
            .version;
        if actual != expected_version {
            return Err(Error::Conflict {
                expected: expected_version,
                actual,
            });
        }

        // Every close must hit a record before anything is written.
        for write in &commit.displays {
            if let DisplayWrite::Close {
                period_id,
                question_id,
                ..
            } = write
            {
                let opened_earlier = tables
                    .question_displays
                    .iter()
                    .any(|d| d.period_id == *period_id && d.question_id == *question_id);
                let opened_now = commit.displays.iter().any(|w| {
                    matches!(w, DisplayWrite::Open(d)
                        if d.period_id == *period_id && d.question_id == *question_id)
                });
                if !opened_earlier && !opened_now {
                    return Err(Error::Persistence(format!(
                        "no question display matches period {period_id} and question {question_id}"
                    )));
                }
            }
        }

        for write in commit.displays {
            match write {
                DisplayWrite::Open(display) => tables.question_displays.push(display),
                DisplayWrite::Close {
                    period_id,
                    question_id,
                    closed_at,
                } => tables
                    .question_displays
                    .iter_mut()
                    .filter(|d| d.period_id == period_id && d.question_id == question_id)
                    .for_each(|d| d.closed_at = Some(closed_at)),
            }
        }

        let control = QuizControl {
            version: expected_version + 1,
            updated_at: SystemTime::now(),
            ..commit.control
        };
        tables.controls.insert(event_id, control.clone());

        Ok(control)
    }
}
