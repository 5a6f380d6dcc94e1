//! The quiz control advancer
//!
//! [`Advancer::advance`] is the only way the control row of an event
//! changes. It checks the caller, validates the requested screen against
//! the rule table and the row's own gating, lets the handler for the target
//! screen stage the change, commits it against the version it read, and
//! finally tells viewers that the row moved.

use std::sync::Arc;

use derive_where::derive_where;
use serde::Serialize;
use web_time::SystemTime;

use crate::{
    error::{ActionResult, Entity, Error, Result},
    handlers,
    ids::EventId,
    model::QuizControl,
    notify::{ControlUpdate, NoopNotifier, Notifier},
    screen::Screen,
    session::AdminSession,
    store::QuizStore,
};

/// The control row together with the screens the admin may move to next
#[derive(Debug, Clone, Serialize)]
pub struct ControlView {
    /// The committed control row
    pub control: QuizControl,
    /// Screens offered as the next step, in rule table order
    pub enabled: Vec<Screen>,
}

impl From<QuizControl> for ControlView {
    fn from(control: QuizControl) -> Self {
        Self {
            enabled: control.enabled_transitions(),
            control,
        }
    }
}

/// Drives the control rows stored in `S`, announcing changes through `N`
#[derive_where(Clone)]
pub struct Advancer<S, N = NoopNotifier> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S: QuizStore> Advancer<S> {
    /// Creates an advancer that does not notify anyone
    pub fn without_notifier(store: Arc<S>) -> Self {
        Self::new(store, Arc::new(NoopNotifier))
    }
}

impl<S: QuizStore, N: Notifier> Advancer<S, N> {
    /// Creates an advancer over a store and a notifier
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates the control row of a new event on the waiting screen
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the event already has a control row.
    pub async fn provision(&self, event_id: EventId) -> Result<QuizControl> {
        let control = self.store.insert_control(QuizControl::new(event_id)).await?;
        tracing::info!(%event_id, "provisioned quiz control");
        Ok(control)
    }

    /// Loads the control row of an event with its enabled next screens
    ///
    /// # Errors
    ///
    /// `NotFound` if the event has no control row.
    pub async fn state(&self, event_id: EventId) -> Result<ControlView> {
        self.load(event_id).await.map(ControlView::from)
    }

    /// Moves the event to `requested`
    ///
    /// Nothing is written unless every check and the handler succeed, and
    /// the commit fails if another writer moved the row in the meantime.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` if the session is not an admin
    /// * `NotFound` if the event has no control row, or a referenced record is missing
    /// * `InvalidTransition` if `requested` is not enabled from the current screen
    /// * `InvalidState` if the row lacks what the target screen needs
    /// * `Conflict` if the row changed since it was read
    /// * `Persistence` if the store could not apply the change
    #[tracing::instrument(skip_all, fields(%event_id, %requested))]
    pub async fn advance(
        &self,
        session: &impl AdminSession,
        event_id: EventId,
        requested: Screen,
    ) -> Result<QuizControl> {
        if !session.is_admin() {
            tracing::warn!("rejected transition from non-admin caller");
            return Err(Error::Unauthorized);
        }

        let control = self.load(event_id).await?;
        let from = control.current_screen;
        if !control.can_advance_to(requested) {
            tracing::warn!(%from, "rejected transition");
            return Err(Error::InvalidTransition {
                from,
                to: requested,
            });
        }

        let commit = handlers::stage(&*self.store, &control, requested, SystemTime::now())
            .await
            .inspect_err(|error| tracing::warn!(%from, %error, "transition handler failed"))?;

        let committed = self
            .store
            .commit(commit, control.version)
            .await
            .inspect_err(|error| tracing::warn!(%from, %error, "transition commit failed"))?;

        tracing::info!(
            %from,
            to = %committed.current_screen,
            version = committed.version,
            period_id = ?committed.current_period_id,
            question_id = ?committed.current_question_id,
            "quiz control advanced"
        );
        self.notifier.publish(&ControlUpdate::from(&committed));

        Ok(committed)
    }

    /// [`Advancer::advance`], reported in the shape the admin console expects
    pub async fn advance_action(
        &self,
        session: &impl AdminSession,
        event_id: EventId,
        requested: Screen,
    ) -> ActionResult {
        self.advance(session, event_id, requested).await.into()
    }

    async fn load(&self, event_id: EventId) -> Result<QuizControl> {
        self.store
            .control(event_id)
            .await?
            .ok_or_else(|| Error::NotFound(Entity::QuizControl, event_id.to_string()))
    }
}
