//! Step sequencer.
//!
//! Drives the guided tour for one active user at a time: persists progress
//! through the completion store, presents steps, and emits step/tour
//! completion events. Transitions themselves come from [`TourMachine`].

use std::sync::Arc;
use std::time::Duration;

use cc_core::{
    identity::UserId,
    ids::EventName,
    ports::{ClockPort, NavigationPort, Notification, NotificationPort, TourPresenterPort},
    tour::{StepCatalog, TourError, TourMachine, TourState},
    AppEvent,
};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::event_bus::AppEventBus;
use crate::usecases::completion_store::CompletionStore;
use crate::usecases::identity::IdentityResolver;

/// Snapshot of a user's tour as seen by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourView {
    pub user: String,
    /// Step being shown. May trail `state.current_step` after `prev`.
    pub cursor: usize,
    pub total: usize,
    pub active: bool,
    pub state: TourState,
}

/// Result of feeding an application event to the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum EventOutcome {
    /// Not a trigger, or not the step the active tour is waiting for.
    Ignored,
    /// The active tour advanced past the triggered step.
    Advanced(TourView),
    /// Progress recorded without any UI for an inactive tour.
    Recorded(TourState),
}

struct ActiveTour {
    user: UserId,
    cursor: usize,
    state: TourState,
}

pub struct TourSequencer {
    catalog: StepCatalog,
    completion: Arc<CompletionStore>,
    presenter: Arc<dyn TourPresenterPort>,
    navigation: Arc<dyn NavigationPort>,
    notifier: Arc<dyn NotificationPort>,
    clock: Arc<dyn ClockPort>,
    events: AppEventBus,
    auto_advance_delay: Duration,
    active: Mutex<Option<ActiveTour>>,
}

impl TourSequencer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: StepCatalog,
        completion: Arc<CompletionStore>,
        presenter: Arc<dyn TourPresenterPort>,
        navigation: Arc<dyn NavigationPort>,
        notifier: Arc<dyn NotificationPort>,
        clock: Arc<dyn ClockPort>,
        events: AppEventBus,
        auto_advance_delay: Duration,
    ) -> Self {
        Self {
            catalog,
            completion,
            presenter,
            navigation,
            notifier,
            clock,
            events,
            auto_advance_delay,
            active: Mutex::new(None),
        }
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    fn total(&self) -> usize {
        self.catalog.len()
    }

    fn view(&self, user: &UserId, cursor: usize, state: &TourState, active: bool) -> TourView {
        TourView {
            user: user.to_string(),
            cursor,
            total: self.total(),
            active,
            state: state.clone(),
        }
    }

    fn active_view(&self, tour: &ActiveTour) -> TourView {
        self.view(&tour.user, tour.cursor, &tour.state, true)
    }

    /// Persisted state, repaired against the current catalog.
    async fn load(&self, user: &UserId) -> TourState {
        let stored = self.completion.get_tour_state(user).await;
        let normalized = TourMachine::normalize(stored.clone(), self.total(), self.clock.now_ms());
        if normalized != stored {
            self.completion.set_tour_state(user, &normalized).await;
        }
        normalized
    }

    pub async fn is_complete(&self, user: &UserId) -> bool {
        TourMachine::is_complete(&self.load(user).await, self.total())
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    pub async fn active_user(&self) -> Option<UserId> {
        self.active.lock().await.as_ref().map(|tour| tour.user.clone())
    }

    pub async fn current(&self) -> Option<TourView> {
        let active = self.active.lock().await;
        active.as_ref().map(|tour| self.active_view(tour))
    }

    /// Begin or resume the tour for `user`. A completed tour stays completed
    /// and nothing is shown.
    pub async fn start(&self, user: &UserId) -> TourView {
        let span = info_span!("usecase.tour.start", user = %user);
        async {
            let mut active = self.active.lock().await;
            let state = self.load(user).await;
            if state.completed {
                info!("tour already completed, nothing to show");
                return self.view(user, state.current_step, &state, false);
            }
            let state = TourMachine::start(state, user, self.clock.now_ms());
            self.completion.set_tour_state(user, &state).await;
            self.activate(&mut active, user, state).await
        }
        .instrument(span)
        .await
    }

    /// Re-open a started, unfinished, non-dismissed tour.
    pub async fn resume(&self, user: &UserId) -> Option<TourView> {
        let span = info_span!("usecase.tour.resume", user = %user);
        async {
            let mut active = self.active.lock().await;
            let state = self.load(user).await;
            if state.completed || state.dismissed || !state.is_started() {
                debug!(phase = ?state.phase(), dismissed = state.dismissed, "tour not resumable");
                return None;
            }
            if let Some(tour) = active.as_ref() {
                if tour.user == *user {
                    return Some(self.active_view(tour));
                }
            }
            Some(self.activate(&mut active, user, state).await)
        }
        .instrument(span)
        .await
    }

    async fn activate(
        &self,
        slot: &mut Option<ActiveTour>,
        user: &UserId,
        state: TourState,
    ) -> TourView {
        if let Some(previous) = slot.take() {
            if previous.user != *user {
                // Progress is already persisted; the tour stays resumable.
                info!(previous = %previous.user, "closing tour of previous user");
                self.hide().await;
            }
        }

        if state.current_step >= self.total() {
            // Empty catalog: nothing to walk through.
            let done = TourMachine::next(state, self.total(), self.clock.now_ms());
            self.completion.set_tour_state(user, &done).await;
            *slot = None;
            self.finish(user).await;
            return self.view(user, done.current_step, &done, false);
        }

        let tour = ActiveTour {
            user: user.clone(),
            cursor: state.current_step,
            state,
        };
        info!(user = %user, step = tour.cursor, total = self.total(), "tour active");
        self.present(tour.cursor).await;
        let view = self.active_view(&tour);
        *slot = Some(tour);
        view
    }

    pub async fn next(&self) -> Result<TourView, TourError> {
        let mut active = self.active.lock().await;
        self.advance(&mut active).await
    }

    async fn advance(&self, slot: &mut Option<ActiveTour>) -> Result<TourView, TourError> {
        let tour = slot.as_mut().ok_or(TourError::NotActive)?;

        // Revisiting steps already passed: only the cursor moves.
        if tour.cursor < tour.state.current_step {
            tour.cursor += 1;
            self.present(tour.cursor).await;
            return Ok(self.active_view(tour));
        }

        let finished = tour.cursor;
        let user = tour.user.clone();
        let next = TourMachine::next(tour.state.clone(), self.total(), self.clock.now_ms());
        self.completion.set_tour_state(&user, &next).await;
        self.step_finished(&user, finished, true).await;

        if next.completed {
            *slot = None;
            self.finish(&user).await;
            return Ok(self.view(&user, next.current_step, &next, false));
        }

        tour.cursor = next.current_step;
        tour.state = next;
        self.present(tour.cursor).await;
        Ok(self.active_view(tour))
    }

    /// Step back one step; the persisted high-water mark is untouched.
    pub async fn prev(&self) -> Result<TourView, TourError> {
        let mut active = self.active.lock().await;
        let tour = active.as_mut().ok_or(TourError::NotActive)?;
        if tour.cursor > 0 {
            tour.cursor -= 1;
            self.present(tour.cursor).await;
        }
        Ok(self.active_view(tour))
    }

    pub async fn jump_to(&self, index: usize) -> Result<TourView, TourError> {
        let mut active = self.active.lock().await;
        let tour = active.as_mut().ok_or(TourError::NotActive)?;
        let jumped = TourMachine::jump_to(tour.state.clone(), index, self.total())?;
        if index > tour.state.current_step {
            self.completion.set_tour_state(&tour.user, &jumped).await;
            tour.state = jumped;
        }
        tour.cursor = index;
        self.present(index).await;
        Ok(self.active_view(tour))
    }

    /// Close the tour and remember that the user dismissed it.
    pub async fn dismiss(&self) -> Option<TourState> {
        let mut active = self.active.lock().await;
        let tour = active.take()?;
        let state = TourMachine::dismiss(tour.state);
        self.completion.set_tour_state(&tour.user, &state).await;
        self.hide().await;
        info!(user = %tour.user, step = state.current_step, "tour dismissed");
        Some(state)
    }

    /// Hide the tour without recording anything (logout, admin reset).
    pub async fn close(&self) {
        if self.active.lock().await.take().is_some() {
            self.hide().await;
        }
    }

    /// Feed a UI action performed by `user` to the tour.
    pub async fn handle_event(&self, user: &UserId, name: &EventName) -> EventOutcome {
        let Some(index) = self.catalog.index_of_trigger(name) else {
            return EventOutcome::Ignored;
        };
        let span = info_span!("usecase.tour.handle_event", user = %user, event = %name, index);
        async {
            let waiting_on = {
                let active = self.active.lock().await;
                active
                    .as_ref()
                    .filter(|tour| tour.user == *user)
                    .map(|tour| tour.cursor)
            };

            match waiting_on {
                Some(cursor) if cursor == index => self.auto_advance(user, index).await,
                Some(cursor) => {
                    debug!(cursor, "trigger is not for the current step");
                    EventOutcome::Ignored
                }
                None => self.record_inactive(user, index).await,
            }
        }
        .instrument(span)
        .await
    }

    async fn auto_advance(&self, user: &UserId, index: usize) -> EventOutcome {
        tokio::time::sleep(self.auto_advance_delay).await;

        let mut active = self.active.lock().await;
        let still_waiting = active
            .as_ref()
            .is_some_and(|tour| tour.user == *user && tour.cursor == index);
        if !still_waiting {
            debug!("cursor moved during auto-advance delay");
            return EventOutcome::Ignored;
        }
        match self.advance(&mut active).await {
            Ok(view) => EventOutcome::Advanced(view),
            Err(err) => {
                warn!(error = %err, "auto-advance failed");
                EventOutcome::Ignored
            }
        }
    }

    async fn record_inactive(&self, user: &UserId, index: usize) -> EventOutcome {
        let _active = self.active.lock().await;
        let state = self.load(user).await;
        let Some(mut recorded) =
            TourMachine::record_progress(state, index, self.total(), self.clock.now_ms())
        else {
            return EventOutcome::Ignored;
        };
        if recorded.username.is_empty() {
            recorded.username = user.to_string();
        }

        self.completion.set_tour_state(user, &recorded).await;
        self.step_finished(user, index, false).await;
        if recorded.completed {
            self.events
                .publish(AppEvent::TourCompleted {
                    username: user.to_string(),
                })
                .await;
        }
        info!(step = recorded.current_step, completed = recorded.completed, "recorded tour progress");
        EventOutcome::Recorded(recorded)
    }

    /// Listen for UI actions on the event bus. Events are attributed to the
    /// active tour's user, else to the resolved current identity.
    pub async fn spawn_listener(self: Arc<Self>, identity: Arc<IdentityResolver>) -> JoinHandle<()> {
        let mut events = self.events.subscribe().await;
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let AppEvent::UiAction { name } = event else {
                    continue;
                };
                let user = match self.active_user().await {
                    Some(user) => user,
                    None => identity.current_user_id().await,
                };
                self.handle_event(&user, &name).await;
            }
        })
    }

    async fn present(&self, index: usize) {
        let Some(step) = self.catalog.get(index) else {
            return;
        };
        if let Err(err) = self.navigation.navigate_to(step.view).await {
            warn!(view = %step.view, error = %err, "navigation for tour step failed");
        }
        if let Err(err) = self.presenter.show_step(step, index, self.total()).await {
            warn!(step = %step.id, error = %err, "failed to show tour step");
        }
    }

    async fn hide(&self) {
        if let Err(err) = self.presenter.hide().await {
            warn!(error = %err, "failed to hide tour");
        }
    }

    async fn step_finished(&self, user: &UserId, index: usize, toast: bool) {
        let Some(step) = self.catalog.get(index) else {
            return;
        };
        if toast {
            self.notify(Notification::success(
                "Step complete",
                format!("{} ({}/{})", step.title, index + 1, self.total()),
            ))
            .await;
        }
        self.events
            .publish(AppEvent::TourStepCompleted {
                username: user.to_string(),
                step_id: step.id.clone(),
                index,
            })
            .await;
    }

    async fn finish(&self, user: &UserId) {
        self.hide().await;
        self.notify(Notification::success(
            "Tour complete",
            "You have finished the CareConnect Pro tour.",
        ))
        .await;
        self.events
            .publish(AppEvent::TourCompleted {
                username: user.to_string(),
            })
            .await;
        info!(user = %user, "tour completed");
    }

    async fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.notify(notification).await {
            warn!(error = %err, "failed to show notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noop::{NoopNavigation, NoopNotifier};
    use cc_core::ports::KeyValueStorePort;
    use cc_core::tour::StepDefinition;
    use cc_infra::InMemoryKeyValueStore;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex as StdMutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Shown {
        Step(usize),
        Hidden,
    }

    #[derive(Default)]
    struct RecordingPresenter {
        calls: StdMutex<Vec<Shown>>,
    }

    impl RecordingPresenter {
        fn calls(&self) -> Vec<Shown> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl TourPresenterPort for RecordingPresenter {
        async fn show_step(
            &self,
            _step: &StepDefinition,
            index: usize,
            _total: usize,
        ) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(Shown::Step(index));
            Ok(())
        }

        async fn hide(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(Shown::Hidden);
            Ok(())
        }
    }

    struct FixedClock(AtomicI64);

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct Harness {
        store: Arc<InMemoryKeyValueStore>,
        completion: Arc<CompletionStore>,
        presenter: Arc<RecordingPresenter>,
        events: AppEventBus,
        sequencer: TourSequencer,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let completion = Arc::new(CompletionStore::new(store.clone()));
        let presenter = Arc::new(RecordingPresenter::default());
        let events = AppEventBus::new();
        let sequencer = TourSequencer::new(
            StepCatalog::clinical_default(),
            completion.clone(),
            presenter.clone(),
            Arc::new(NoopNavigation),
            Arc::new(NoopNotifier),
            Arc::new(FixedClock(AtomicI64::new(1_000))),
            events.clone(),
            Duration::from_millis(800),
        );
        Harness {
            store,
            completion,
            presenter,
            events,
            sequencer,
        }
    }

    fn jdoe() -> UserId {
        UserId::from("jdoe")
    }

    #[tokio::test]
    async fn start_presents_first_step_and_persists_start() {
        let h = harness();

        let view = h.sequencer.start(&jdoe()).await;

        assert!(view.active);
        assert_eq!(view.cursor, 0);
        assert_eq!(view.total, 9);
        assert_eq!(h.presenter.calls(), vec![Shown::Step(0)]);
        let stored = h.completion.get_tour_state(&jdoe()).await;
        assert_eq!(stored.username, "jdoe");
        assert_eq!(stored.started_at, Some(1_000));
    }

    #[tokio::test]
    async fn next_through_every_step_completes_the_tour() {
        let h = harness();
        let mut rx = h.events.subscribe().await;
        h.sequencer.start(&jdoe()).await;

        let mut last = None;
        for _ in 0..9 {
            last = Some(h.sequencer.next().await.unwrap());
        }
        let last = last.unwrap();

        assert!(!last.active);
        assert!(last.state.completed);
        assert_eq!(last.state.current_step, 9);
        assert_eq!(last.state.completed_at, Some(1_000));
        assert!(h.sequencer.is_complete(&jdoe()).await);
        assert_eq!(h.presenter.calls().last(), Some(&Shown::Hidden));

        let mut step_events = 0;
        let mut completed_events = 0;
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::TourStepCompleted { .. } => step_events += 1,
                AppEvent::TourCompleted { .. } => completed_events += 1,
                _ => {}
            }
        }
        assert_eq!(step_events, 9);
        assert_eq!(completed_events, 1);

        // absorbing: nothing left to advance, persisted state unchanged
        assert_eq!(h.sequencer.next().await.unwrap_err(), TourError::NotActive);
        assert_eq!(h.completion.get_tour_state(&jdoe()).await, last.state);
    }

    #[tokio::test]
    async fn prev_at_zero_is_a_noop() {
        let h = harness();
        h.sequencer.start(&jdoe()).await;

        let view = h.sequencer.prev().await.unwrap();

        assert_eq!(view.cursor, 0);
        assert_eq!(h.presenter.calls(), vec![Shown::Step(0)]);
    }

    #[tokio::test]
    async fn prev_moves_cursor_but_not_the_persisted_high_water_mark() {
        let h = harness();
        h.sequencer.start(&jdoe()).await;
        h.sequencer.next().await.unwrap();
        h.sequencer.next().await.unwrap();

        let view = h.sequencer.prev().await.unwrap();
        assert_eq!(view.cursor, 1);
        assert_eq!(view.state.current_step, 2);
        assert_eq!(h.completion.get_tour_state(&jdoe()).await.current_step, 2);

        // walking forward again over a passed step does not persist anything new
        let view = h.sequencer.next().await.unwrap();
        assert_eq!(view.cursor, 2);
        assert_eq!(h.completion.get_tour_state(&jdoe()).await.current_step, 2);
    }

    #[tokio::test]
    async fn start_on_completed_tour_shows_nothing() {
        let h = harness();
        let done = TourState {
            current_step: 9,
            completed: true,
            completed_at: Some(5),
            ..Default::default()
        };
        h.completion.set_tour_state(&jdoe(), &done).await;

        let view = h.sequencer.start(&jdoe()).await;

        assert!(!view.active);
        assert!(view.state.completed);
        assert!(h.presenter.calls().is_empty());
        assert!(!h.sequencer.is_active().await);
    }

    #[tokio::test]
    async fn completed_state_with_short_cursor_is_repaired() {
        let h = harness();
        h.store
            .set("tour-jdoe", r#"{"currentStep":3,"completed":true}"#)
            .await
            .unwrap();

        assert!(h.sequencer.is_complete(&jdoe()).await);
        assert_eq!(h.completion.get_tour_state(&jdoe()).await.current_step, 9);
    }

    #[tokio::test]
    async fn resume_skips_dismissed_and_unstarted_tours() {
        let h = harness();
        assert!(h.sequencer.resume(&jdoe()).await.is_none());

        h.sequencer.start(&jdoe()).await;
        h.sequencer.next().await.unwrap();
        let dismissed = h.sequencer.dismiss().await.unwrap();
        assert!(dismissed.dismissed);
        assert_eq!(dismissed.current_step, 1);
        assert!(h.sequencer.resume(&jdoe()).await.is_none());

        // an explicit start clears the dismissal and continues where it stopped
        let view = h.sequencer.start(&jdoe()).await;
        assert_eq!(view.cursor, 1);
        assert!(!view.state.dismissed);
    }

    #[tokio::test]
    async fn resume_reopens_unfinished_tour_at_persisted_step() {
        let h = harness();
        h.store
            .set(
                "tour-jdoe",
                r#"{"currentStep":4,"completed":false,"dismissed":false,"username":"jdoe"}"#,
            )
            .await
            .unwrap();

        let view = h.sequencer.resume(&jdoe()).await.unwrap();

        assert_eq!(view.cursor, 4);
        assert_eq!(h.presenter.calls(), vec![Shown::Step(4)]);
    }

    #[tokio::test]
    async fn starting_another_users_tour_hides_the_previous_one() {
        let h = harness();
        let asmith = UserId::from("asmith");
        h.sequencer.start(&jdoe()).await;
        h.sequencer.next().await.unwrap();

        let view = h.sequencer.start(&asmith).await;

        assert_eq!(view.cursor, 0);
        assert_eq!(h.sequencer.active_user().await, Some(asmith));
        assert_eq!(
            h.presenter.calls(),
            vec![Shown::Step(0), Shown::Step(1), Shown::Hidden, Shown::Step(0)]
        );
        let left = h.completion.get_tour_state(&jdoe()).await;
        assert_eq!(left.current_step, 1);
        assert!(!left.dismissed);
        assert!(h.sequencer.resume(&jdoe()).await.is_some());
    }

    #[tokio::test]
    async fn restarting_same_users_tour_does_not_hide() {
        let h = harness();
        h.sequencer.start(&jdoe()).await;

        h.sequencer.start(&jdoe()).await;

        assert_eq!(h.presenter.calls(), vec![Shown::Step(0), Shown::Step(0)]);
    }

    #[tokio::test]
    async fn jump_to_rejects_out_of_range_index() {
        let h = harness();
        h.sequencer.start(&jdoe()).await;

        let err = h.sequencer.jump_to(9).await.unwrap_err();
        assert_eq!(err, TourError::StepOutOfRange { index: 9, total: 9 });

        let view = h.sequencer.jump_to(5).await.unwrap();
        assert_eq!(view.cursor, 5);
        assert_eq!(h.completion.get_tour_state(&jdoe()).await.current_step, 5);
    }

    #[tokio::test]
    async fn operations_without_active_tour_fail_with_not_active() {
        let h = harness();
        assert_eq!(h.sequencer.next().await.unwrap_err(), TourError::NotActive);
        assert_eq!(h.sequencer.prev().await.unwrap_err(), TourError::NotActive);
        assert!(h.sequencer.dismiss().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_for_current_step_auto_advances_after_delay() {
        let h = harness();
        h.sequencer.start(&jdoe()).await;
        let started = tokio::time::Instant::now();

        let outcome = h
            .sequencer
            .handle_event(&jdoe(), &EventName::from("dashboard-viewed"))
            .await;

        assert!(started.elapsed() >= Duration::from_millis(800));
        match outcome {
            EventOutcome::Advanced(view) => assert_eq!(view.cursor, 1),
            other => panic!("expected advance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn trigger_for_other_step_is_ignored_while_active() {
        let h = harness();
        h.sequencer.start(&jdoe()).await;

        let outcome = h
            .sequencer
            .handle_event(&jdoe(), &EventName::from("report-generated"))
            .await;

        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(h.completion.get_tour_state(&jdoe()).await.current_step, 0);
    }

    #[tokio::test]
    async fn unknown_event_is_ignored() {
        let h = harness();
        let outcome = h
            .sequencer
            .handle_event(&jdoe(), &EventName::from("coffee-brewed"))
            .await;
        assert_eq!(outcome, EventOutcome::Ignored);
    }

    #[tokio::test]
    async fn inactive_trigger_records_progress_without_ui() {
        let h = harness();

        let outcome = h
            .sequencer
            .handle_event(&jdoe(), &EventName::from("program-searched"))
            .await;

        match outcome {
            EventOutcome::Recorded(state) => {
                assert_eq!(state.current_step, 3);
                assert_eq!(state.username, "jdoe");
                assert!(!state.completed);
            }
            other => panic!("expected recorded progress, got {other:?}"),
        }
        assert!(h.presenter.calls().is_empty());

        // a step behind the persisted cursor changes nothing
        let outcome = h
            .sequencer
            .handle_event(&jdoe(), &EventName::from("client-added"))
            .await;
        assert_eq!(outcome, EventOutcome::Ignored);
    }

    #[tokio::test]
    async fn inactive_trigger_for_last_step_completes_the_tour() {
        let h = harness();
        let mut rx = h.events.subscribe().await;

        let outcome = h
            .sequencer
            .handle_event(&jdoe(), &EventName::from("report-generated"))
            .await;

        let EventOutcome::Recorded(state) = outcome else {
            panic!("expected recorded progress");
        };
        assert!(state.completed);
        assert_eq!(state.current_step, 9);
        assert!(matches!(
            rx.recv().await,
            Some(AppEvent::TourStepCompleted { index: 8, .. })
        ));
        assert!(matches!(rx.recv().await, Some(AppEvent::TourCompleted { .. })));
    }

    #[tokio::test]
    async fn empty_catalog_completes_immediately() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let completion = Arc::new(CompletionStore::new(store));
        let sequencer = TourSequencer::new(
            StepCatalog::new(Vec::new()).unwrap(),
            completion.clone(),
            Arc::new(RecordingPresenter::default()),
            Arc::new(NoopNavigation),
            Arc::new(NoopNotifier),
            Arc::new(FixedClock(AtomicI64::new(7))),
            AppEventBus::new(),
            Duration::ZERO,
        );

        let view = sequencer.start(&jdoe()).await;

        assert!(!view.active);
        assert!(view.state.completed);
        assert!(completion.get_tour_state(&jdoe()).await.completed);
    }
}
