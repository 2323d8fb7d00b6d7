//! Filter debounce gate.
//!
//! Every filter edit cancels the pending timer and starts a new one. Only a
//! timer that runs to completion issues a collection fetch, with the filters
//! current at that moment. Fetches that already started are never cancelled.
//! [`FilterGate::settle`] fires a still-pending edit and waits for every
//! fetch the gate started, for callers about to shut down.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::ProjectApi;
use crate::fetch::FetchCoordinator;
use crate::models::{ProjectFilters, ProjectStatus};

#[derive(Default)]
struct GateState {
    filters: ProjectFilters,
    /// Bumped on every edit; a timer only fires if it is still current.
    generation: u64,
    pending: Option<JoinHandle<()>>,
    /// Timers that fired, plus flushes; their fetches may still be running.
    in_flight: Vec<JoinHandle<()>>,
}

pub struct FilterGate<A> {
    coordinator: Arc<FetchCoordinator<A>>,
    quiescence: Duration,
    runtime: Handle,
    state: Arc<Mutex<GateState>>,
}

impl<A: ProjectApi> FilterGate<A> {
    /// Timers and fetches run on the runtime current at construction, so
    /// setters may be called from any thread afterwards.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(coordinator: Arc<FetchCoordinator<A>>, quiescence: Duration) -> Self {
        Self {
            coordinator,
            quiescence,
            runtime: Handle::current(),
            state: Arc::new(Mutex::new(GateState::default())),
        }
    }

    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }

    pub fn filters(&self) -> ProjectFilters {
        self.state.lock().filters.clone()
    }

    pub fn set_status(&self, status: Option<ProjectStatus>) {
        self.edit(|filters| filters.status = status);
    }

    pub fn set_keyword(&self, keyword: Option<String>) {
        self.edit(|filters| filters.keyword = keyword);
    }

    pub fn set_start_date(&self, date: Option<NaiveDate>) {
        self.edit(|filters| filters.start_date = date);
    }

    pub fn set_end_date(&self, date: Option<NaiveDate>) {
        self.edit(|filters| filters.end_date = date);
    }

    /// Clear all four filters; debounced like any other edit.
    pub fn reset(&self) {
        self.edit(|filters| *filters = ProjectFilters::default());
    }

    /// Fetch now with the current filters, dropping any pending timer.
    pub fn flush(&self) -> JoinHandle<()> {
        let mut state = self.state.lock();
        self.fire_now(&mut state)
    }

    /// Fire a pending edit immediately, then wait until every fetch the gate
    /// started has completed.
    pub async fn settle(&self) {
        let handles = {
            let mut state = self.state.lock();
            let mut handles = std::mem::take(&mut state.in_flight);
            if state.pending.is_some() {
                handles.push(self.fire_now(&mut state));
            }
            handles
        };
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::debug!(error = %err, "filter fetch task ended abnormally");
            }
        }
    }

    fn fire_now(&self, state: &mut GateState) -> JoinHandle<()> {
        state.generation += 1;
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        let filters = state.filters.clone();
        let coordinator = self.coordinator.clone();
        self.runtime
            .spawn(async move { fire(&coordinator, filters).await })
    }

    fn edit(&self, change: impl FnOnce(&mut ProjectFilters)) {
        let mut state = self.state.lock();
        change(&mut state.filters);
        state.generation += 1;
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let coordinator = self.coordinator.clone();
        let quiescence = self.quiescence;
        state.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(quiescence).await;
            let filters = {
                let mut state = shared.lock();
                if state.generation != generation {
                    return;
                }
                // Past this point later edits must not abort the request
                if let Some(timer) = state.pending.take() {
                    state.in_flight.retain(|handle| !handle.is_finished());
                    state.in_flight.push(timer);
                }
                state.filters.clone()
            };
            fire(&coordinator, filters).await;
        }));
    }
}

async fn fire<A: ProjectApi>(coordinator: &FetchCoordinator<A>, filters: ProjectFilters) {
    tracing::debug!(?filters, "filter gate fired");
    if let Err(err) = coordinator.request_collection(filters).await {
        tracing::debug!(error = %err, "filtered fetch failed");
    }
}

impl<A> Drop for FilterGate<A> {
    fn drop(&mut self) {
        if let Some(pending) = self.state.lock().pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use crate::store::{FetchStatus, Store};
    use crate::test_support::{summary, MockApi};
    use tokio::time::sleep;

    const QUIET: Duration = Duration::from_millis(300);

    fn gate(api: &Arc<MockApi>) -> FilterGate<MockApi> {
        let coordinator = Arc::new(FetchCoordinator::new(Store::new(), api.clone()));
        FilterGate::new(coordinator, QUIET)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_fire_once_with_latest_filters() {
        let api = Arc::new(MockApi::new());
        let gate = gate(&api);

        gate.set_keyword(Some("w".to_string()));
        sleep(ms(299)).await;
        gate.set_keyword(Some("we".to_string()));
        sleep(ms(299)).await;
        gate.set_status(Some(ProjectStatus::Active));
        sleep(ms(299)).await;
        gate.set_keyword(Some("web".to_string()));
        sleep(ms(299)).await;
        gate.set_start_date(NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(api.list_call_count(), 0);

        sleep(ms(301)).await;
        let calls = api.list_calls.lock().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            ProjectFilters {
                status: Some(ProjectStatus::Active),
                keyword: Some("web".to_string()),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                end_date: None,
            }
        );

        sleep(ms(1000)).await;
        assert_eq!(api.list_call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_quiet_period_fires() {
        let api = Arc::new(MockApi::new());
        let gate = gate(&api);

        gate.set_end_date(NaiveDate::from_ymd_opt(2024, 6, 30));
        sleep(ms(350)).await;
        gate.reset();
        sleep(ms(350)).await;

        let calls = api.list_calls.lock().clone();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].end_date.is_some());
        assert!(calls[1].is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_fires_immediately_and_cancels_timer() {
        let api = Arc::new(MockApi::new());
        let gate = gate(&api);

        gate.set_keyword(Some("now".to_string()));
        gate.flush().await.unwrap();
        assert_eq!(api.list_call_count(), 1);

        sleep(ms(500)).await;
        assert_eq!(api.list_call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_edit_does_not_cancel_fired_request() {
        let api = Arc::new(MockApi::new());
        let first_reply = api.push_list_gated();
        let gate = gate(&api);

        gate.set_keyword(Some("first".to_string()));
        sleep(ms(301)).await;
        assert_eq!(api.list_call_count(), 1);

        // Request is in flight; a new edit starts a fresh timer
        gate.set_keyword(Some("second".to_string()));
        sleep(ms(301)).await;
        assert_eq!(api.list_call_count(), 2);

        first_reply
            .send(Ok(vec![summary("late", ProjectStatus::Draft)]))
            .unwrap();
        sleep(ms(1)).await;

        // The superseded request still applied its (late) response
        let snapshot = gate.coordinator.store().snapshot();
        assert_eq!(snapshot.projects, vec![summary("late", ProjectStatus::Draft)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_fires_pending_edit_without_waiting() {
        let api = Arc::new(MockApi::new());
        let gate = gate(&api);

        gate.set_status(Some(ProjectStatus::Active));
        gate.settle().await;

        let calls = api.list_calls.lock().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].status, Some(ProjectStatus::Active));
        assert_eq!(gate.coordinator.store().snapshot().fetch_status, FetchStatus::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_fired_fetch_without_refiring() {
        let api = Arc::new(MockApi::new());
        let reply = api.push_list_gated();
        let gate = gate(&api);

        gate.set_keyword(Some("web".to_string()));
        sleep(ms(301)).await;
        assert_eq!(api.list_call_count(), 1);

        reply
            .send(Ok(vec![summary("web", ProjectStatus::Active)]))
            .unwrap();
        gate.settle().await;

        assert_eq!(api.list_call_count(), 1);
        let snapshot = gate.coordinator.store().snapshot();
        assert_eq!(snapshot.projects, vec![summary("web", ProjectStatus::Active)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_without_edits_is_a_no_op() {
        let api = Arc::new(MockApi::new());
        let gate = gate(&api);
        gate.settle().await;
        assert_eq!(api.list_call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let api = Arc::new(MockApi::new());
        let gate = gate(&api);
        gate.set_status(Some(ProjectStatus::Completed));
        drop(gate);

        sleep(ms(500)).await;
        assert_eq!(api.list_call_count(), 0);
    }
}
