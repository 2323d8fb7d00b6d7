use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};

use super::{invariants, reducer, Action, Snapshot};

/// Rejected transitions. The prior snapshot stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Invariant violation in {action}: {detail}")]
    InvariantViolation { action: &'static str, detail: String },
}

type Listener = Arc<dyn Fn(&Arc<Snapshot>) + Send + Sync>;

struct StoreInner {
    /// Held for a whole dispatch, notification included, so listeners see
    /// snapshots in commit order. Reentrant for listeners that dispatch.
    dispatching: ReentrantMutex<()>,
    state: Mutex<Arc<Snapshot>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

/// Process-wide container for the cache snapshot.
///
/// Cloning yields another handle to the same store. The snapshot only changes
/// through [`Store::dispatch`].
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                dispatching: ReentrantMutex::new(()),
                state: Mutex::new(Arc::new(snapshot)),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.state.lock().clone()
    }

    /// Apply `action` atomically, then notify listeners with the new snapshot.
    ///
    /// Concurrent dispatches are serialized end to end: a second dispatch
    /// waits until every listener has seen the first one's snapshot.
    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        let name = action.name();
        let check = action.is_mutation();
        let _dispatching = self.inner.dispatching.lock();

        let next = {
            let mut state = self.inner.state.lock();
            let mut next = Snapshot::clone(&state);
            reducer::reduce(&mut next, action);

            if check {
                if let Err(detail) = invariants::check_transition(&state, &next) {
                    tracing::error!(action = name, %detail, "rejected incoherent transition");
                    return Err(StoreError::InvariantViolation {
                        action: name,
                        detail,
                    });
                }
            }

            let next = Arc::new(next);
            *state = Arc::clone(&next);
            next
        };

        tracing::debug!(
            action = name,
            projects = next.projects.len(),
            active = next.active_project.as_ref().map(|p| p.id.as_str()),
            status = ?next.fetch_status,
            "dispatched"
        );
        self.notify(&next);
        Ok(())
    }

    /// Register `listener` to run after every successful dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<Snapshot>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    fn notify(&self, snapshot: &Arc<Snapshot>) {
        // Listeners run outside the state lock so they may read or dispatch.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            // A listener dispatched; the rest already saw the newer snapshot
            let current = self.snapshot();
            if !Arc::ptr_eq(&current, snapshot) {
                break;
            }
            listener(snapshot);
        }
    }
}

/// Handle returned by [`Store::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes the listener"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}
