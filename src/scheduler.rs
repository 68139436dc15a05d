//! The streaming scheduler.
//!
//! One externally driven [`tick`](StreamingScheduler::tick) reconciles the
//! desired loaded-state of every configured region (derived from spatial
//! containment) against the actual state confirmed by the backend, issuing
//! at most one async operation per resource id. The tick itself never
//! blocks on streaming I/O; a resource mid-transition is observed as "in
//! flight" on subsequent ticks until its completion signal lands.

use std::collections::hash_map::Entry;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::runtime::Runtime;
use tokio::sync::Notify;

use crate::backend::ResourceBackend;
use crate::containment::{BoundsContainment, Containment};
use crate::errors::Result;
use crate::events::{EventDispatcher, StreamingEvent};
use crate::region::{RegionSet, ResourceId};
use crate::state::ResourceStateStore;
use crate::subjects::SubjectTracker;

fn streaming_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create streaming runtime"))
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Load,
    Unload,
}

impl Op {
    fn name(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Unload => "unload",
        }
    }
}

/// Counters for one reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub loads_issued: usize,
    pub unloads_issued: usize,
    /// Streaming units skipped because an operation was still in flight.
    pub in_flight_skipped: usize,
}

impl TickSummary {
    #[must_use]
    pub fn ops_issued(&self) -> usize {
        self.loads_issued + self.unloads_issued
    }
}

/// Reconciles region containment against backend-confirmed state.
///
/// Regions and subjects are read-only inputs to each tick; the only shared
/// mutable structure is the [`ResourceStateStore`], which completion
/// handlers write to from the streaming runtime's context.
pub struct StreamingScheduler {
    regions: Arc<RegionSet>,
    subjects: Arc<SubjectTracker>,
    backend: Arc<dyn ResourceBackend>,
    store: Arc<ResourceStateStore>,
    events: Arc<EventDispatcher>,
    containment: Box<dyn Containment>,
    completion_signal: Arc<Notify>,
}

impl StreamingScheduler {
    #[must_use]
    pub fn new(
        regions: Arc<RegionSet>,
        subjects: Arc<SubjectTracker>,
        backend: Arc<dyn ResourceBackend>,
    ) -> Self {
        Self {
            regions,
            subjects,
            backend,
            store: Arc::new(ResourceStateStore::new()),
            events: Arc::new(EventDispatcher::new()),
            containment: Box::new(BoundsContainment),
            completion_signal: Arc::new(Notify::new()),
        }
    }

    /// Replaces the containment evaluator, e.g. with a spatial index.
    #[must_use]
    pub fn with_containment(mut self, containment: Box<dyn Containment>) -> Self {
        self.containment = containment;
        self
    }

    #[must_use]
    pub fn regions(&self) -> &Arc<RegionSet> {
        &self.regions
    }

    #[must_use]
    pub fn subjects(&self) -> &Arc<SubjectTracker> {
        &self.subjects
    }

    #[must_use]
    pub fn store(&self) -> &Arc<ResourceStateStore> {
        &self.store
    }

    #[must_use]
    pub fn events(&self) -> &Arc<EventDispatcher> {
        &self.events
    }

    /// One reconciliation pass. Returns promptly; issued operations resolve
    /// on the streaming runtime and report through the state store and the
    /// event dispatcher.
    ///
    /// An id whose operation is still in flight is skipped entirely, even
    /// if its desired state changes during the window. The desired state at
    /// issue time wins and is re-evaluated on the first tick after the
    /// completion lands.
    pub fn tick(&self) -> Result<TickSummary> {
        let positions = self.subjects.positions();

        // Aggregate desired state per resource id across all regions
        // sharing it (logical OR) before comparing to actual state.
        // Evaluating region-by-region could issue a load and an unload for
        // the same id in a single pass.
        let mut order: Vec<ResourceId> = Vec::with_capacity(self.regions.len());
        let mut desired: FxHashMap<ResourceId, bool> = FxHashMap::default();
        for region in self.regions.regions() {
            let inside = self.containment.should_be_active(region, &positions);
            match desired.entry(region.resource().clone()) {
                Entry::Occupied(mut entry) => *entry.get_mut() |= inside,
                Entry::Vacant(entry) => {
                    entry.insert(inside);
                    order.push(region.resource().clone());
                }
            }
        }

        let mut summary = TickSummary::default();
        for id in order {
            if self.store.is_in_progress(&id) {
                summary.in_flight_skipped += 1;
                continue;
            }
            let wanted = desired[&id];
            if wanted == self.store.is_active(&id) {
                continue;
            }
            if wanted {
                self.store.begin_load(&id)?;
                self.spawn_operation(id, Op::Load);
                summary.loads_issued += 1;
            } else {
                self.store.begin_unload(&id)?;
                self.spawn_operation(id, Op::Unload);
                summary.unloads_issued += 1;
            }
        }
        Ok(summary)
    }

    fn spawn_operation(&self, id: ResourceId, op: Op) {
        log::debug!("issuing {} for '{id}'", op.name());
        let future = match op {
            Op::Load => self.backend.load(&id),
            Op::Unload => self.backend.unload(&id),
        };
        let store = Arc::clone(&self.store);
        let events = Arc::clone(&self.events);
        let signal = Arc::clone(&self.completion_signal);
        streaming_runtime().spawn(async move {
            let result = future.await;
            match result {
                Ok(()) => match op {
                    // The store reflects the new state before observers run.
                    Op::Load => {
                        store.complete_load(&id);
                        events.emit(&StreamingEvent::Activated(id));
                    }
                    Op::Unload => {
                        store.complete_unload(&id);
                        events.emit(&StreamingEvent::Deactivated(id));
                    }
                },
                Err(e) => {
                    store.fail_operation(&id);
                    log::warn!(
                        "streaming {} of '{id}' failed, retrying while desired: {e}",
                        op.name()
                    );
                }
            }
            signal.notify_waiters();
        });
    }

    /// Waits until every in-flight operation has settled, up to `timeout`.
    ///
    /// Intended for shutdown: issued operations cannot be cancelled, so
    /// teardown drains them instead. A timeout is logged as a warning and
    /// reported through the return value, never escalated.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            // Register for the completion signal before re-checking the
            // count, so a completion landing in between is not missed.
            let notified = self.completion_signal.notified();
            let remaining = self.store.in_flight_count();
            if remaining == 0 {
                return true;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                // A completion may have landed between the count check and
                // the first poll of `notified`.
                let remaining = self.store.in_flight_count();
                if remaining == 0 {
                    return true;
                }
                log::warn!(
                    "streaming drain timed out with {remaining} operation(s) still in flight"
                );
                return false;
            }
        }
    }
}
