//! Per-resource streaming state.
//!
//! One entry per distinct [`ResourceId`], created lazily on first use and
//! kept for the store's lifetime. The store is written to both by the tick
//! loop (issuing operations) and by backend completion contexts (applying
//! results), hence the lock.
//!
//! Invariants:
//! - at most one in-flight operation per resource id at any time;
//! - a load may only begin from `!in_flight && !active`;
//! - an unload may only begin from `!in_flight && active`.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{Result, StreamError};
use crate::region::ResourceId;

#[derive(Debug, Default, Clone, Copy)]
struct ResourceState {
    /// True once a load completed and no unload has completed since.
    active: bool,
    /// True from the moment an operation is issued until its completion
    /// (or failure) signal is applied.
    in_flight: bool,
}

/// Tracks, per resource id, whether the resource is confirmed loaded and
/// whether an operation is currently in flight.
#[derive(Default)]
pub struct ResourceStateStore {
    entries: RwLock<FxHashMap<ResourceId, ResourceState>>,
}

fn invalid(id: &ResourceId, reason: &'static str) -> StreamError {
    StreamError::InvalidTransition {
        resource: id.as_str().to_owned(),
        reason,
    }
}

impl ResourceStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_in_progress(&self, id: &ResourceId) -> bool {
        self.entries.read().get(id).is_some_and(|e| e.in_flight)
    }

    #[must_use]
    pub fn is_active(&self, id: &ResourceId) -> bool {
        self.entries.read().get(id).is_some_and(|e| e.active)
    }

    /// Number of operations currently in flight across all resources.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.entries.read().values().filter(|e| e.in_flight).count()
    }

    /// Marks a load as issued. Only legal from `!in_flight && !active`.
    pub fn begin_load(&self, id: &ResourceId) -> Result<()> {
        let mut entries = self.entries.write();
        let entry = entries.entry(id.clone()).or_default();
        if entry.in_flight {
            return Err(invalid(id, "load issued while an operation is in flight"));
        }
        if entry.active {
            return Err(invalid(id, "load issued for an already active resource"));
        }
        entry.in_flight = true;
        Ok(())
    }

    /// Marks an unload as issued. Only legal from `!in_flight && active`.
    pub fn begin_unload(&self, id: &ResourceId) -> Result<()> {
        let mut entries = self.entries.write();
        let entry = entries.entry(id.clone()).or_default();
        if entry.in_flight {
            return Err(invalid(id, "unload issued while an operation is in flight"));
        }
        if !entry.active {
            return Err(invalid(id, "unload issued for an inactive resource"));
        }
        entry.in_flight = true;
        Ok(())
    }

    /// Applies a successful load completion: clears the in-flight flag and
    /// marks the resource active. Invoked exactly once per issued load,
    /// from the backend's completion context.
    pub fn complete_load(&self, id: &ResourceId) {
        let mut entries = self.entries.write();
        let entry = entries.entry(id.clone()).or_default();
        debug_assert!(entry.in_flight, "completion without an issued load");
        entry.in_flight = false;
        entry.active = true;
    }

    /// Applies a successful unload completion.
    pub fn complete_unload(&self, id: &ResourceId) {
        let mut entries = self.entries.write();
        let entry = entries.entry(id.clone()).or_default();
        debug_assert!(entry.in_flight, "completion without an issued unload");
        entry.in_flight = false;
        entry.active = false;
    }

    /// Applies a failed operation: clears the in-flight flag and leaves
    /// `active` at its last known good value, so the next tick can retry
    /// while the desired state still calls for it.
    pub fn fail_operation(&self, id: &ResourceId) {
        let mut entries = self.entries.write();
        let entry = entries.entry(id.clone()).or_default();
        debug_assert!(entry.in_flight, "failure without an issued operation");
        entry.in_flight = false;
    }
}
