//! Tracking of subjects of interest.
//!
//! Subjects are the entities whose positions decide which regions should be
//! active. Positions are sampled externally (once per tick, by whoever
//! drives the scheduler); the core never mutates them on its own.

use glam::Vec3;
use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Generational key for a tracked subject.
    pub struct SubjectKey;
}

/// The set of tracked subject positions.
///
/// Keys are generational: once a subject is removed, its key goes stale and
/// every operation on it is silently tolerated rather than reported as an
/// error, mirroring how externally owned entities may disappear between
/// ticks.
#[derive(Default)]
pub struct SubjectTracker {
    inner: RwLock<SlotMap<SubjectKey, Vec3>>,
}

impl SubjectTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, position: Vec3) -> SubjectKey {
        self.inner.write().insert(position)
    }

    /// Removes a subject. Returns false if the key was already stale.
    pub fn remove(&self, key: SubjectKey) -> bool {
        self.inner.write().remove(key).is_some()
    }

    /// Updates a subject's sampled position. Returns false for a stale key;
    /// external samplers may race removal.
    pub fn set_position(&self, key: SubjectKey, position: Vec3) -> bool {
        match self.inner.write().get_mut(key) {
            Some(p) => {
                *p = position;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn position(&self, key: SubjectKey) -> Option<Vec3> {
        self.inner.read().get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshots the live subject positions for one reconciliation pass.
    #[must_use]
    pub fn positions(&self) -> SmallVec<[Vec3; 4]> {
        self.inner.read().values().copied().collect()
    }
}
