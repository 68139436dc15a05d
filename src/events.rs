//! Activation and deactivation notifications.
//!
//! External collaborators (visuals, gameplay) subscribe here to react to
//! resources becoming active or inactive. Events carry the resource id and
//! its new state, nothing else.

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::region::ResourceId;

/// Fired after the state store already reflects the transition, so
/// observers reading the store see the new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamingEvent {
    /// The resource finished loading and is now active.
    Activated(ResourceId),
    /// The resource finished unloading and is no longer active.
    Deactivated(ResourceId),
}

impl StreamingEvent {
    #[must_use]
    pub fn resource(&self) -> &ResourceId {
        match self {
            Self::Activated(id) | Self::Deactivated(id) => id,
        }
    }
}

new_key_type! {
    /// Identity of a subscribed observer, used for removal.
    pub struct ObserverKey;
}

type Callback = Arc<dyn Fn(&StreamingEvent) + Send + Sync>;

/// Observer registry with explicit subscribe/unsubscribe.
///
/// Dispatch is copy-on-iterate: callbacks are cloned out of the lock before
/// being invoked, so an observer may unsubscribe (itself included) while a
/// dispatch is running.
#[derive(Default)]
pub struct EventDispatcher {
    observers: RwLock<SlotMap<ObserverKey, Callback>>,
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&StreamingEvent) + Send + Sync + 'static,
    ) -> ObserverKey {
        self.observers.write().insert(Arc::new(callback))
    }

    /// Returns false if the key was already removed.
    pub fn unsubscribe(&self, key: ObserverKey) -> bool {
        self.observers.write().remove(key).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    pub fn emit(&self, event: &StreamingEvent) {
        let callbacks: SmallVec<[Callback; 4]> = self.observers.read().values().cloned().collect();
        for callback in callbacks {
            callback(event);
        }
    }
}
