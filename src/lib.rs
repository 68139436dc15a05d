#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod containment;
pub mod errors;
pub mod events;
pub mod region;
pub mod scheduler;
pub mod state;
pub mod subjects;

pub use backend::ResourceBackend;
pub use containment::{BoundsContainment, Containment};
pub use errors::{Result, StreamError};
pub use events::{EventDispatcher, ObserverKey, StreamingEvent};
pub use region::{Aabb, Region, RegionSet, ResourceId};
pub use scheduler::{StreamingScheduler, TickSummary};
pub use state::ResourceStateStore;
pub use subjects::{SubjectKey, SubjectTracker};
