//! The async resource backend seam.

use futures::future::BoxFuture;

use crate::errors::Result;
use crate::region::ResourceId;

/// Performs the actual load and unload work.
///
/// The core registers continuations on the returned futures and never
/// blocks on them; whether the implementation talks to the file system, a
/// scene graph or the network is its own business. There is no
/// cancellation: an issued operation runs to completion, success or
/// failure, and the scheduler waits out the result via the in-flight flag.
pub trait ResourceBackend: Send + Sync {
    /// Starts loading the resource bundle identified by `id`.
    fn load(&self, id: &ResourceId) -> BoxFuture<'static, Result<()>>;

    /// Starts unloading the resource bundle identified by `id`.
    fn unload(&self, id: &ResourceId) -> BoxFuture<'static, Result<()>>;
}
