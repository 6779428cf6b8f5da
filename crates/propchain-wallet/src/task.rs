//! Single-threaded task spawning.
//!
//! Provider event handlers are synchronous callbacks, but a forced
//! disconnect still owes the provider an asynchronous revocation. The
//! handler clears local state inline and hands the rest to a [`Spawner`].

use std::future::Future;
use std::pin::Pin;

/// A boxed, non-`Send` unit future.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Runs detached tasks on the current thread's event loop.
pub trait Spawner {
    fn spawn_local(&self, task: LocalTask);
}
