//! Async bridge
//!
//! Wraps a future-producing effect so that each fork spawns a fresh future
//! on a tokio runtime and wires its output to the continuations.

use crate::task::Task;
use std::future::Future;
use tokio::runtime::Handle;
use tracing::trace;

impl<E, A> Task<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Task backed by an async effect spawned on `handle`
    ///
    /// `make` is called once per fork. The spawned future is detached: there
    /// is no cancellation, and its outcome always reaches the continuations.
    pub fn from_future<F, Fut>(handle: Handle, make: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
    {
        Self::new(move |reject, resolve| {
            let future = make();
            trace!("Spawning async effect");
            handle.spawn(async move {
                match future.await {
                    Ok(value) => resolve.resolve(value),
                    Err(error) => reject.reject(error),
                }
            });
        })
    }
}
