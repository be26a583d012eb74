//! Scoped resources
//!
//! `bracket` acquires a resource, runs a task with it and releases it on
//! every exit path of that task: resolution, rejection, or the inner fork
//! dropping its continuations. Release always happens before the outer
//! continuation sees the outcome.
//!
//! The body and the release step share one resource behind an `Arc`, so
//! whatever the body did to it (through interior mutability) is visible
//! when it is released. The resource itself need not be `Clone`.

use crate::settle::{settlement, Reject, Resolve};
use crate::task::Task;
use std::sync::Arc;
use tracing::debug;

/// Releases the held resource exactly once, when dropped
struct ReleaseGuard<R, D>
where
    D: Fn(&R),
{
    resource: Option<Arc<R>>,
    release: Arc<D>,
}

impl<R, D> Drop for ReleaseGuard<R, D>
where
    D: Fn(&R),
{
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            (self.release)(&resource);
            debug!(
                outstanding = Arc::strong_count(&resource) - 1,
                "Resource released"
            );
        }
    }
}

/// Acquire, use, release
///
/// `use_resource` receives a shared handle to the acquired resource and
/// `release` is handed the same resource once the inner task has settled.
/// If `acquire` rejects, neither `use_resource` nor `release` runs.
pub fn bracket<E, R, A, U, D>(acquire: Task<E, R>, use_resource: U, release: D) -> Task<E, A>
where
    E: Send + 'static,
    R: Send + Sync + 'static,
    A: Send + 'static,
    U: Fn(Arc<R>) -> Task<E, A> + Send + Sync + 'static,
    D: Fn(&R) + Send + Sync + 'static,
{
    let use_resource = Arc::new(use_resource);
    let release = Arc::new(release);

    Task::new(move |reject: Reject<E>, resolve: Resolve<A>| {
        let use_resource = Arc::clone(&use_resource);
        let release = Arc::clone(&release);

        let (acquired_reject, acquired_resolve) =
            settlement(move |acquired: Result<R, E>| match acquired {
                Err(error) => {
                    debug!("Resource acquisition rejected");
                    reject.reject(error)
                }
                Ok(resource) => {
                    debug!("Resource acquired");
                    let resource = Arc::new(resource);
                    let guard = ReleaseGuard {
                        resource: Some(Arc::clone(&resource)),
                        release,
                    };
                    use_resource(resource).fork_result(move |outcome| {
                        drop(guard);
                        match outcome {
                            Ok(value) => resolve.resolve(value),
                            Err(error) => reject.reject(error),
                        }
                    });
                }
            });

        acquire.fork_with(acquired_reject, acquired_resolve);
    })
}
