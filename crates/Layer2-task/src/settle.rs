//! Settlement handles
//!
//! Every fork hands its procedure one `Reject<E>` and one `Resolve<A>`.
//! Both point at the same settlement slot, which holds the downstream
//! continuation until the first call takes it. Later calls through either
//! handle (or any clone of it) are dropped and logged.
//!
//! Per fork: Pending -> {Resolved | Rejected}. Pending is simply "the slot
//! still holds its continuation".

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

type Continuation<E, A> = Box<dyn FnOnce(Result<A, E>) + Send>;

// ============================================================================
// Slot
// ============================================================================

struct Slot<E, A> {
    continuation: Mutex<Option<Continuation<E, A>>>,
}

impl<E, A> Slot<E, A> {
    fn settle(&self, outcome: Result<A, E>) {
        let side = if outcome.is_ok() { "resolve" } else { "reject" };
        // lock released before the continuation runs; it may fork further tasks
        let continuation = self.continuation.lock().take();
        match continuation {
            Some(continuation) => {
                trace!(side, "Task settled");
                continuation(outcome);
            }
            None => {
                warn!(side, "Task already settled, ignoring late callback");
            }
        }
    }

    fn is_settled(&self) -> bool {
        self.continuation.lock().is_none()
    }
}

trait RejectSink<E>: Send + Sync {
    fn reject(&self, error: E);
    fn is_settled(&self) -> bool;
}

trait ResolveSink<A>: Send + Sync {
    fn resolve(&self, value: A);
    fn is_settled(&self) -> bool;
}

impl<E, A> RejectSink<E> for Slot<E, A> {
    fn reject(&self, error: E) {
        self.settle(Err(error));
    }

    fn is_settled(&self) -> bool {
        Slot::is_settled(self)
    }
}

impl<E, A> ResolveSink<A> for Slot<E, A> {
    fn resolve(&self, value: A) {
        self.settle(Ok(value));
    }

    fn is_settled(&self) -> bool {
        Slot::is_settled(self)
    }
}

// ============================================================================
// Handles
// ============================================================================

/// Failure continuation of a single fork
pub struct Reject<E> {
    sink: Arc<dyn RejectSink<E>>,
}

impl<E> Reject<E> {
    /// Settle the fork with `error`, unless it has already settled
    pub fn reject(self, error: E) {
        self.sink.reject(error);
    }

    /// Whether this fork has already settled (through either handle)
    pub fn is_settled(&self) -> bool {
        self.sink.is_settled()
    }
}

impl<E> Clone for Reject<E> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<E> fmt::Debug for Reject<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reject")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Success continuation of a single fork
pub struct Resolve<A> {
    sink: Arc<dyn ResolveSink<A>>,
}

impl<A> Resolve<A> {
    /// Settle the fork with `value`, unless it has already settled
    pub fn resolve(self, value: A) {
        self.sink.resolve(value);
    }

    /// Whether this fork has already settled (through either handle)
    pub fn is_settled(&self) -> bool {
        self.sink.is_settled()
    }
}

impl<A> Clone for Resolve<A> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<A> fmt::Debug for Resolve<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolve")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Build a linked `Reject`/`Resolve` pair feeding `continuation`
///
/// `continuation` runs at most once, with whichever outcome arrives first.
/// If every handle is dropped without settling, it is dropped unrun.
pub fn settlement<E, A, F>(continuation: F) -> (Reject<E>, Resolve<A>)
where
    E: 'static,
    A: 'static,
    F: FnOnce(Result<A, E>) + Send + 'static,
{
    let slot = Arc::new(Slot {
        continuation: Mutex::new(Some(Box::new(continuation) as Continuation<E, A>)),
    });
    let reject = Reject {
        sink: Arc::clone(&slot) as Arc<dyn RejectSink<E>>,
    };
    let resolve = Resolve {
        sink: slot as Arc<dyn ResolveSink<A>>,
    };
    (reject, resolve)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (
        Arc<Mutex<Vec<Result<i32, String>>>>,
        Reject<String>,
        Resolve<i32>,
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (reject, resolve) = settlement(move |outcome| sink.lock().push(outcome));
        (seen, reject, resolve)
    }

    #[test]
    fn test_resolve_settles_once() {
        let (seen, reject, resolve) = recorder();
        assert!(!resolve.is_settled());

        resolve.clone().resolve(1);
        assert!(reject.is_settled());

        resolve.resolve(2);
        reject.reject("late".to_string());

        assert_eq!(*seen.lock(), vec![Ok(1)]);
    }

    #[test]
    fn test_first_writer_wins_for_reject() {
        let (seen, reject, resolve) = recorder();
        reject.reject("boom".to_string());
        resolve.resolve(9);

        assert_eq!(*seen.lock(), vec![Err("boom".to_string())]);
    }

    #[test]
    fn test_dropping_handles_drops_continuation() {
        let token = Arc::new(());
        let held = Arc::clone(&token);
        let (reject, resolve) = settlement::<String, i32, _>(move |_| {
            let _keep = &held;
        });
        assert_eq!(Arc::strong_count(&token), 2);

        drop(reject);
        drop(resolve);
        assert_eq!(Arc::strong_count(&token), 1);
    }

    #[test]
    fn test_handles_settle_across_threads() {
        let (seen, _reject, resolve) = recorder();
        std::thread::spawn(move || resolve.resolve(42))
            .join()
            .unwrap();
        assert_eq!(*seen.lock(), vec![Ok(42)]);
    }

    #[test]
    fn test_debug_shows_state() {
        let (_seen, reject, resolve) = recorder();
        assert_eq!(format!("{:?}", reject), "Reject { settled: false }");
        resolve.resolve(0);
        assert_eq!(format!("{:?}", reject), "Reject { settled: true }");
    }
}
