//! Task definition and composition
//!
//! A `Task<E, A>` is a cold description of a computation that ends in
//! exactly one of two outcomes: rejection with `E` or resolution with `A`.
//! Nothing runs until [`Task::fork`]; every fork re-runs the underlying
//! effect from scratch.

use crate::settle::{settlement, Reject, Resolve};
use forkline_foundation::{combinators, identity, Functor};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type Procedure<E, A> = dyn Fn(Reject<E>, Resolve<A>) + Send + Sync;

/// Deferred, possibly-failing computation
///
/// Cloning is cheap and shares the (immutable) fork procedure. Composition
/// moves the combined tasks into the new procedure.
pub struct Task<E, A> {
    procedure: Arc<Procedure<E, A>>,
}

impl<E, A> Clone for Task<E, A> {
    fn clone(&self) -> Self {
        Self {
            procedure: Arc::clone(&self.procedure),
        }
    }
}

impl<E, A> fmt::Debug for Task<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

impl<E, A> Task<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wrap a raw fork procedure
    ///
    /// The procedure receives the two continuations of one fork. It may
    /// settle synchronously, or move the handles into a thread or runtime
    /// and settle later.
    pub fn new<P>(procedure: P) -> Self
    where
        P: Fn(Reject<E>, Resolve<A>) + Send + Sync + 'static,
    {
        Self {
            procedure: Arc::new(procedure),
        }
    }

    /// Always resolves with (a clone of) `value`
    pub fn of(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::new(move |_reject, resolve| resolve.resolve(value.clone()))
    }

    /// Always rejects with (a clone of) `error`
    pub fn rejected(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::new(move |reject, _resolve| reject.reject(error.clone()))
    }

    /// Settles with a fixed result
    pub fn from_result(result: Result<A, E>) -> Self
    where
        A: Clone + Sync,
        E: Clone + Sync,
    {
        Self::new(move |reject, resolve| match result.clone() {
            Ok(value) => resolve.resolve(value),
            Err(error) => reject.reject(error),
        })
    }

    /// Checked synchronous effect, re-run on every fork
    pub fn attempt<F>(step: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Result<A, E> + Send + Sync + 'static,
    {
        let step = step.into();
        Self::new(move |reject, resolve| {
            trace!(step = %step, "Running checked step");
            match f() {
                Ok(value) => resolve.resolve(value),
                Err(error) => {
                    debug!(step = %step, "Checked step rejected");
                    reject.reject(error)
                }
            }
        })
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run the effect, reporting through exactly one of the two callbacks
    ///
    /// Callbacks must be `Send + 'static` because the effect may complete on
    /// another thread. Whichever outcome arrives first wins; anything after
    /// it is ignored.
    pub fn fork<RJ, RS>(&self, reject: RJ, resolve: RS)
    where
        RJ: FnOnce(E) + Send + 'static,
        RS: FnOnce(A) + Send + 'static,
    {
        self.fork_result(move |outcome| match outcome {
            Ok(value) => resolve(value),
            Err(error) => reject(error),
        });
    }

    /// Like [`Task::fork`], with the outcome as a single `Result`
    pub fn fork_result<F>(&self, callback: F)
    where
        F: FnOnce(Result<A, E>) + Send + 'static,
    {
        let (reject, resolve) = settlement(callback);
        self.fork_with(reject, resolve);
    }

    /// Run the effect against existing continuation handles
    pub fn fork_with(&self, reject: Reject<E>, resolve: Resolve<A>) {
        trace!("Forking task");
        (self.procedure)(reject, resolve);
    }

    // ========================================================================
    // Functor / Monad / Applicative
    // ========================================================================

    /// Transform the resolved value; rejections pass through untouched
    pub fn map<B, F>(self, f: F) -> Task<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Task::new(move |reject: Reject<E>, resolve: Resolve<B>| {
            let f = Arc::clone(&f);
            let (inner_reject, inner_resolve) = settlement(move |outcome| match outcome {
                Ok(value) => resolve.resolve(f(value)),
                Err(error) => reject.reject(error),
            });
            self.fork_with(inner_reject, inner_resolve);
        })
    }

    /// Sequence a dependent task
    ///
    /// On resolution with `x`, forks `f(x)` with the outer continuations.
    /// On rejection, `f` is never called.
    pub fn chain<B, F>(self, f: F) -> Task<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> Task<E, B> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Task::new(move |reject: Reject<E>, resolve: Resolve<B>| {
            let f = Arc::clone(&f);
            let (inner_reject, inner_resolve) = settlement(move |outcome| match outcome {
                Ok(value) => f(value).fork_with(reject, resolve),
                Err(error) => reject.reject(error),
            });
            self.fork_with(inner_reject, inner_resolve);
        })
    }

    /// Apply the function this task resolves with to the value of `other`
    ///
    /// Left to right: `self` settles before `other` is forked, and a
    /// rejection of `self` means `other` never runs.
    pub fn ap<X, B>(self, other: Task<E, X>) -> Task<E, B>
    where
        A: Fn(X) -> B + Sync,
        X: Send + 'static,
        B: Send + 'static,
    {
        self.chain(move |f: A| other.clone().map(f))
    }

    // ========================================================================
    // Extras
    // ========================================================================

    /// Transform the rejection value; resolutions pass through untouched
    pub fn map_rejected<G, F>(self, f: F) -> Task<G, A>
    where
        G: Send + 'static,
        F: Fn(E) -> G + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Task::new(move |reject: Reject<G>, resolve: Resolve<A>| {
            let f = Arc::clone(&f);
            let (inner_reject, inner_resolve) = settlement(move |outcome| match outcome {
                Ok(value) => resolve.resolve(value),
                Err(error) => reject.reject(f(error)),
            });
            self.fork_with(inner_reject, inner_resolve);
        })
    }

    /// Observe the resolved value without changing it
    pub fn tap<F>(self, f: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.map(combinators::tap(f))
    }
}

impl<E, A> Task<E, Task<E, A>>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Flatten a task of a task: `chain(identity)`
    pub fn join(self) -> Task<E, A> {
        self.chain(identity)
    }
}

impl<E, A, B> Functor<B> for Task<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
{
    type Unwrapped = A;
    type To = Task<E, B>;

    fn map<F>(self, f: F) -> Task<E, B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Task::map(self, f)
    }
}
