//! Result-shaped adapters
//!
//! Converts the two-callback fork into a single `Result`, either as a
//! future or by blocking the current thread.

use crate::task::Task;
use futures::channel::oneshot;
use std::future::Future;
use thiserror::Error;

/// Why a task did not produce a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError<E> {
    /// The task rejected with this value
    #[error("Task rejected: {0}")]
    Rejected(E),

    /// The fork procedure dropped both continuations without settling
    #[error("Task abandoned without settling")]
    Abandoned,
}

impl<E> TaskError<E> {
    /// The rejection value, if there is one
    pub fn into_rejection(self) -> Option<E> {
        match self {
            TaskError::Rejected(error) => Some(error),
            TaskError::Abandoned => None,
        }
    }

    /// True when no outcome ever arrived
    pub fn is_abandoned(&self) -> bool {
        matches!(self, TaskError::Abandoned)
    }
}

impl From<TaskError<forkline_foundation::Error>> for forkline_foundation::Error {
    fn from(err: TaskError<forkline_foundation::Error>) -> Self {
        match err {
            TaskError::Rejected(error) => error,
            TaskError::Abandoned => {
                forkline_foundation::Error::Internal("Task abandoned without settling".to_string())
            }
        }
    }
}

impl<E, A> Task<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Fork on first poll and complete with the outcome
    ///
    /// The returned future is as cold as the task: dropping it unpolled
    /// runs nothing.
    pub fn into_future(self) -> impl Future<Output = Result<A, TaskError<E>>> + Send + 'static {
        async move {
            let (tx, rx) = oneshot::channel();
            self.fork_result(move |outcome| {
                // receiver gone means the caller stopped waiting
                let _ = tx.send(outcome);
            });
            match rx.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(error)) => Err(TaskError::Rejected(error)),
                Err(oneshot::Canceled) => Err(TaskError::Abandoned),
            }
        }
    }

    /// Fork and block the current thread until the task settles
    ///
    /// Only for effects that complete on their own (synchronously, or on
    /// another thread/runtime). An effect that needs the calling thread to
    /// make progress will never settle here.
    pub fn wait(&self) -> Result<A, TaskError<E>> {
        futures::executor::block_on(self.clone().into_future())
    }
}
