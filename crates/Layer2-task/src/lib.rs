//! # forkline-task
//!
//! Cold, composable two-outcome computations.
//!
//! ## Features
//!
//! - `Task<E, A>` with `of` / `rejected` / `map` / `chain` / `ap` / `join`
//! - `fork` with first-writer-wins settlement (`Reject` / `Resolve`)
//! - Result-shaped adapters: `fork_result`, `into_future`, `wait`
//! - Async bridge onto a tokio runtime (`Task::from_future`)
//! - Scoped resources released on every exit path (`bracket`)
//!
//! ```
//! use forkline_task::Task;
//!
//! let price: Task<String, f64> = Task::of(4.5)
//!     .map(|x| 2.0 * x)
//!     .chain(|x| Task::of(10.0 * x));
//! assert_eq!(price.wait(), Ok(90.0));
//! ```

pub mod bridge;
pub mod outcome;
pub mod resource;
pub mod settle;
pub mod task;

pub use outcome::TaskError;
pub use resource::bracket;
pub use settle::{settlement, Reject, Resolve};
pub use task::Task;

/// `A -> Task<E, B>`: a step that `chain` can sequence
pub trait TaskFunc<E, A, B>: Fn(A) -> Task<E, B> + Send + Sync + 'static {}

impl<E, A, B, F> TaskFunc<E, A, B> for F where F: Fn(A) -> Task<E, B> + Send + Sync + 'static {}
