//! Outermost fork
//!
//! Resolution prints the value; rejection reports the error and terminates
//! the process with the configured non-zero status.

use forkline_foundation::Error;
use forkline_task::Task;
use futures::channel::oneshot;
use std::fmt::Display;

/// Human-readable report for a rejected pipeline
pub fn rejection_report(error: &Error) -> String {
    if error.is_config() {
        format!("configuration problem: {}", error)
    } else {
        format!("pipeline failed: {}", error)
    }
}

/// Reject callback: report, then exit with `exit_code`
pub fn exit_on_reject(exit_code: i32) -> impl FnOnce(Error) + Send + 'static {
    move |error| {
        tracing::error!(exit_code, error = %error, "Task rejected");
        eprintln!("{}", rejection_report(&error));
        std::process::exit(exit_code);
    }
}

/// Fork `task` as the program's final step
///
/// Returns once the value has been printed. A rejection never returns.
pub async fn run_to_exit<A>(task: Task<Error, A>, exit_code: i32) -> anyhow::Result<()>
where
    A: Display + Send + 'static,
{
    let (done_tx, done_rx) = oneshot::channel::<()>();
    task.fork(exit_on_reject(exit_code), move |value| {
        println!("{}", value);
        let _ = done_tx.send(());
    });

    done_rx
        .await
        .map_err(|_| anyhow::anyhow!("task finished without resolving or rejecting"))
}
