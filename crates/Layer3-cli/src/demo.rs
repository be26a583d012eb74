//! Demo scenarios
//!
//! Small pipelines showing each composition operator, plus one async step
//! and one scoped resource. Every scenario renders its value as a string so
//! the runner can print them uniformly.

use forkline_foundation::{curry2, tap, Error, RunnerConfig};
use forkline_task::{bracket, Task};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Named demo pipeline
pub struct Scenario {
    pub name: &'static str,
    pub task: Task<Error, String>,
}

impl Scenario {
    fn new(name: &'static str, task: Task<Error, String>) -> Self {
        Self { name, task }
    }
}

fn base() -> Task<Error, f64> {
    Task::of(4.5)
}

fn render<A: std::fmt::Debug>(value: A) -> String {
    format!("{:?}", value)
}

/// Build every demo scenario
///
/// `releases` counts how many times the scoped resource was released.
pub fn scenarios(handle: Handle, runner: &RunnerConfig, releases: Arc<AtomicUsize>) -> Vec<Scenario> {
    let delay = Duration::from_millis(runner.async_delay_ms);

    let add_one: Task<Error, fn(f64) -> f64> = Task::of(|x| x + 1.0);
    let add = Task::of(curry2(|a: f64, b: f64| a + b));
    let nested: Task<Error, Task<Error, i32>> = Task::of(Task::of(2));

    let delayed = Task::from_future(handle, move || async move {
        tokio::time::sleep(delay).await;
        Ok::<_, Error>(delay.as_millis() as u64)
    })
    .map(tap(|ms: &u64| tracing::debug!(ms, "Timer fired")));

    let scoped = bracket(
        Task::attempt("open", || Ok::<_, Error>(vec![1u32, 2, 3])),
        |rows: Arc<Vec<u32>>| Task::of(rows.iter().sum::<u32>()),
        move |_rows: &Vec<u32>| {
            releases.fetch_add(1, Ordering::SeqCst);
        },
    );

    vec![
        Scenario::new("of", base().map(render)),
        Scenario::new("map", base().map(|x| 2.0 * x).map(render)),
        Scenario::new("chain", base().chain(|a| Task::of(10.0 * a)).map(render)),
        Scenario::new("ap", add_one.ap(base()).map(render)),
        Scenario::new("curried ap", add.ap(base()).ap(Task::of(100.0)).map(render)),
        Scenario::new("join", nested.join().map(render)),
        Scenario::new("async", delayed.map(|ms| format!("slept {}ms", ms))),
        Scenario::new("bracket", scoped.map(render)),
    ]
}

/// Fork each scenario in order and print its outcome
pub async fn run_all(handle: Handle, runner: &RunnerConfig) -> anyhow::Result<()> {
    let releases = Arc::new(AtomicUsize::new(0));
    for scenario in scenarios(handle, runner, Arc::clone(&releases)) {
        match scenario.task.into_future().await {
            Ok(value) => println!("{:<12} {}", scenario.name, value),
            Err(err) => println!("{:<12} {}", scenario.name, err),
        }
    }
    tracing::debug!(releases = releases.load(Ordering::SeqCst), "Demo finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scenarios_match_reference_values() {
        let releases = Arc::new(AtomicUsize::new(0));
        let runner = RunnerConfig {
            async_delay_ms: 1,
            ..Default::default()
        };

        let mut results = Vec::new();
        for scenario in scenarios(Handle::current(), &runner, Arc::clone(&releases)) {
            let value = scenario.task.into_future().await.unwrap();
            results.push((scenario.name, value));
        }

        assert_eq!(
            results,
            vec![
                ("of", "4.5".to_string()),
                ("map", "9.0".to_string()),
                ("chain", "45.0".to_string()),
                ("ap", "5.5".to_string()),
                ("curried ap", "104.5".to_string()),
                ("join", "2".to_string()),
                ("async", "slept 1ms".to_string()),
                ("bracket", "6".to_string()),
            ]
        );
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scenarios_are_cold() {
        let releases = Arc::new(AtomicUsize::new(0));
        let built = scenarios(Handle::current(), &RunnerConfig::default(), Arc::clone(&releases));
        assert_eq!(built.len(), 8);
        assert_eq!(releases.load(Ordering::SeqCst), 0);
    }
}
