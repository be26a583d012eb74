//! forkline CLI - Main entry point

mod demo;
mod runner;

use clap::{Parser, Subcommand};
use forkline_foundation::{Error, ForklineConfig, LogConfig};
use forkline_task::Task;
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// forkline - cold, composable task pipelines
#[derive(Parser, Debug)]
#[command(name = "forkline")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file overriding the global and project settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fork every demo pipeline and print the results (default)
    Demo,
    /// Run a single pipeline through the exit-on-reject runner
    Run {
        /// Starting value
        #[arg(long, default_value = "4.5")]
        value: f64,

        /// Make the second step reject with this message
        #[arg(long)]
        reject: Option<String>,
    },
    /// Print the effective configuration
    Config,
}

fn init_logging(log: &LogConfig, debug: bool) {
    let log_level = if debug { "debug" } else { log.level.as_str() };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(log.with_target)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// `value -> value * 2`, or a rejection at the second step
fn run_pipeline(value: f64, reject: Option<String>) -> Task<Error, f64> {
    Task::attempt("validate", move || {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::InvalidInput(format!("not a finite number: {}", value)))
        }
    })
    .chain(move |x| {
        let reject = reject.clone();
        Task::attempt("double", move || match &reject {
            Some(message) => Err(Error::rejected("double", message.clone())),
            None => Ok(2.0 * x),
        })
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ForklineConfig::load_with_override(args.config.as_deref())?;
    init_logging(&config.log, args.debug);
    for source in &config.sources {
        tracing::debug!(%source, "Loaded config layer");
    }
    tracing::debug!(log = ?config.log, runner = ?config.runner, "Configuration loaded");

    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => demo::run_all(Handle::current(), &config.runner).await,
        Command::Run { value, reject } => {
            runner::run_to_exit(run_pipeline(value, reject), config.runner.reject_exit_code).await
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
