//! Configuration
//!
//! - `forkline`: merged `ForklineConfig` (log + runner settings)
//! - `store`: where each config layer is read from

mod forkline;
mod store;

pub use forkline::{LogConfig, RunnerConfig, ForklineConfig, FORKLINE_CONFIG_FILE};
pub use store::{load_file, ConfigSource};
