//! # forkline-foundation
//!
//! Foundation layer for forkline:
//! - Error: shared `Error` / `Result`
//! - Config: `ForklineConfig` (global + project TOML, merged)
//! - Combinators: identity, compose, curry2, tap, curried_map
//! - Functor: compile-time functor protocol
//!
//! Nothing here depends on `Task`; the task crate builds on these pieces.

pub mod combinators;
pub mod config;
pub mod error;
pub mod functor;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config
// ============================================================================
pub use config::{ConfigSource, ForklineConfig, LogConfig, RunnerConfig, FORKLINE_CONFIG_FILE};

// ============================================================================
// Combinators / Functor
// ============================================================================
pub use combinators::{compose, curried_map, curry2, identity, ignore, tap, Curried};
pub use functor::Functor;
