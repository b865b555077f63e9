// resub/src/logger.rs
//! Logger bootstrap for the resub CLI, backed by env_logger.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// An explicit level (from `--quiet`/`--debug`) wins over `RUST_LOG`;
/// otherwise `RUST_LOG` is honored with an `info` default. Safe to call
/// more than once; subsequent calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
