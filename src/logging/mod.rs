pub mod config;
pub mod layers;

pub use config::LoggingConfig;
pub use layers::console::ConsoleOutput;

use crate::Result;
use anyhow::{anyhow, Context};
use layers::console;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Handle describing the installed logging sinks.
#[derive(Debug)]
pub struct LoggingGuard {
    console_output: ConsoleOutput,
}

impl LoggingGuard {
    /// Returns the console output configuration used during initialization.
    pub fn console_output(&self) -> ConsoleOutput {
        self.console_output
    }
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `logging.default_level`. Diagnostics go to stderr so the generated script
/// on stdout stays clean. Errors when called twice in one process.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;

    let console_layer = console::console_layer::<Registry>(config.console_output);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(env_filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        console_output: config.console_output,
    })
}
