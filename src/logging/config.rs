use crate::logging::layers::console::ConsoleOutput;
use serde::{Deserialize, Serialize};

const DEFAULT_LEVEL: &str = "warn";

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

/// `[logging]` section of the converter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub default_level: String,

    /// Console sink for diagnostics; stdout is reserved for the script
    #[serde(default)]
    pub console_output: ConsoleOutput,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            console_output: ConsoleOutput::default(),
        }
    }
}
