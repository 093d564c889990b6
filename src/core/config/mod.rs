pub mod loader;

pub use loader::ConfigLoader;

use crate::core::render::DEFAULT_INDENT_WIDTH;
use crate::logging::config::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Converter configuration loaded from cwl2nxf.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConverterConfig {
    /// Output layout
    #[serde(default)]
    pub render: RenderConfig,

    /// Diagnostics on stderr
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Layout of the generated script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderConfig {
    /// Spaces per nesting level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            indent_width: default_indent_width(),
        }
    }
}
