#![allow(clippy::result_large_err)]

use super::ConverterConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "cwl2nxf.toml";

const MAX_INDENT_WIDTH: usize = 16;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `cwl2nxf.toml` from `dir`, falling back to defaults when absent.
    pub fn load_from_dir(dir: &Path) -> Result<ConverterConfig, AppError> {
        let config = Self::load_from_file(&dir.join(CONFIG_FILE_NAME))?.unwrap_or_default();
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<ConverterConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorCategory::IoError,
                format!("failed to read config file {}", path.display()),
                e,
            )
        })?;

        Self::parse(&content).map(Some).map_err(|e| {
            e.with_context("config", path.display().to_string())
        })
    }

    pub fn parse(content: &str) -> Result<ConverterConfig, AppError> {
        toml::from_str(content).map_err(|e| {
            AppError::with_source(
                ErrorCategory::ValidationError,
                "failed to parse config file",
                e,
            )
        })
    }

    /// Validate configuration values
    pub fn validate_config(config: &ConverterConfig) -> Result<(), AppError> {
        let width = config.render.indent_width;
        if width == 0 || width > MAX_INDENT_WIDTH {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!(
                    "render.indent_width must be between 1 and {}, got {}",
                    MAX_INDENT_WIDTH, width
                ),
            ));
        }

        if Directive::from_str(&config.logging.default_level).is_err() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "logging.default_level must be a valid tracing directive",
            ));
        }

        Ok(())
    }
}
