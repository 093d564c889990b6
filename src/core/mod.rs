#![allow(clippy::result_large_err)]

pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod render;
pub mod types;

pub use config::{ConfigLoader, ConverterConfig, RenderConfig};
pub use document::Document;
pub use error::AppError;
pub use model::{Command, Container, Input, InputKind, Named, Output, OutputKind, Process};
pub use render::{render_process, Renderer};
pub use types::{ErrorCategory, ErrorSeverity};

use std::path::Path;

/// Load a descriptor file and render it. Nothing is returned unless the whole
/// conversion succeeds.
pub fn convert_file(path: &Path, config: &RenderConfig) -> Result<String, AppError> {
    let document = Document::load(path)?;
    Process::from_document(&document)?.render_with(config)
}

/// Convert descriptor text. `source` supplies the fallback process id.
pub fn convert_str(
    text: &str,
    source: Option<&Path>,
    config: &RenderConfig,
) -> Result<String, AppError> {
    let document = Document::parse(text, source)?;
    Process::from_document(&document)?.render_with(config)
}
