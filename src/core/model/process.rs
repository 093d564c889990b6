#![allow(clippy::result_large_err)]

use crate::core::config::RenderConfig;
use crate::core::document::{lookup, named_entries, require, scalar_text, Document};
use crate::core::error::AppError;
use crate::core::model::naming::sanitize_identifier;
use crate::core::model::{Command, Container, Input, Output};
use crate::core::render::nextflow;
use crate::core::types::ErrorCategory;
use std::collections::HashSet;
use tracing::{debug, info};

const SUPPORTED_CLASS: &str = "CommandLineTool";

/// Root entity: one tool invocation, immutable once built.
#[derive(Debug, Clone)]
pub struct Process {
    id: String,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    command: Command,
    container: Container,
}

impl Process {
    /// Build the process from a loaded descriptor.
    pub fn from_document(document: &Document) -> Result<Self, AppError> {
        let root = document.root();

        if let Some(class) = lookup(root, "class") {
            let class = scalar_text(class, "class")?;
            if class != SUPPORTED_CLASS {
                return Err(AppError::new(
                    ErrorCategory::UnsupportedDocument,
                    format!(
                        "only `{}` descriptors can be converted, got `{}`",
                        SUPPORTED_CLASS, class
                    ),
                )
                .with_context("class", class));
            }
        }

        let id = resolve_id(document)?;
        debug!(process = %id, "resolved process id");

        let mut seen = HashSet::new();
        let mut inputs = Vec::new();
        for (name, value) in named_entries(require(root, "inputs", "")?, "inputs")? {
            let name = sanitize_identifier(&name);
            ensure_unique(&mut seen, &name, "input")?;
            inputs.push(Input::from_value(&name, value, Some(id.as_str()))?);
        }

        let mut seen = HashSet::new();
        let mut outputs = Vec::new();
        for (name, value) in named_entries(require(root, "outputs", "")?, "outputs")? {
            let name = sanitize_identifier(&name);
            ensure_unique(&mut seen, &name, "output")?;
            outputs.push(Output::from_value(&name, value, Some(id.as_str()))?);
        }

        let command = Command::from_value(require(root, "baseCommand", "")?)?;
        let container = Container::resolve(root)?;

        info!(
            process = %id,
            inputs = inputs.len(),
            outputs = outputs.len(),
            image = container.image(),
            "built process model"
        );

        Ok(Process {
            id,
            inputs,
            outputs,
            command,
            container,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Render with the default layout.
    pub fn render(&self) -> Result<String, AppError> {
        self.render_with(&RenderConfig::default())
    }

    pub fn render_with(&self, config: &RenderConfig) -> Result<String, AppError> {
        nextflow::render_process(self, config)
    }
}

/// Explicit `id` wins over the file name; both are made identifier-safe.
fn resolve_id(document: &Document) -> Result<String, AppError> {
    let raw = match lookup(document.root(), "id") {
        Some(value) => scalar_text(value, "id")?,
        None => document.file_stem().ok_or_else(|| {
            AppError::missing_field("id")
                .with_context("hint", "add an `id` or load the descriptor from a file")
        })?,
    };
    let id = sanitize_identifier(&raw);
    if id.trim_matches('_').is_empty() {
        return Err(AppError::new(
            ErrorCategory::InvalidValue,
            format!("`{}` does not yield a usable process id", raw),
        )
        .with_context("field", "id"));
    }
    Ok(id)
}

fn ensure_unique(seen: &mut HashSet<String>, name: &str, what: &str) -> Result<(), AppError> {
    if !seen.insert(name.to_string()) {
        return Err(AppError::new(
            ErrorCategory::DuplicateName,
            format!("duplicate {} name `{}`", what, name),
        ));
    }
    Ok(())
}
