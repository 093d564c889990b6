#![allow(clippy::result_large_err)]

use crate::core::document::{invalid_value, lookup, scalar_text};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde_yaml::{Mapping, Value};
use tracing::debug;

const IMAGE_FIELD: &str = "dockerPull";
const DOCKER_REQUIREMENT: &str = "DockerRequirement";

/// Where the image reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSource {
    Requirements,
    Hints,
}

/// The single container image the process runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    image: String,
    source: ContainerSource,
}

impl Container {
    /// Resolve exactly one image reference: `requirements` first, then
    /// `hints`. No match is an error, never an empty directive.
    pub fn resolve(root: &Mapping) -> Result<Self, AppError> {
        if let Some(requirements) = lookup(root, "requirements") {
            if let Some(image) = scan(requirements, "requirements", false)? {
                return Ok(Container::found(image, ContainerSource::Requirements));
            }
        }
        if let Some(hints) = lookup(root, "hints") {
            if let Some(image) = scan(hints, "hints", true)? {
                return Ok(Container::found(image, ContainerSource::Hints));
            }
        }
        Err(AppError::new(
            ErrorCategory::UnresolvedContainer,
            format!(
                "no `{}` found in `requirements` or in a `{}` hint",
                IMAGE_FIELD, DOCKER_REQUIREMENT
            ),
        ))
    }

    fn found(image: String, source: ContainerSource) -> Self {
        debug!(image = %image, source = ?source, "resolved container");
        Container { image, source }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn source(&self) -> ContainerSource {
        self.source
    }
}

/// Scan a section written either as a sequence of mappings or as a mapping
/// keyed by class. `match_class` restricts hits to Docker requirements.
fn scan(section: &Value, path: &str, match_class: bool) -> Result<Option<String>, AppError> {
    match section {
        Value::Sequence(entries) => {
            for (index, entry) in entries.iter().enumerate() {
                let Some(entry) = entry.as_mapping() else {
                    continue;
                };
                if match_class && class_of(entry) != Some(DOCKER_REQUIREMENT) {
                    continue;
                }
                if let Some(image) = image_of(entry, &format!("{}[{}]", path, index))? {
                    return Ok(Some(image));
                }
            }
            Ok(None)
        }
        Value::Mapping(entries) => {
            for (key, entry) in entries {
                let Some(entry) = entry.as_mapping() else {
                    continue;
                };
                let key = key.as_str().unwrap_or_default();
                if match_class && key != DOCKER_REQUIREMENT {
                    continue;
                }
                if let Some(image) = image_of(entry, &format!("{}.{}", path, key))? {
                    return Ok(Some(image));
                }
            }
            Ok(None)
        }
        _ => Err(invalid_value(path, "expected a mapping or a sequence")),
    }
}

fn class_of(entry: &Mapping) -> Option<&str> {
    lookup(entry, "class").and_then(Value::as_str)
}

fn image_of(entry: &Mapping, path: &str) -> Result<Option<String>, AppError> {
    let Some(raw) = lookup(entry, IMAGE_FIELD) else {
        return Ok(None);
    };
    let field = format!("{}.{}", path, IMAGE_FIELD);
    let image = scalar_text(raw, &field)?;
    if image.trim().is_empty() {
        return Err(invalid_value(&field, "image reference is empty"));
    }
    Ok(Some(image.trim().to_string()))
}
