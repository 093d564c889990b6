#![allow(clippy::result_large_err)]

use crate::core::document::{field_path, invalid_value, lookup, require, scalar_text};
use crate::core::error::AppError;
use crate::core::model::input::TypeSpec;
use crate::core::model::naming::{qualified_name, Named};
use serde_yaml::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    /// A result file collected by glob.
    File { glob: String },
    /// Any other declared result; kept in the model but never bound to a channel.
    Value { type_name: String },
}

/// One declared result of the wrapped command.
#[derive(Debug, Clone)]
pub struct Output {
    name: String,
    prefix: Option<String>,
    kind: OutputKind,
}

impl Output {
    pub fn from_value(name: &str, value: &Value, prefix: Option<&str>) -> Result<Self, AppError> {
        let path = field_path("outputs", name);
        let (type_value, entry) = match value {
            Value::Mapping(map) => (require(map, "type", &path)?, Some(map)),
            Value::String(_) | Value::Sequence(_) => (value, None),
            _ => return Err(invalid_value(&path, "expected a mapping or a type name")),
        };

        let type_path = field_path(&path, "type");
        let type_name = match TypeSpec::parse(type_value, &type_path) {
            Ok(spec) => spec.name,
            Err(_) => describe_type(type_value),
        };

        let kind = if type_name == "File" {
            let binding_path = field_path(&path, "outputBinding");
            let binding = entry
                .and_then(|map| lookup(map, "outputBinding"))
                .ok_or_else(|| AppError::missing_field(field_path(&binding_path, "glob")))?
                .as_mapping()
                .ok_or_else(|| invalid_value(&binding_path, "expected a mapping"))?;
            let glob_path = field_path(&binding_path, "glob");
            let glob = match require(binding, "glob", &binding_path)? {
                Value::Sequence(items) if items.len() == 1 => scalar_text(&items[0], &glob_path)?,
                Value::Sequence(_) => {
                    return Err(invalid_value(&glob_path, "expected a single pattern"))
                }
                other => scalar_text(other, &glob_path)?,
            };
            OutputKind::File { glob }
        } else {
            OutputKind::Value { type_name }
        };

        debug!(output = name, kind = ?kind, "parsed output");

        Ok(Output {
            name: name.to_string(),
            prefix: prefix.map(str::to_string),
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &OutputKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, OutputKind::File { .. })
    }

    pub fn glob(&self) -> Option<&str> {
        match &self.kind {
            OutputKind::File { glob } => Some(glob),
            OutputKind::Value { .. } => None,
        }
    }
}

impl Named for Output {
    fn local_name(&self) -> &str {
        &self.name
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// File outputs name their channel: `out_<process>_<name>`.
    fn full_name(&self) -> Result<String, AppError> {
        let name = qualified_name(self.prefix(), self.local_name())?;
        Ok(match self.kind {
            OutputKind::File { .. } => format!("out_{}", name),
            OutputKind::Value { .. } => name,
        })
    }
}

fn describe_type(value: &Value) -> String {
    match value {
        Value::Mapping(map) => lookup(map, "type")
            .and_then(Value::as_str)
            .unwrap_or("record")
            .to_string(),
        _ => "union".to_string(),
    }
}
