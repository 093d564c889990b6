#![allow(clippy::result_large_err)]

use crate::core::document::{invalid_value, scalar_text};
use crate::core::error::AppError;
use serde_yaml::Value;

/// Base executable invocation, emitted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<String>,
}

impl Command {
    /// `baseCommand` is a sequence of tokens or a single string.
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let tokens = match value {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| scalar_text(item, &format!("baseCommand[{}]", index)))
                .collect::<Result<Vec<_>, _>>()?,
            Value::Mapping(_) => {
                return Err(invalid_value(
                    "baseCommand",
                    "expected a string or a sequence of strings",
                ))
            }
            other => vec![scalar_text(other, "baseCommand")?],
        };
        Ok(Command { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}
