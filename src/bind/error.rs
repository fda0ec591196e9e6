use thiserror::Error;

use super::{Value, ValueKind};

/// A raw string that could not be converted to its target kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("Value cannot be blank/empty")]
    Blank,

    #[error("Value must be numeric/number ({kind} type)")]
    NotNumeric { kind: &'static str },

    #[error("Value must be non-negative numeric/number ({kind} type)")]
    NotNonNegative { kind: &'static str },

    #[error(
        "Value must be a Boolean type. Case-insensitive allowed values: \
         ([True = true, yes, 1], [False = false, no, 0])"
    )]
    NotBoolean,

    #[error("{value} is not defined in {enum_name} enumeration. Valid values: {}", .members.join(","))]
    UndefinedMember {
        value: String,
        enum_name: &'static str,
        members: &'static [&'static str],
    },

    #[error("expected a {expected} value, found {found}")]
    Mismatch { expected: String, found: &'static str },

    /// Raised by custom [`Bindable`](super::Bindable) implementations.
    #[error("{0}")]
    Custom(String),
}

impl ConvertError {
    pub fn mismatch(expected: &ValueKind, found: &Value) -> Self {
        ConvertError::Mismatch {
            expected: expected.to_string(),
            found: found.variant_name(),
        }
    }
}

/// Failure reported by a post-load hook. Its message is recorded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Failure to bind a single field.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FieldError {
    #[error("{key} is not found in the configuration (Expected type: {expected})")]
    MissingRequired { key: String, expected: ValueKind },

    #[error(transparent)]
    Conversion(#[from] ConvertError),

    #[error(transparent)]
    Hook(#[from] HookError),
}

/// Every field failure of one resolution, one line per field in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .lines.join("\n"))]
pub struct ErrorReport {
    lines: Vec<String>,
}

impl ErrorReport {
    /// Appends `Config Error: <key> [<message>] <suffix>`.
    pub fn record(&mut self, key: &str, error: &FieldError, suffix: Option<&str>) {
        self.lines.push(format!(
            "Config Error: {key} [{error}] {}",
            suffix.unwrap_or_default()
        ));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    #[error("Unable to find {0} in the configuration")]
    SectionNotFound(String),

    #[error(transparent)]
    Invalid(#[from] ErrorReport),
}
