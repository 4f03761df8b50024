//! Validation errors and the blocking/warning split.
//!
//! A single flat list of [`ValidationError`]s carries both submission
//! blockers and advisories. Advisories are tagged by a `kind` that starts
//! with [`WARNING_PREFIX`]; the test is purely syntactic.

use serde::{Deserialize, Serialize};

/// Prefix marking a validation error as a non-blocking warning.
pub const WARNING_PREFIX: &str = "warn:";

/// A tagged validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    /// Category identifier, e.g. `"required"` or `"warn:weak-password"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// How a validation error affects submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Prevents submission and is surfaced prominently.
    Blocking,
    /// Advisory only.
    Warning,
}

impl ValidationError {
    /// Creates a blocking error (unless `kind` carries the warning prefix).
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            message: Some(message.into()),
        }
    }

    /// Creates an error with a kind and no message.
    pub fn with_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            message: None,
        }
    }

    /// Severity derived from the kind prefix.
    pub fn severity(&self) -> Severity {
        if is_warning(self) {
            Severity::Warning
        } else {
            Severity::Blocking
        }
    }

    /// The kind with any warning prefix removed.
    pub fn category(&self) -> Option<&str> {
        self.kind
            .as_deref()
            .map(|kind| kind.strip_prefix(WARNING_PREFIX).unwrap_or(kind))
    }

    /// The message, or an empty string.
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.message) {
            (Some(kind), Some(message)) => write!(f, "{}: {}", kind, message),
            (Some(kind), None) => write!(f, "{}", kind),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "validation error"),
        }
    }
}

/// True iff `kind` starts with exactly `"warn:"`.
pub fn is_warning(error: &ValidationError) -> bool {
    error
        .kind
        .as_deref()
        .is_some_and(|kind| kind.starts_with(WARNING_PREFIX))
}

/// True for everything that is not a warning, including errors with no kind.
pub fn is_blocking(error: &ValidationError) -> bool {
    !is_warning(error)
}

/// Build a warning from an unprefixed category name.
pub fn create_warning(kind: &str, message: Option<&str>) -> ValidationError {
    ValidationError {
        kind: Some(format!("{WARNING_PREFIX}{kind}")),
        message: message.map(str::to_owned),
    }
}

/// Blocking errors, in their original order.
pub fn filter_blocking(errors: &[ValidationError]) -> Vec<ValidationError> {
    errors.iter().filter(|e| is_blocking(e)).cloned().collect()
}

/// Warnings, in their original order.
pub fn filter_warnings(errors: &[ValidationError]) -> Vec<ValidationError> {
    errors.iter().filter(|e| is_warning(e)).cloned().collect()
}

/// True when `errors` is empty or holds nothing but warnings.
pub fn has_only_warnings(errors: &[ValidationError]) -> bool {
    errors.iter().all(is_warning)
}

/// True when at least one error blocks submission.
pub fn has_blocking(errors: &[ValidationError]) -> bool {
    errors.iter().any(is_blocking)
}
