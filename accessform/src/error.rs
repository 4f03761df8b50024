//! Error types.

use thiserror::Error;

/// Errors raised by [`Form`](crate::form::Form) bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field with this name is already registered.
    #[error("Field '{0}' is already registered")]
    DuplicateField(String),

    /// No field with this name is registered.
    #[error("Field '{0}' not found in form")]
    UnknownField(String),

    /// `begin_submit` was called while a submission is in flight.
    #[error("Form is already submitting")]
    AlreadySubmitting,
}

/// An unrecognized error display strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown error display strategy '{0}'")]
pub struct ParseStrategyError(pub String);

/// An unrecognized submission status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown submitted status '{0}'")]
pub struct ParseStatusError(pub String);

/// Errors that can occur while loading a [`FormConfig`](crate::config::FormConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("character count threshold must be within 0.0..=1.0, got {0}")]
    Threshold(f32),
}
