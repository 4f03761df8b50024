//! Validatable trait for fields that accept validation results.

use super::ValidationError;

/// Trait for fields that can be validated.
///
/// Provides a common interface for extracting values from a field and
/// writing validation results back to it.
pub trait Validatable: Send + Sync {
    /// The value type used for validation.
    type Value;

    /// Extract the current value for validation.
    fn validation_value(&self) -> Self::Value;

    /// Replace the field's validation errors.
    fn set_errors(&self, errors: Vec<ValidationError>);

    /// Clear all validation errors.
    fn clear_errors(&self);

    /// Check if the field has a blocking error.
    fn has_blocking_error(&self) -> bool;

    /// Get the field id for focusing.
    fn field_id(&self) -> String;
}
