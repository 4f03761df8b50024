use super::error::{ValidationError, filter_blocking, filter_warnings, has_blocking};

/// Validation failures collected for a single field.
#[derive(Debug, Clone)]
pub struct FieldErrors {
    /// Field name (from `.field()` call).
    pub field_name: String,
    /// Field id (for focusing).
    pub field_id: String,
    /// Every failure, blocking and advisory, in rule order.
    pub errors: Vec<ValidationError>,
}

impl FieldErrors {
    /// Check if any failure blocks submission.
    pub fn is_blocking(&self) -> bool {
        has_blocking(&self.errors)
    }

    /// Blocking failures only.
    pub fn blocking(&self) -> Vec<ValidationError> {
        filter_blocking(&self.errors)
    }

    /// Warnings only.
    pub fn warnings(&self) -> Vec<ValidationError> {
        filter_warnings(&self.errors)
    }

    /// Message of the first blocking failure.
    pub fn first_message(&self) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| super::is_blocking(e))
            .and_then(|e| e.message.as_deref())
    }
}

/// Result of validating one or more fields.
///
/// Only fields with at least one failure are recorded. Warnings never make
/// a result invalid.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    fields: Vec<FieldErrors>,
}

impl ValidationResult {
    pub(crate) fn from_fields(fields: Vec<FieldErrors>) -> Self {
        Self { fields }
    }

    /// Check if no field has a blocking failure.
    pub fn is_valid(&self) -> bool {
        !self.fields.iter().any(FieldErrors::is_blocking)
    }

    /// Check if any field has a blocking failure.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Fields with blocking failures, in validation order.
    pub fn errors(&self) -> impl Iterator<Item = &FieldErrors> {
        self.fields.iter().filter(|f| f.is_blocking())
    }

    /// Fields carrying at least one warning.
    pub fn warnings(&self) -> impl Iterator<Item = &FieldErrors> {
        self.fields
            .iter()
            .filter(|f| f.errors.iter().any(super::is_warning))
    }

    /// Every field with any failure.
    pub fn fields(&self) -> &[FieldErrors] {
        &self.fields
    }

    /// Get the first field with a blocking failure (if any).
    pub fn first_error(&self) -> Option<&FieldErrors> {
        self.errors().next()
    }

    /// Name of the first invalid field.
    pub fn first_invalid_field(&self) -> Option<&str> {
        self.first_error().map(|e| e.field_name.as_str())
    }

    /// Id of the first invalid field (for focusing).
    pub fn first_invalid_id(&self) -> Option<&str> {
        self.first_error().map(|e| e.field_id.as_str())
    }
}
