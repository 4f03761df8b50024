//! Validator builder for fluent validation API.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use regex::Regex;

use super::error::{ValidationError, create_warning};
use super::result::{FieldErrors, ValidationResult};
use super::validatable::Validatable;

/// Type alias for boxed futures used in async validation.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type alias for sync validation rule closures.
type SyncRule<V> = Box<dyn Fn(&V) -> Result<(), ValidationError> + Send + Sync>;

/// Type alias for async validation rule closures.
type AsyncRule<V> =
    Box<dyn Fn(V) -> BoxFuture<'static, Result<(), ValidationError>> + Send + Sync>;

/// Internal representation of a field being validated.
struct FieldEntry {
    name: String,
    field_id: String,
    set_errors: Box<dyn Fn(Vec<ValidationError>) + Send + Sync>,
    validate_sync: Box<dyn Fn() -> Vec<ValidationError> + Send + Sync>,
    validate_async: Box<dyn Fn() -> BoxFuture<'static, Vec<ValidationError>> + Send + Sync>,
}

impl FieldEntry {
    fn apply(&self, errors: Vec<ValidationError>) -> Option<FieldErrors> {
        (self.set_errors)(errors.clone());
        if errors.is_empty() {
            return None;
        }
        log::debug!(
            "Field '{}' failed {} rule(s)",
            self.name,
            errors.len()
        );
        Some(FieldErrors {
            field_name: self.name.clone(),
            field_id: self.field_id.clone(),
            errors,
        })
    }
}

/// Builder for validating multiple form fields.
///
/// Every failing rule is recorded (not just the first), so warnings and
/// blocking errors on the same field are both reported. Results are written
/// back to each field through [`Validatable::set_errors`].
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to validate.
    pub fn field<W: Validatable + Clone + 'static>(
        self,
        field: &W,
        name: impl Into<String>,
    ) -> FieldBuilder<W>
    where
        W::Value: Clone + Send + 'static,
    {
        FieldBuilder {
            validator: self,
            field: field.clone(),
            name: name.into(),
            sync_rules: Vec::new(),
            async_rules: Vec::new(),
        }
    }

    /// Run all synchronous validations.
    pub fn validate(self) -> ValidationResult {
        let fields = self
            .fields
            .iter()
            .filter_map(|field| field.apply((field.validate_sync)()))
            .collect();
        ValidationResult::from_fields(fields)
    }

    /// Run all validations including async rules.
    pub async fn validate_async(self) -> ValidationResult {
        let mut fields = Vec::new();

        for field in &self.fields {
            let errors = (field.validate_async)().await;
            if let Some(failed) = field.apply(errors) {
                fields.push(failed);
            }
        }

        ValidationResult::from_fields(fields)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder<W: Validatable> {
    validator: Validator,
    field: W,
    name: String,
    sync_rules: Vec<SyncRule<W::Value>>,
    async_rules: Vec<AsyncRule<W::Value>>,
}

impl<W: Validatable + Clone + 'static> FieldBuilder<W>
where
    W::Value: Clone + Send + 'static,
{
    /// Add a custom blocking rule. `f` returns `true` when the value passes.
    pub fn rule<F>(mut self, kind: impl Into<String>, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&W::Value) -> bool + Send + Sync + 'static,
    {
        let error = ValidationError::new(kind, msg);
        self.sync_rules.push(Box::new(move |v| {
            if f(v) { Ok(()) } else { Err(error.clone()) }
        }));
        self
    }

    /// Add an advisory rule. A failing value yields a `warn:`-prefixed error
    /// that does not block submission.
    pub fn warning<F>(mut self, kind: &str, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&W::Value) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        let warning = create_warning(kind, Some(&msg));
        self.sync_rules.push(Box::new(move |v| {
            if f(v) { Ok(()) } else { Err(warning.clone()) }
        }));
        self
    }

    /// Add a custom asynchronous blocking rule.
    pub fn rule_async<F, Fut>(mut self, kind: impl Into<String>, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(W::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let error = ValidationError::new(kind, msg);
        self.async_rules.push(Box::new(move |v| {
            let fut = f(v);
            let error = error.clone();
            Box::pin(async move { if fut.await { Ok(()) } else { Err(error) } })
        }));
        self
    }

    /// Continue to the next field.
    pub fn field<W2: Validatable + Clone + 'static>(
        self,
        field: &W2,
        name: impl Into<String>,
    ) -> FieldBuilder<W2>
    where
        W2::Value: Clone + Send + 'static,
    {
        let validator = self.finalize();
        validator.field(field, name)
    }

    /// Finalize and run all synchronous validations.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    /// Finalize and run all validations including async rules.
    pub async fn validate_async(self) -> ValidationResult {
        self.finalize().validate_async().await
    }

    /// Finalize this field and return the validator.
    fn finalize(self) -> Validator {
        let field_id = self.field.field_id();
        let name = self.name;

        let field_for_sync = self.field.clone();
        let field_for_async = self.field.clone();
        let field_for_errors = self.field;

        let sync_rules = Arc::new(self.sync_rules);
        let async_rules = Arc::new(self.async_rules);

        let sync_rules_for_sync = Arc::clone(&sync_rules);

        let validate_sync: Box<dyn Fn() -> Vec<ValidationError> + Send + Sync> =
            Box::new(move || {
                let value = field_for_sync.validation_value();
                sync_rules_for_sync
                    .iter()
                    .filter_map(|rule| rule(&value).err())
                    .collect()
            });

        let sync_rules_for_async = Arc::clone(&sync_rules);
        let async_rules_for_async = Arc::clone(&async_rules);

        let validate_async: Box<
            dyn Fn() -> BoxFuture<'static, Vec<ValidationError>> + Send + Sync,
        > = Box::new(move || {
            let value = field_for_async.validation_value();
            let sync_rules = Arc::clone(&sync_rules_for_async);
            let async_rules = Arc::clone(&async_rules_for_async);

            Box::pin(async move {
                let mut errors: Vec<ValidationError> = sync_rules
                    .iter()
                    .filter_map(|rule| rule(&value).err())
                    .collect();

                for rule in async_rules.iter() {
                    if let Err(error) = rule(value.clone()).await {
                        errors.push(error);
                    }
                }

                errors
            })
        });

        let set_errors: Box<dyn Fn(Vec<ValidationError>) + Send + Sync> =
            Box::new(move |errors| {
                if errors.is_empty() {
                    field_for_errors.clear_errors();
                } else {
                    field_for_errors.set_errors(errors);
                }
            });

        let mut validator = self.validator;
        validator.fields.push(FieldEntry {
            name,
            field_id,
            set_errors,
            validate_sync,
            validate_async,
        });

        validator
    }
}

// Built-in rules for String values
impl<W: Validatable<Value = String> + Clone + 'static> FieldBuilder<W> {
    /// Require the field to be non-blank.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule("required", |v| !v.trim().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule("minlength", move |v| v.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule("maxlength", move |v| v.chars().count() <= max, msg)
    }

    /// Require the value to match a compiled pattern.
    pub fn pattern(self, re: Regex, msg: impl Into<String>) -> Self {
        self.rule("pattern", move |v| re.is_match(v), msg)
    }

    /// Require a valid email address.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            "email",
            |v| {
                if v.is_empty() {
                    true // Empty is valid; use required() for non-empty
                } else {
                    email_address::EmailAddress::is_valid(v)
                }
            },
            msg,
        )
    }

    /// Require the value to equal another value.
    pub fn equals(self, other: String, msg: impl Into<String>) -> Self {
        self.rule("equals", move |v| v == &other, msg)
    }

    /// Require the value to contain a substring.
    pub fn contains(self, substr: impl Into<String>, msg: impl Into<String>) -> Self {
        let substr = substr.into();
        self.rule("contains", move |v| v.contains(&substr), msg)
    }
}

// Built-in rules for bool values
impl<W: Validatable<Value = bool> + Clone + 'static> FieldBuilder<W> {
    /// Require the checkbox to be checked.
    pub fn checked(self, msg: impl Into<String>) -> Self {
        self.rule("required", |&v| v, msg)
    }

    /// Require the checkbox to be unchecked.
    pub fn unchecked(self, msg: impl Into<String>) -> Self {
        self.rule("unchecked", |&v| !v, msg)
    }
}

// Built-in rules for Option<usize> values
impl<W: Validatable<Value = Option<usize>> + Clone + 'static> FieldBuilder<W> {
    /// Require that an option is selected.
    pub fn selected(self, msg: impl Into<String>) -> Self {
        self.rule("required", |v| v.is_some(), msg)
    }

    /// Require a specific option to be selected.
    pub fn selected_index(self, index: usize, msg: impl Into<String>) -> Self {
        self.rule("selected", move |v| *v == Some(index), msg)
    }
}
