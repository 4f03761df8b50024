use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::state::State;
use crate::validation::{
    Validatable, ValidationError, filter_blocking, filter_warnings, has_blocking,
};
use crate::visibility::FieldState;

/// Unique identifier for a Field instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field-{}", self.0)
    }
}

type FieldValidator<T> = Arc<dyn Fn(&T) -> Vec<ValidationError> + Send + Sync>;

/// A form field with reactive state.
///
/// `Field` owns its value, its touch and dirty flags and its current
/// validation errors, each in a [`State`] cell, so anything derived from
/// it (error visibility, ARIA attributes) follows along. Clones share state.
///
/// # Example
///
/// ```
/// use accessform::field::Field;
/// use accessform::validation::ValidationError;
/// use accessform::visibility::FieldState;
///
/// let email = Field::new("email", String::new()).validate_with(|v: &String| {
///     if v.is_empty() {
///         vec![ValidationError::new("required", "Email is required")]
///     } else {
///         Vec::new()
///     }
/// });
///
/// assert!(email.invalid());
/// email.blur();
/// assert!(email.touched());
/// email.set_value("me@example.com".to_string());
/// assert!(!email.invalid());
/// ```
pub struct Field<T> {
    id: FieldId,
    name: Arc<str>,
    value: State<T>,
    initial: State<T>,
    touched: State<bool>,
    dirty: State<bool>,
    focused: State<bool>,
    errors: State<Vec<ValidationError>>,
    validator: Option<FieldValidator<T>>,
    touch_on_blur: Arc<AtomicBool>,
}

impl<T: Clone> Field<T> {
    /// Create a field with an initial value
    pub fn new(name: impl Into<String>, value: T) -> Self {
        let name: String = name.into();
        Self {
            id: FieldId::new(),
            name: name.into(),
            value: State::new(value.clone()),
            initial: State::new(value),
            touched: State::new(false),
            dirty: State::new(false),
            focused: State::new(false),
            errors: State::new(Vec::new()),
            validator: None,
            touch_on_blur: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Attach a validator run on creation and on every value change.
    pub fn validate_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Vec<ValidationError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(f));
        self.revalidate();
        self
    }

    /// Get the current value
    pub fn value(&self) -> T {
        self.value.get()
    }

    /// Set the value, marking the field dirty and re-running its validator.
    ///
    /// Without a validator, errors are cleared on change.
    pub fn set_value(&self, value: T) {
        self.value.replace(value);
        self.dirty.replace_if_changed(true);
        if self.validator.is_some() {
            self.revalidate();
        } else {
            self.clear_errors();
        }
    }

    /// Restore the initial value and clear touch, dirty and error state.
    pub fn reset(&self) {
        self.value.replace(self.initial.peek());
        self.mark_untouched();
        self.dirty.replace_if_changed(false);
        if self.validator.is_some() {
            self.revalidate();
        } else {
            self.clear_errors();
        }
    }

    /// Reset to a new initial value.
    pub fn reset_to(&self, value: T) {
        self.initial.replace(value);
        self.reset();
    }

    /// Re-run the attached validator against the current value.
    pub fn revalidate(&self) {
        if let Some(validator) = &self.validator {
            let errors = self.value.with(|v| validator(v));
            self.errors.set(errors);
        }
    }
}

impl<T> Field<T> {
    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Get the field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value cell, for binding
    pub fn value_signal(&self) -> &State<T> {
        &self.value
    }

    /// The touched cell
    pub fn touched_signal(&self) -> &State<bool> {
        &self.touched
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// The field received focus
    pub fn focus(&self) {
        self.focused.replace_if_changed(true);
    }

    /// The field lost focus; marks it touched unless touch marking is manual
    pub fn blur(&self) {
        self.focused.replace_if_changed(false);
        if self.touch_on_blur.load(Ordering::SeqCst) && self.touched.replace_if_changed(true) {
            log::trace!("Field '{}' touched on blur", self.name);
        }
    }

    /// Enable or disable touch marking on blur
    pub fn set_touch_on_blur(&self, enabled: bool) {
        self.touch_on_blur.store(enabled, Ordering::SeqCst);
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    pub fn mark_touched(&self) {
        self.touched.replace_if_changed(true);
    }

    /// Forget a previous blur or submit attempt
    pub fn mark_untouched(&self) {
        self.touched.replace_if_changed(false);
    }

    /// Check if the value was changed since creation or the last reset
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    // -------------------------------------------------------------------------
    // Errors
    // -------------------------------------------------------------------------

    /// Replace the current errors; an equal list leaves dependents alone
    pub fn set_errors(&self, errors: Vec<ValidationError>) {
        self.errors.set(errors);
    }

    /// Clear all errors
    pub fn clear_errors(&self) {
        self.errors.set(Vec::new());
    }

    /// Every current error, warnings included
    pub fn errors(&self) -> Vec<ValidationError> {
        self.errors.get()
    }

    pub fn blocking_errors(&self) -> Vec<ValidationError> {
        self.errors.with(|errors| filter_blocking(errors))
    }

    pub fn warnings(&self) -> Vec<ValidationError> {
        self.errors.with(|errors| filter_warnings(errors))
    }

    /// Check if any error blocks submission
    pub fn is_invalid(&self) -> bool {
        self.errors.with(|errors| has_blocking(errors))
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: Arc::clone(&self.name),
            value: self.value.clone(),
            initial: self.initial.clone(),
            touched: self.touched.clone(),
            dirty: self.dirty.clone(),
            focused: self.focused.clone(),
            errors: self.errors.clone(),
            validator: self.validator.clone(),
            touch_on_blur: Arc::clone(&self.touch_on_blur),
        }
    }
}

impl<T: std::fmt::Debug + Clone> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("value", &self.value.peek())
            .field("touched", &self.touched.peek())
            .field("errors", &self.errors.peek())
            .finish()
    }
}

impl<T> FieldState for Field<T> {
    fn invalid(&self) -> bool {
        self.is_invalid()
    }

    fn touched(&self) -> bool {
        self.touched.get()
    }

    fn errors(&self) -> Vec<ValidationError> {
        self.errors.get()
    }
}

impl<T: Clone + Send + Sync> Validatable for Field<T> {
    type Value = T;

    fn validation_value(&self) -> T {
        self.value.peek()
    }

    fn set_errors(&self, errors: Vec<ValidationError>) {
        Field::set_errors(self, errors);
    }

    fn clear_errors(&self) {
        Field::clear_errors(self);
    }

    fn has_blocking_error(&self) -> bool {
        self.is_invalid()
    }

    fn field_id(&self) -> String {
        self.id.to_string()
    }
}

/// Attribute names consulted by [`resolve_field_name`], in priority order.
pub const NAME_ATTRIBUTES: [&str; 3] = ["name", "id", "aria-label"];

/// Resolve the name a field is reported under.
///
/// An explicit non-blank name wins; otherwise the first non-blank value of
/// `name`, `id` or `aria-label` among `attributes` is used.
pub fn resolve_field_name<'a>(
    explicit: Option<&str>,
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Option<String> {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }

    let attributes: Vec<(&str, &str)> = attributes.into_iter().collect();
    NAME_ATTRIBUTES.iter().find_map(|wanted| {
        attributes
            .iter()
            .filter(|(key, _)| key == wanted)
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
            .map(str::to_string)
    })
}
