//! Form-level state: field registry and submission lifecycle.

use std::future::Future;
use std::sync::{Arc, RwLock};

use crate::aria::{AriaAttributes, Assistive, FieldIds, LiveRegion};
use crate::computed::Computed;
use crate::config::FormConfig;
use crate::error::FormError;
use crate::field::{Field, FieldId};
use crate::hint::CharacterCount;
use crate::state::State;
use crate::validation::ValidationError;
use crate::visibility::{ErrorDisplayStrategy, FieldState, SubmittedStatus, compute_show_errors};

/// Type-erased view of a registered field.
pub trait FormControl: FieldState + Send + Sync {
    fn name(&self) -> &str;
    fn field_id(&self) -> FieldId;
    fn mark_touched(&self);
    fn set_touch_on_blur(&self, enabled: bool);
    fn reset(&self);
}

impl<T: Clone + Send + Sync> FormControl for Field<T> {
    fn name(&self) -> &str {
        Field::name(self)
    }

    fn field_id(&self) -> FieldId {
        self.id()
    }

    fn mark_touched(&self) {
        Field::mark_touched(self);
    }

    fn set_touch_on_blur(&self, enabled: bool) {
        Field::set_touch_on_blur(self, enabled);
    }

    fn reset(&self) {
        Field::reset(self);
    }
}

/// Ends a submission attempt when dropped.
struct SubmitAttempt<'a> {
    form: &'a Form,
}

impl Drop for SubmitAttempt<'_> {
    fn drop(&mut self) {
        self.form.finish_submit();
    }
}

/// Outcome of [`Form::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<R> {
    /// A blocking error prevented the action from running.
    Blocked {
        /// Name of the first invalid field, the focus target.
        first_invalid: Option<String>,
    },
    /// The action ran and produced this value.
    Completed(R),
}

impl<R> SubmitOutcome<R> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// A form: a named set of fields plus the submission status they share.
///
/// Cheap to clone; clones share fields and status.
///
/// # Example
///
/// ```
/// use accessform::field::Field;
/// use accessform::form::Form;
/// use accessform::validation::ValidationError;
/// use accessform::visibility::SubmittedStatus;
///
/// let form = Form::default();
/// let name = Field::new("name", String::new())
///     .validate_with(|v: &String| {
///         if v.is_empty() { vec![ValidationError::new("required", "Name is required")] } else { vec![] }
///     });
/// form.register(&name).unwrap();
///
/// let visible = form.show_errors_for(&name);
/// assert!(!visible.get());
///
/// form.begin_submit().unwrap();
/// form.finish_submit();
/// assert_eq!(form.status(), SubmittedStatus::Submitted);
/// assert!(visible.get());
/// ```
#[derive(Clone)]
pub struct Form {
    config: Arc<FormConfig>,
    status: State<SubmittedStatus>,
    strategy: State<ErrorDisplayStrategy>,
    fields: Arc<RwLock<Vec<Arc<dyn FormControl>>>>,
}

impl Form {
    /// Create a form with the given configuration
    pub fn new(config: FormConfig) -> Self {
        Self {
            strategy: State::new(config.strategy),
            config: Arc::new(config),
            status: State::new(SubmittedStatus::Unsubmitted),
            fields: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Fields
    // -------------------------------------------------------------------------

    /// Register a field. Names must be unique within the form.
    pub fn register<T>(&self, field: &Field<T>) -> Result<(), FormError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut fields = self
            .fields
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if fields.iter().any(|f| f.name() == field.name()) {
            return Err(FormError::DuplicateField(field.name().to_string()));
        }

        field.set_touch_on_blur(self.config.touch_on_blur);
        fields.push(Arc::new(field.clone()));
        log::debug!("Registered field '{}' ({})", field.name(), field.id());
        Ok(())
    }

    /// Look up a registered field by name
    pub fn field(&self, name: &str) -> Result<Arc<dyn FormControl>, FormError> {
        self.fields
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|f| f.name() == name)
            .cloned()
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Names of registered fields in registration order
    pub fn field_names(&self) -> Vec<String> {
        self.controls()
            .iter()
            .map(|f| f.name().to_string())
            .collect()
    }

    fn controls(&self) -> Vec<Arc<dyn FormControl>> {
        self.fields
            .read()
            .map(|fields| fields.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Check that no field has a blocking error
    pub fn is_valid(&self) -> bool {
        self.controls().iter().all(|f| !f.invalid())
    }

    /// First invalid field in registration order, the focus target
    pub fn first_invalid_field(&self) -> Option<String> {
        self.controls()
            .iter()
            .find(|f| f.invalid())
            .map(|f| f.name().to_string())
    }

    /// Every field's errors, keyed by field name
    pub fn errors(&self) -> Vec<(String, Vec<ValidationError>)> {
        self.controls()
            .iter()
            .map(|f| (f.name().to_string(), f.errors()))
            .filter(|(_, errors)| !errors.is_empty())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Status and strategy
    // -------------------------------------------------------------------------

    pub fn status(&self) -> SubmittedStatus {
        self.status.get()
    }

    /// The status cell, for use as a reactive input
    pub fn status_signal(&self) -> &State<SubmittedStatus> {
        &self.status
    }

    pub fn strategy(&self) -> ErrorDisplayStrategy {
        self.strategy.get()
    }

    /// The strategy cell; writing it flips every derived visibility at once
    pub fn strategy_signal(&self) -> &State<ErrorDisplayStrategy> {
        &self.strategy
    }

    pub fn set_strategy(&self, strategy: ErrorDisplayStrategy) {
        if self.strategy.replace_if_changed(strategy) {
            log::debug!("Error display strategy set to {}", strategy);
        }
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Enter `submitting` and mark every field touched.
    ///
    /// Fails if an attempt is already running, including one started through
    /// another clone of this form.
    pub fn begin_submit(&self) -> Result<(), FormError> {
        let started = self.status.try_update(|status| {
            if *status == SubmittedStatus::Submitting {
                return false;
            }
            *status = SubmittedStatus::Submitting;
            true
        });
        if !started {
            return Err(FormError::AlreadySubmitting);
        }
        for field in self.controls() {
            field.mark_touched();
        }
        log::debug!("Form submitting");
        Ok(())
    }

    /// Enter `submitted`, whatever the attempt's outcome.
    pub fn finish_submit(&self) {
        self.status.set(SubmittedStatus::Submitted);
        log::debug!("Form submitted");
    }

    /// Run a submission attempt around `action`.
    ///
    /// Fields are marked touched first. If any field has a blocking error the
    /// action is skipped and the first invalid field is reported. Either way
    /// the form ends up `submitted`, also when the returned future is dropped
    /// before the action finishes or the action panics.
    pub async fn submit<F, Fut, R>(&self, action: F) -> Result<SubmitOutcome<R>, FormError>
    where
        F: FnOnce(Form) -> Fut,
        Fut: Future<Output = R>,
    {
        self.begin_submit()?;
        let attempt = SubmitAttempt { form: self };

        if let Some(first_invalid) = self.first_invalid_field() {
            log::debug!("Submit blocked by field '{}'", first_invalid);
            return Ok(SubmitOutcome::Blocked {
                first_invalid: Some(first_invalid),
            });
        }

        let result = action(self.clone()).await;
        drop(attempt);
        Ok(SubmitOutcome::Completed(result))
    }

    /// Back to `unsubmitted`, with every field reset.
    pub fn reset(&self) {
        for field in self.controls() {
            field.reset();
        }
        self.status.set(SubmittedStatus::Unsubmitted);
        log::debug!("Form reset");
    }

    // -------------------------------------------------------------------------
    // Error visibility
    // -------------------------------------------------------------------------

    /// Live error visibility for a registered field, by name
    pub fn show_errors(&self, name: &str) -> Result<Computed<bool>, FormError> {
        let field = self.field(name)?;
        Ok(compute_show_errors(
            field,
            &self.strategy,
            &self.status,
        ))
    }

    /// Live error visibility for a field, bound to this form's strategy and status
    pub fn show_errors_for<T>(&self, field: &Field<T>) -> Computed<bool>
    where
        T: Send + Sync + 'static,
    {
        compute_show_errors(field.clone(), &self.strategy, &self.status)
    }

    // -------------------------------------------------------------------------
    // Assistive markup
    // -------------------------------------------------------------------------

    /// Element ids for a field, using the configured prefix
    pub fn ids_for<T>(&self, field: &Field<T>) -> FieldIds {
        FieldIds::new(&self.config.id_prefix, field.id())
    }

    /// ARIA attributes for a field under the current strategy and status.
    ///
    /// Warning announcement follows the form config.
    pub fn aria_for<T>(&self, field: &Field<T>, assistive: Assistive) -> AriaAttributes
    where
        T: Send + Sync + 'static,
    {
        let show = self.show_errors_for(field).get();
        let assistive = Assistive {
            announce_warnings: self.config.announce_warnings,
            ..assistive
        };
        AriaAttributes::for_field(field, show, &self.ids_for(field), assistive)
    }

    /// Character count of a text field and how eagerly to announce it
    pub fn character_count(&self, field: &Field<String>, max: usize) -> (CharacterCount, LiveRegion) {
        let count = field
            .value_signal()
            .with(|value| CharacterCount::new(value, max));
        let region = count.live_region(self.config.character_count_threshold);
        (count, region)
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("status", &self.status.peek())
            .field("strategy", &self.strategy.peek())
            .field("fields", &self.field_names())
            .finish()
    }
}
