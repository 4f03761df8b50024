//! When should a field's blocking errors be shown?
//!
//! [`should_show_errors`] maps a field's validity and touch state, the
//! configured [`ErrorDisplayStrategy`] and the form's [`SubmittedStatus`] to
//! a single boolean. [`compute_show_errors`] wraps the same decision in a
//! [`Computed`] cell that follows its inputs.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::computed::Computed;
use crate::error::{ParseStatusError, ParseStrategyError};
use crate::source::MaybeSignal;
use crate::validation::ValidationError;

/// Lifecycle of a form's current submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmittedStatus {
    /// No submission has been attempted since the last reset.
    #[default]
    Unsubmitted,
    /// A submission is in flight.
    Submitting,
    /// A submission attempt completed, successfully or not.
    Submitted,
}

impl SubmittedStatus {
    /// Anything other than `Unsubmitted`.
    pub const fn has_submitted(self) -> bool {
        !matches!(self, Self::Unsubmitted)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsubmitted => "unsubmitted",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for SubmittedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmittedStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unsubmitted" => Ok(Self::Unsubmitted),
            "submitting" => Ok(Self::Submitting),
            "submitted" => Ok(Self::Submitted),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Derive the tri-state status from an orchestrator's two flags.
pub const fn derive_submitted_status(submitting: bool, submit_attempted: bool) -> SubmittedStatus {
    if submitting {
        SubmittedStatus::Submitting
    } else if submit_attempted {
        SubmittedStatus::Submitted
    } else {
        SubmittedStatus::Unsubmitted
    }
}

/// Policy controlling when errors become visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorDisplayStrategy {
    /// Show as soon as the field is invalid.
    Immediate,
    /// Show once the field was touched or the form submitted.
    #[default]
    OnTouch,
    /// Show only once the form was submitted.
    OnSubmit,
    /// Never show automatically.
    Manual,
}

impl ErrorDisplayStrategy {
    pub const ALL: [Self; 4] = [Self::Immediate, Self::OnTouch, Self::OnSubmit, Self::Manual];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::OnTouch => "on-touch",
            Self::OnSubmit => "on-submit",
            Self::Manual => "manual",
        }
    }

    /// Parse a strategy name, falling back to `OnTouch` for anything unknown.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|err: ParseStrategyError| {
            log::debug!("{}, using on-touch", err);
            Self::OnTouch
        })
    }
}

impl std::fmt::Display for ErrorDisplayStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorDisplayStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

impl Serialize for ErrorDisplayStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorDisplayStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&s))
    }
}

/// Read-only view of a field's condition.
///
/// Every accessor has a default, so an implementor that cannot answer a
/// question reads as `false` (or empty) rather than failing.
pub trait FieldState {
    /// The field currently fails at least one blocking rule.
    fn invalid(&self) -> bool {
        false
    }

    /// The field lost focus at least once, or its form was submitted.
    fn touched(&self) -> bool {
        false
    }

    /// Active validation failures, warnings included.
    fn errors(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}

impl<F: FieldState + ?Sized> FieldState for &F {
    fn invalid(&self) -> bool {
        (**self).invalid()
    }

    fn touched(&self) -> bool {
        (**self).touched()
    }

    fn errors(&self) -> Vec<ValidationError> {
        (**self).errors()
    }
}

impl<F: FieldState + ?Sized> FieldState for Box<F> {
    fn invalid(&self) -> bool {
        (**self).invalid()
    }

    fn touched(&self) -> bool {
        (**self).touched()
    }

    fn errors(&self) -> Vec<ValidationError> {
        (**self).errors()
    }
}

impl<F: FieldState + ?Sized> FieldState for Arc<F> {
    fn invalid(&self) -> bool {
        (**self).invalid()
    }

    fn touched(&self) -> bool {
        (**self).touched()
    }

    fn errors(&self) -> Vec<ValidationError> {
        (**self).errors()
    }
}

/// An absent field is valid and untouched.
impl<F: FieldState> FieldState for Option<F> {
    fn invalid(&self) -> bool {
        self.as_ref().is_some_and(F::invalid)
    }

    fn touched(&self) -> bool {
        self.as_ref().is_some_and(F::touched)
    }

    fn errors(&self) -> Vec<ValidationError> {
        self.as_ref().map(F::errors).unwrap_or_default()
    }
}

/// Plain snapshot of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStatus {
    pub invalid: bool,
    pub touched: bool,
    pub errors: Vec<ValidationError>,
}

impl FieldStatus {
    pub fn new(invalid: bool, touched: bool) -> Self {
        Self {
            invalid,
            touched,
            errors: Vec::new(),
        }
    }

    /// Snapshot any field state.
    pub fn of(field: &impl FieldState) -> Self {
        Self {
            invalid: field.invalid(),
            touched: field.touched(),
            errors: field.errors(),
        }
    }
}

impl FieldState for FieldStatus {
    fn invalid(&self) -> bool {
        self.invalid
    }

    fn touched(&self) -> bool {
        self.touched
    }

    fn errors(&self) -> Vec<ValidationError> {
        self.errors.clone()
    }
}

/// Field state assembled from independent sources.
///
/// Handy when validity and touch state live in separate cells owned by some
/// other form-state provider.
#[derive(Debug, Clone, Default)]
pub struct FieldSignals {
    pub invalid: MaybeSignal<bool>,
    pub touched: MaybeSignal<bool>,
}

impl FieldSignals {
    pub fn new(invalid: impl Into<MaybeSignal<bool>>, touched: impl Into<MaybeSignal<bool>>) -> Self {
        Self {
            invalid: invalid.into(),
            touched: touched.into(),
        }
    }
}

impl FieldState for FieldSignals {
    fn invalid(&self) -> bool {
        self.invalid.get()
    }

    fn touched(&self) -> bool {
        self.touched.get()
    }
}

/// The decision table, on already-resolved inputs.
pub const fn decide(
    strategy: ErrorDisplayStrategy,
    invalid: bool,
    touched: bool,
    has_submitted: bool,
) -> bool {
    match strategy {
        ErrorDisplayStrategy::Immediate => invalid,
        ErrorDisplayStrategy::OnTouch => invalid && (touched || has_submitted),
        ErrorDisplayStrategy::OnSubmit => invalid && has_submitted,
        ErrorDisplayStrategy::Manual => false,
    }
}

/// Should the field's blocking errors be visible right now?
///
/// `None` for the field yields `false`. Pass `SubmittedStatus::default()`
/// when the caller has no submission status.
pub fn should_show_errors<F: FieldState + ?Sized>(
    field: Option<&F>,
    strategy: impl Into<MaybeSignal<ErrorDisplayStrategy>>,
    status: impl Into<MaybeSignal<SubmittedStatus>>,
) -> bool {
    let Some(field) = field else {
        return false;
    };
    let strategy: MaybeSignal<ErrorDisplayStrategy> = strategy.into();
    let status: MaybeSignal<SubmittedStatus> = status.into();
    decide(
        strategy.get(),
        field.invalid(),
        field.touched(),
        status.get().has_submitted(),
    )
}

/// [`should_show_errors`] for a raw strategy name and an optional status.
///
/// Unknown strategy names behave like `on-touch`.
pub fn should_show_errors_str<F: FieldState + ?Sized>(
    field: Option<&F>,
    strategy: &str,
    status: Option<SubmittedStatus>,
) -> bool {
    should_show_errors(
        field,
        ErrorDisplayStrategy::parse_lossy(strategy),
        status.unwrap_or_default(),
    )
}

/// Reactive form of [`should_show_errors`].
///
/// Each argument may be a value, an accessor or a cell. The returned cell
/// always equals `should_show_errors` over the current inputs and is only
/// re-evaluated after one of the cells it read changed value.
///
/// When `field` is passed as a cell, name the field type explicitly
/// (`compute_show_errors::<MyField>(&cell, ..)`) so the conversion is not
/// ambiguous.
pub fn compute_show_errors<F>(
    field: impl Into<MaybeSignal<F>>,
    strategy: impl Into<MaybeSignal<ErrorDisplayStrategy>>,
    status: impl Into<MaybeSignal<SubmittedStatus>>,
) -> Computed<bool>
where
    F: FieldState + Clone + Send + Sync + 'static,
{
    let field: MaybeSignal<F> = field.into();
    let strategy: MaybeSignal<ErrorDisplayStrategy> = strategy.into();
    let status: MaybeSignal<SubmittedStatus> = status.into();
    Computed::new(move || {
        let field = field.get();
        decide(
            strategy.get(),
            field.invalid(),
            field.touched(),
            status.get().has_submitted(),
        )
    })
}
