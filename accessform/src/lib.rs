//! Accessible form state on top of reactive cells.
//!
//! The heart of the crate is [`visibility::should_show_errors`]: given a
//! field's validity and touch state, an [`ErrorDisplayStrategy`] and the
//! form's [`SubmittedStatus`], decide whether blocking errors are visible.
//! Around it sit reactive [`State`]/[`Computed`] cells, a warning/error
//! split for [`ValidationError`]s, field and form bookkeeping, ARIA
//! attribute derivation and character-count hints.
//!
//! [`ErrorDisplayStrategy`]: visibility::ErrorDisplayStrategy
//! [`SubmittedStatus`]: visibility::SubmittedStatus
//! [`State`]: state::State
//! [`Computed`]: computed::Computed
//! [`ValidationError`]: validation::ValidationError

pub mod aria;
pub mod computed;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod hint;
pub mod source;
pub mod state;
pub mod validation;
pub mod visibility;

mod tracking;

pub mod prelude {
    pub use crate::aria::{AriaAttributes, Assistive, FieldIds, LiveRegion};
    pub use crate::computed::Computed;
    pub use crate::config::FormConfig;
    pub use crate::error::{ConfigError, FormError};
    pub use crate::field::{Field, FieldId, resolve_field_name};
    pub use crate::form::{Form, FormControl, SubmitOutcome};
    pub use crate::hint::CharacterCount;
    pub use crate::source::{MaybeSignal, unwrap_value};
    pub use crate::state::State;
    pub use crate::validation::{
        Severity, ValidationError, ValidationResult, Validator, create_warning, filter_blocking,
        filter_warnings, has_only_warnings, is_blocking, is_warning,
    };
    pub use crate::visibility::{
        ErrorDisplayStrategy, FieldSignals, FieldState, FieldStatus, SubmittedStatus,
        compute_show_errors, should_show_errors,
    };
}
