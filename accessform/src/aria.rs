//! ARIA attributes for form fields.
//!
//! Derives the attribute set a renderer should apply to a field's control so
//! that assistive technology hears about errors, warnings and hints at the
//! right moment.

use crate::field::FieldId;
use crate::validation::{filter_warnings, has_blocking};
use crate::visibility::FieldState;

/// Live region politeness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LiveRegion {
    #[default]
    Off,
    Polite,
    Assertive,
}

impl LiveRegion {
    /// Value for the `aria-live` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }

    /// Role conventionally paired with this politeness
    pub fn role(self) -> Option<&'static str> {
        match self {
            Self::Off => None,
            Self::Polite => Some("status"),
            Self::Assertive => Some("alert"),
        }
    }
}

/// Element ids of the assistive elements that belong to one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldIds {
    pub control: String,
    pub hint: String,
    pub error: String,
    pub warning: String,
    pub count: String,
}

impl FieldIds {
    pub fn new(prefix: &str, field: FieldId) -> Self {
        Self::from_base(format!("{}-{}", prefix, field))
    }

    /// Ids derived from an already-chosen control id
    pub fn from_base(control: impl Into<String>) -> Self {
        let control = control.into();
        Self {
            hint: format!("{control}-hint"),
            error: format!("{control}-error"),
            warning: format!("{control}-warning"),
            count: format!("{control}-count"),
            control,
        }
    }
}

/// What the renderer has next to the control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assistive {
    /// A hint element is rendered.
    pub hint: bool,
    /// A character count element is rendered.
    pub count: bool,
    /// The field is required.
    pub required: bool,
    /// Warnings are referenced from `aria-describedby`.
    pub announce_warnings: bool,
}

/// ARIA attributes for a single control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AriaAttributes {
    pub invalid: bool,
    pub required: bool,
    pub describedby: Vec<String>,
    pub errormessage: Option<String>,
}

impl AriaAttributes {
    /// Attributes for `field`, given whether its errors are currently shown.
    ///
    /// `aria-invalid` is only set while errors are visible, so a screen
    /// reader never announces an error the sighted user cannot see.
    pub fn for_field(
        field: &impl FieldState,
        show_errors: bool,
        ids: &FieldIds,
        assistive: Assistive,
    ) -> Self {
        let errors = field.errors();
        let showing = show_errors && (field.invalid() || has_blocking(&errors));

        let mut describedby = Vec::new();
        if assistive.hint {
            describedby.push(ids.hint.clone());
        }
        if assistive.count {
            describedby.push(ids.count.clone());
        }
        if showing {
            describedby.push(ids.error.clone());
        }
        if assistive.announce_warnings && !filter_warnings(&errors).is_empty() {
            describedby.push(ids.warning.clone());
        }

        Self {
            invalid: showing,
            required: assistive.required,
            describedby,
            errormessage: showing.then(|| ids.error.clone()),
        }
    }

    /// `(attribute, value)` pairs in a stable order; unset attributes are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        let invalid = self.invalid.then(|| ("aria-invalid", "true".to_string()));
        let required = self.required.then(|| ("aria-required", "true".to_string()));
        let describedby = (!self.describedby.is_empty())
            .then(|| ("aria-describedby", self.describedby.join(" ")));
        let errormessage = self
            .errormessage
            .as_ref()
            .map(|id| ("aria-errormessage", id.clone()));

        [invalid, required, describedby, errormessage]
            .into_iter()
            .flatten()
    }

    /// Look up a single attribute value
    pub fn get(&self, name: &str) -> Option<String> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

/// Politeness for the error region: assertive while errors are shown.
pub fn error_live_region(show_errors: bool) -> LiveRegion {
    if show_errors {
        LiveRegion::Assertive
    } else {
        LiveRegion::Off
    }
}

/// Politeness for the warning region: polite while warnings exist.
pub fn warning_live_region(field: &impl FieldState) -> LiveRegion {
    if filter_warnings(&field.errors()).is_empty() {
        LiveRegion::Off
    } else {
        LiveRegion::Polite
    }
}
