//! Form validation.
//!
//! Validation failures are [`ValidationError`]s: a `kind` plus an optional
//! message. Kinds beginning with `warn:` are advisories that never block
//! submission; everything else blocks.
//!
//! Rules are attached to fields with a fluent builder:
//!
//! ```
//! use accessform::field::Field;
//! use accessform::validation::Validator;
//!
//! let username = Field::new("username", String::from("al"));
//! let email = Field::new("email", String::from("al@example.com"));
//!
//! let result = Validator::new()
//!     .field(&username, "username")
//!         .required("Username is required")
//!         .min_length(3, "Username must be at least 3 characters")
//!     .field(&email, "email")
//!         .required("Email is required")
//!         .email("Please enter a valid email")
//!     .validate();
//!
//! assert!(result.is_invalid());
//! assert_eq!(result.first_invalid_field(), Some("username"));
//! ```

mod error;
mod result;
mod validatable;
mod validator;

pub use error::{
    Severity, ValidationError, WARNING_PREFIX, create_warning, filter_blocking, filter_warnings,
    has_blocking, has_only_warnings, is_blocking, is_warning,
};
pub use result::{FieldErrors, ValidationResult};
pub use validatable::Validatable;
pub use validator::{BoxFuture, FieldBuilder, Validator};
