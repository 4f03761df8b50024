//! Tests for the validator builder.

use std::time::Duration;

use accessform::field::Field;
use accessform::validation::{Validator, is_warning};
use accessform::visibility::FieldState;
use regex::Regex;

#[test]
fn test_valid_form() {
    let name = Field::new("name", "Ada Lovelace".to_string());
    let email = Field::new("email", "ada@example.com".to_string());

    let result = Validator::new()
        .field(&name, "name")
        .required("Name is required")
        .min_length(3, "Too short")
        .field(&email, "email")
        .email("Invalid email")
        .validate();

    assert!(result.is_valid());
    assert!(result.fields().is_empty());
    assert_eq!(result.first_invalid_field(), None);
}

#[test]
fn test_collects_every_failure_and_writes_back() {
    let username = Field::new("username", " ".to_string());

    let result = Validator::new()
        .field(&username, "username")
        .required("Username is required")
        .min_length(3, "Username must be at least 3 characters")
        .validate();

    assert!(result.is_invalid());
    let failed = result.first_error().unwrap();
    assert_eq!(failed.field_name, "username");
    assert_eq!(failed.field_id, username.id().to_string());
    assert_eq!(failed.errors.len(), 2);
    assert_eq!(failed.first_message(), Some("Username is required"));
    assert_eq!(result.first_invalid_id(), Some(failed.field_id.as_str()));

    assert!(username.invalid());
    assert_eq!(username.errors().len(), 2);
    assert_eq!(username.errors()[0].kind.as_deref(), Some("required"));
    assert_eq!(username.errors()[1].kind.as_deref(), Some("minlength"));
}

#[test]
fn test_passing_validation_clears_previous_errors() {
    let email = Field::new("email", "nope".to_string());
    let validate = |email: &Field<String>| {
        Validator::new()
            .field(email, "email")
            .email("Invalid email")
            .validate()
    };

    assert!(validate(&email).is_invalid());
    assert!(email.invalid());

    email.set_value("ok@example.com".to_string());
    assert!(validate(&email).is_valid());
    assert!(email.errors().is_empty());
}

#[test]
fn test_warnings_do_not_block() {
    let password = Field::new("password", "abcdefgh".to_string());

    let result = Validator::new()
        .field(&password, "password")
        .required("Password is required")
        .warning(
            "weak-password",
            |v: &String| v.chars().any(|c| c.is_ascii_digit()),
            "Adding a digit makes this stronger",
        )
        .validate();

    assert!(result.is_valid());
    assert_eq!(result.warnings().count(), 1);
    assert_eq!(result.errors().count(), 0);
    let errors = password.errors();
    assert_eq!(errors.len(), 1);
    assert!(is_warning(&errors[0]));
    assert_eq!(errors[0].kind.as_deref(), Some("warn:weak-password"));
    assert!(!password.invalid());
}

#[test]
fn test_string_rules() {
    let code = Field::new("code", "ab-12".to_string());
    let digits = Regex::new(r"^\d+$").unwrap();

    let result = Validator::new()
        .field(&code, "code")
        .max_length(4, "Too long")
        .pattern(digits, "Digits only")
        .contains("-", "Needs a dash")
        .equals("ab-12".to_string(), "Must match")
        .validate();

    let kinds: Vec<String> = code
        .errors()
        .into_iter()
        .filter_map(|e| e.kind)
        .collect();
    assert!(result.is_invalid());
    assert_eq!(kinds, vec!["maxlength".to_string(), "pattern".to_string()]);
}

#[test]
fn test_bool_and_selection_rules() {
    let terms = Field::new("terms", false);
    let plan = Field::new("plan", None::<usize>);

    let result = Validator::new()
        .field(&terms, "terms")
        .checked("You must accept the terms")
        .field(&plan, "plan")
        .selected("Pick a plan")
        .validate();

    assert_eq!(result.errors().count(), 2);
    assert_eq!(result.first_invalid_field(), Some("terms"));

    terms.set_value(true);
    plan.set_value(Some(1));
    let result = Validator::new()
        .field(&terms, "terms")
        .checked("You must accept the terms")
        .field(&plan, "plan")
        .selected_index(1, "Pick the second plan")
        .validate();
    assert!(result.is_valid());
}

#[test]
fn test_email_allows_empty() {
    let email = Field::new("email", String::new());
    let result = Validator::new()
        .field(&email, "email")
        .email("Invalid email")
        .validate();
    assert!(result.is_valid());
}

#[tokio::test]
async fn test_async_rules() {
    let username = Field::new("username", "taken".to_string());

    let result = Validator::new()
        .field(&username, "username")
        .required("Username is required")
        .rule_async(
            "unique",
            |v: String| async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                v != "taken"
            },
            "Username is taken",
        )
        .validate_async()
        .await;

    assert!(result.is_invalid());
    assert_eq!(
        result.first_error().and_then(|f| f.first_message()),
        Some("Username is taken")
    );
    assert!(username.invalid());
}

#[tokio::test]
async fn test_sync_validate_skips_async_rules() {
    let username = Field::new("username", "taken".to_string());

    let result = Validator::new()
        .field(&username, "username")
        .rule_async("unique", |v: String| async move { v != "taken" }, "Username is taken")
        .validate();

    assert!(result.is_valid());
}
