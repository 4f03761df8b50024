//! Tests for fields and form submission.

use std::sync::Barrier;
use std::time::Duration;

use accessform::config::FormConfig;
use accessform::error::FormError;
use accessform::field::{Field, resolve_field_name};
use accessform::form::{Form, SubmitOutcome};
use accessform::validation::{ValidationError, create_warning};
use accessform::visibility::{ErrorDisplayStrategy, FieldState, SubmittedStatus};

fn required(name: &str) -> Field<String> {
    Field::new(name, String::new()).validate_with(|v: &String| {
        if v.trim().is_empty() {
            vec![ValidationError::new("required", "This field is required")]
        } else {
            Vec::new()
        }
    })
}

#[test]
fn test_blur_marks_touched() {
    let field = required("name");
    assert!(!field.touched());
    field.focus();
    assert!(field.is_focused());
    field.blur();
    assert!(!field.is_focused());
    assert!(field.touched());
}

#[test]
fn test_blur_respects_manual_touch() {
    let form = Form::new(FormConfig::new().manual_touch());
    let field = required("name");
    form.register(&field).unwrap();
    field.blur();
    assert!(!field.touched());
    field.mark_touched();
    assert!(field.touched());
}

#[test]
fn test_validator_runs_on_change() {
    let field = required("name");
    assert!(field.invalid());
    field.set_value("Ada".to_string());
    assert!(!field.invalid());
    assert!(field.is_dirty());
    field.set_value("  ".to_string());
    assert!(field.invalid());
}

#[test]
fn test_warnings_do_not_invalidate() {
    let field = Field::new("password", "hunter2".to_string());
    field.set_errors(vec![create_warning("weak", Some("Consider a longer password"))]);
    assert!(!field.invalid());
    assert_eq!(field.warnings().len(), 1);
    assert!(field.blocking_errors().is_empty());
    assert_eq!(field.errors().len(), 1);
}

#[test]
fn test_set_value_without_validator_clears_errors() {
    let field = Field::new("code", String::new());
    field.set_errors(vec![ValidationError::new("server", "Rejected")]);
    assert!(field.invalid());
    field.set_value("abc".to_string());
    assert!(!field.invalid());
}

#[test]
fn test_register_rejects_duplicates() {
    let form = Form::default();
    form.register(&required("email")).unwrap();
    assert_eq!(
        form.register(&required("email")),
        Err(FormError::DuplicateField("email".to_string()))
    );
    assert!(matches!(form.field("phone"), Err(FormError::UnknownField(_))));
    assert_eq!(form.field_names(), vec!["email".to_string()]);
}

#[test]
fn test_submit_lifecycle() {
    let form = Form::default();
    let name = required("name");
    form.register(&name).unwrap();

    assert_eq!(form.status(), SubmittedStatus::Unsubmitted);
    form.begin_submit().unwrap();
    assert_eq!(form.status(), SubmittedStatus::Submitting);
    assert!(name.touched());
    assert_eq!(form.begin_submit(), Err(FormError::AlreadySubmitting));

    form.finish_submit();
    assert_eq!(form.status(), SubmittedStatus::Submitted);

    form.reset();
    assert_eq!(form.status(), SubmittedStatus::Unsubmitted);
    assert!(!name.touched());
    assert!(name.invalid());
}

#[test]
fn test_concurrent_begin_submit_admits_one() {
    let form = Form::default();
    let name = required("name");
    form.register(&name).unwrap();

    let barrier = Barrier::new(8);
    let started = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let form = form.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    form.begin_submit().is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .filter(|joined| matches!(joined, Ok(true)))
            .count()
    });

    assert_eq!(started, 1);
    assert_eq!(form.status(), SubmittedStatus::Submitting);
}

#[test]
fn test_repeated_finish_leaves_status_version() {
    let form = Form::default();
    form.begin_submit().unwrap();
    form.finish_submit();
    let version = form.status_signal().version();
    form.finish_submit();
    assert_eq!(form.status_signal().version(), version);
}

#[test]
fn test_mark_untouched() {
    let field = required("name");
    field.blur();
    assert!(field.touched());
    field.mark_untouched();
    assert!(!field.touched());
    assert!(field.invalid());
}

#[test]
fn test_show_errors_follows_form_status() {
    let form = Form::new(FormConfig::new().strategy(ErrorDisplayStrategy::OnSubmit));
    let name = required("name");
    form.register(&name).unwrap();
    let visible = form.show_errors("name").unwrap();

    name.blur();
    assert!(!visible.get());

    form.begin_submit().unwrap();
    assert!(visible.get());

    name.set_value("Grace".to_string());
    assert!(!visible.get());
}

#[test]
fn test_strategy_switch_flips_visibility() {
    let form = Form::default();
    let name = required("name");
    form.register(&name).unwrap();
    let visible = form.show_errors_for(&name);

    assert!(!visible.get());
    form.set_strategy(ErrorDisplayStrategy::Immediate);
    assert!(visible.get());
    form.set_strategy(ErrorDisplayStrategy::Manual);
    assert!(!visible.get());
}

#[test]
fn test_first_invalid_field_uses_registration_order() {
    let form = Form::default();
    let a = required("a");
    let b = required("b");
    form.register(&a).unwrap();
    form.register(&b).unwrap();

    assert_eq!(form.first_invalid_field().as_deref(), Some("a"));
    a.set_value("x".to_string());
    assert_eq!(form.first_invalid_field().as_deref(), Some("b"));
    b.set_value("y".to_string());
    assert!(form.is_valid());
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn test_submit_blocked_by_invalid_field() {
    let form = Form::default();
    let email = required("email");
    form.register(&email).unwrap();

    let outcome = form.submit(|_| async { "sent" }).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Blocked {
            first_invalid: Some("email".to_string())
        }
    );
    assert_eq!(form.status(), SubmittedStatus::Submitted);
    assert!(email.touched());
}

#[tokio::test]
async fn test_submit_runs_action_when_valid() {
    let form = Form::default();
    let email = required("email");
    form.register(&email).unwrap();
    email.set_value("a@b.c".to_string());

    let outcome = form
        .submit(|form| async move {
            assert_eq!(form.status(), SubmittedStatus::Submitting);
            tokio::task::yield_now().await;
            42
        })
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::Completed(42));
    assert!(outcome.is_completed());
    assert_eq!(form.status(), SubmittedStatus::Submitted);
}

#[tokio::test]
async fn test_dropped_submit_still_finishes() {
    let form = Form::default();
    let email = required("email");
    form.register(&email).unwrap();
    email.set_value("a@b.c".to_string());

    let attempt = tokio::time::timeout(
        Duration::from_millis(10),
        form.submit(|_| std::future::pending::<()>()),
    )
    .await;
    assert!(attempt.is_err());
    assert_eq!(form.status(), SubmittedStatus::Submitted);

    let outcome = form.submit(|_| async { 1 }).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Completed(1));
}

#[tokio::test]
async fn test_submit_with_only_warnings_completes() {
    let form = Form::default();
    let password = Field::new("password", "abc".to_string());
    password.set_errors(vec![create_warning("weak", None)]);
    form.register(&password).unwrap();

    let outcome = form.submit(|_| async {}).await.unwrap();
    assert!(outcome.is_completed());
}

#[test]
fn test_reset_to_new_initial_value() {
    let field = required("name");
    field.set_value("Ada".to_string());
    field.reset_to("Grace".to_string());
    assert_eq!(field.value(), "Grace");
    assert!(!field.is_dirty());
    assert!(!field.invalid());
}

#[test]
fn test_resolve_field_name() {
    assert_eq!(
        resolve_field_name(Some("explicit"), [("name", "attr")]),
        Some("explicit".to_string())
    );
    assert_eq!(
        resolve_field_name(Some("  "), [("id", "the-id"), ("name", "the-name")]),
        Some("the-name".to_string())
    );
    assert_eq!(
        resolve_field_name(None, [("name", ""), ("id", "the-id")]),
        Some("the-id".to_string())
    );
    assert_eq!(
        resolve_field_name(None, [("aria-label", "Email address")]),
        Some("Email address".to_string())
    );
    assert_eq!(resolve_field_name(None, [("class", "input")]), None);
}
