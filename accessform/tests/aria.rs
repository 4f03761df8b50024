use accessform::aria::{
    AriaAttributes, Assistive, FieldIds, LiveRegion, error_live_region, warning_live_region,
};
use accessform::config::FormConfig;
use accessform::field::Field;
use accessform::form::Form;
use accessform::hint::CharacterCount;
use accessform::validation::{ValidationError, create_warning};
use accessform::visibility::{ErrorDisplayStrategy, FieldStatus};

fn ids() -> FieldIds {
    FieldIds::from_base("af-email")
}

#[test]
fn test_field_ids() {
    let ids = ids();
    assert_eq!(ids.control, "af-email");
    assert_eq!(ids.hint, "af-email-hint");
    assert_eq!(ids.error, "af-email-error");
    assert_eq!(ids.warning, "af-email-warning");
    assert_eq!(ids.count, "af-email-count");
}

#[test]
fn test_hidden_errors_are_not_announced() {
    let field = FieldStatus::new(true, false);
    let attrs = AriaAttributes::for_field(
        &field,
        false,
        &ids(),
        Assistive {
            hint: true,
            ..Default::default()
        },
    );
    assert!(!attrs.invalid);
    assert_eq!(attrs.errormessage, None);
    assert_eq!(attrs.describedby, vec!["af-email-hint".to_string()]);
    assert_eq!(attrs.get("aria-invalid"), None);
}

#[test]
fn test_shown_errors_are_referenced() {
    let field = FieldStatus {
        invalid: true,
        touched: true,
        errors: vec![
            ValidationError::new("required", "Email is required"),
            create_warning("free-mail", Some("Consider a work address")),
        ],
    };
    let attrs = AriaAttributes::for_field(
        &field,
        true,
        &ids(),
        Assistive {
            hint: true,
            count: false,
            required: true,
            announce_warnings: true,
        },
    );

    let pairs: Vec<(&str, String)> = attrs.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("aria-invalid", "true".to_string()),
            ("aria-required", "true".to_string()),
            (
                "aria-describedby",
                "af-email-hint af-email-error af-email-warning".to_string()
            ),
            ("aria-errormessage", "af-email-error".to_string()),
        ]
    );
}

#[test]
fn test_show_flag_without_invalid_field() {
    let field = FieldStatus::new(false, true);
    let attrs = AriaAttributes::for_field(&field, true, &ids(), Assistive::default());
    assert!(!attrs.invalid);
    assert!(attrs.iter().next().is_none());
}

#[test]
fn test_live_regions() {
    assert_eq!(error_live_region(true), LiveRegion::Assertive);
    assert_eq!(error_live_region(false), LiveRegion::Off);
    assert_eq!(LiveRegion::Assertive.role(), Some("alert"));
    assert_eq!(LiveRegion::Polite.as_str(), "polite");

    let mut field = FieldStatus::new(false, false);
    assert_eq!(warning_live_region(&field), LiveRegion::Off);
    field.errors.push(create_warning("x", None));
    assert_eq!(warning_live_region(&field), LiveRegion::Polite);
}

#[test]
fn test_form_aria_follows_strategy_and_config() {
    let form = Form::new(
        FormConfig::new()
            .strategy(ErrorDisplayStrategy::OnTouch)
            .id_prefix("signup")
            .quiet_warnings(),
    );
    let email = Field::new("email", String::new());
    email.set_errors(vec![
        ValidationError::new("required", "Email is required"),
        create_warning("x", None),
    ]);
    form.register(&email).unwrap();

    let ids = form.ids_for(&email);
    assert_eq!(ids.control, format!("signup-{}", email.id()));

    let attrs = form.aria_for(&email, Assistive::default());
    assert!(!attrs.invalid);

    email.blur();
    let attrs = form.aria_for(&email, Assistive::default());
    assert!(attrs.invalid);
    assert_eq!(attrs.describedby, vec![ids.error.clone()]);
}

#[test]
fn test_character_count() {
    let count = CharacterCount::new("héllo", 10);
    assert_eq!(count.current, 5);
    assert_eq!(count.remaining(), 5);
    assert!(!count.is_over_limit());
    assert_eq!(count.message(), "5 of 10 characters used");
    assert_eq!(count.live_region(0.8), LiveRegion::Off);

    let near = CharacterCount::new("abcdefgh", 10);
    assert_eq!(near.live_region(0.8), LiveRegion::Polite);

    let over = CharacterCount::new("abcdefghijk", 10);
    assert_eq!(over.overflow(), 1);
    assert_eq!(over.remaining(), 0);
    assert_eq!(over.to_string(), "1 character over the limit");
    assert_eq!(over.live_region(0.8), LiveRegion::Assertive);

    let way_over = CharacterCount::new("abcdefghijklm", 10);
    assert_eq!(way_over.message(), "3 characters over the limit");

    let empty_limit = CharacterCount::new("", 0);
    assert_eq!(empty_limit.ratio(), 1.0);
    assert!(!empty_limit.is_over_limit());
}

#[test]
fn test_form_character_count_uses_threshold() {
    let form = Form::new(FormConfig::new().character_count_threshold(0.5));
    let bio = Field::new("bio", "12345".to_string());
    let (count, region) = form.character_count(&bio, 10);
    assert_eq!(count.current, 5);
    assert_eq!(region, LiveRegion::Polite);
}
