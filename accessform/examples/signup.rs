//! Walks a sign-up form through blur, a blocked submit, a fix and a
//! successful submit, printing what a renderer would apply at each step.

use std::fs::File;

use accessform::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn required(name: &str, message: &'static str) -> Field<String> {
    Field::new(name, String::new()).validate_with(move |v: &String| {
        if v.trim().is_empty() {
            vec![ValidationError::new("required", message)]
        } else {
            Vec::new()
        }
    })
}

fn print_field(form: &Form, field: &Field<String>) {
    let visible = form.show_errors_for(field).get();
    let attrs = form.aria_for(
        field,
        Assistive {
            required: true,
            ..Default::default()
        },
    );
    println!("  {:<10} value={:?} visible={}", field.name(), field.value(), visible);
    for (name, value) in attrs.iter() {
        println!("    {}=\"{}\"", name, value);
    }
    if visible {
        for error in field.blocking_errors() {
            println!("    ! {}", error.message_or_empty());
        }
    }
    for warning in field.warnings() {
        println!("    ~ {}", warning.message_or_empty());
    }
}

fn print_form(form: &Form, fields: &[&Field<String>]) {
    println!("status={} strategy={}", form.status(), form.strategy());
    for field in fields {
        print_field(form, field);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log_file = File::create("signup.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let form = Form::new(FormConfig::new().id_prefix("signup"));
    let name = required("name", "Name is required");
    let password = required("password", "Password is required");
    form.register(&name).expect("unique field name");
    form.register(&password).expect("unique field name");

    println!("-- initial");
    print_form(&form, &[&name, &password]);

    println!("-- name blurred");
    name.focus();
    name.blur();
    print_form(&form, &[&name, &password]);

    println!("-- submit");
    match form.submit(|_| async { "account created" }).await {
        Ok(SubmitOutcome::Blocked { first_invalid }) => {
            println!("blocked, focus {:?}", first_invalid)
        }
        Ok(SubmitOutcome::Completed(message)) => println!("{}", message),
        Err(e) => println!("error: {}", e),
    }
    print_form(&form, &[&name, &password]);

    println!("-- fixed");
    name.set_value("Ada".to_string());
    password.set_value("hunter2".to_string());
    let result = Validator::new()
        .field(&password, "password")
        .required("Password is required")
        .warning(
            "short-password",
            |v: &String| v.chars().count() >= 12,
            "Longer passwords are harder to guess",
        )
        .validate();
    println!("valid={}", result.is_valid());
    print_form(&form, &[&name, &password]);

    println!("-- submit again");
    if let Ok(SubmitOutcome::Completed(message)) = form.submit(|_| async { "account created" }).await {
        println!("{}", message);
    }
    print_form(&form, &[&name, &password]);
}
