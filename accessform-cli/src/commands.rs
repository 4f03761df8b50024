//! Subcommand implementations. Each returns the lines to print.

use accessform::config::FormConfig;
use accessform::validation::{Severity, ValidationError};
use accessform::visibility::{
    ErrorDisplayStrategy, FieldStatus, SubmittedStatus, should_show_errors,
};
use anyhow::{Context, Result};

use crate::cli::{ClassifyArgs, ExplainArgs, TableArgs};

const STATUSES: [SubmittedStatus; 3] = [
    SubmittedStatus::Unsubmitted,
    SubmittedStatus::Submitting,
    SubmittedStatus::Submitted,
];

/// Resolve a strategy argument, falling back to the config default.
pub fn resolve_strategy(arg: Option<&str>, config: &FormConfig) -> ErrorDisplayStrategy {
    match arg {
        Some(name) => match name.parse() {
            Ok(strategy) => strategy,
            Err(e) => {
                log::warn!("{}; falling back to on-touch", e);
                ErrorDisplayStrategy::OnTouch
            }
        },
        None => config.strategy,
    }
}

pub fn explain(args: &ExplainArgs, config: &FormConfig) -> Result<Vec<String>> {
    let strategy = resolve_strategy(args.strategy.as_deref(), config);
    let status: SubmittedStatus = args
        .status
        .parse()
        .with_context(|| format!("invalid --status '{}'", args.status))?;
    let field = FieldStatus::new(args.invalid, args.touched);

    let visible = should_show_errors(Some(&field), strategy, status);
    log::debug!(
        "explain: strategy={} status={} field={:?} -> {}",
        strategy,
        status,
        field,
        visible
    );

    Ok(vec![
        format!("strategy:  {}", strategy),
        format!("status:    {}", status),
        format!("invalid:   {}", field.invalid),
        format!("touched:   {}", field.touched),
        format!("visible:   {}", if visible { "yes" } else { "no" }),
    ])
}

pub fn table(args: &TableArgs, config: &FormConfig) -> Vec<String> {
    let strategies: Vec<ErrorDisplayStrategy> = match args.strategy.as_deref() {
        Some(name) => vec![resolve_strategy(Some(name), config)],
        None => ErrorDisplayStrategy::ALL.to_vec(),
    };

    let mut lines = vec![format!(
        "{:<10} {:<12} {:<8} {:<8} {}",
        "strategy", "status", "invalid", "touched", "visible"
    )];
    for strategy in strategies {
        for status in STATUSES {
            for invalid in [false, true] {
                for touched in [false, true] {
                    let field = FieldStatus::new(invalid, touched);
                    let visible = should_show_errors(Some(&field), strategy, status);
                    lines.push(format!(
                        "{:<10} {:<12} {:<8} {:<8} {}",
                        strategy.as_str(),
                        status.as_str(),
                        invalid,
                        touched,
                        visible
                    ));
                }
            }
        }
    }
    lines
}

pub fn classify(args: &ClassifyArgs) -> Vec<String> {
    args.kinds
        .iter()
        .map(|kind| {
            let error = ValidationError::with_kind(kind.as_str());
            let label = match error.severity() {
                Severity::Blocking => "blocking",
                Severity::Warning => "warning",
            };
            format!("{:<24} {}", kind, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explain_args(strategy: &str, status: &str, invalid: bool, touched: bool) -> ExplainArgs {
        ExplainArgs {
            strategy: Some(strategy.to_string()),
            status: status.to_string(),
            invalid,
            touched,
        }
    }

    #[test]
    fn test_explain_visible() {
        let lines = explain(&explain_args("on-touch", "submitted", true, false), &FormConfig::default())
            .unwrap();
        assert_eq!(lines.last().map(String::as_str), Some("visible:   yes"));
    }

    #[test]
    fn test_explain_unknown_strategy_falls_back() {
        let lines = explain(&explain_args("bogus", "unsubmitted", true, true), &FormConfig::default())
            .unwrap();
        assert_eq!(lines[0], "strategy:  on-touch");
        assert_eq!(lines[4], "visible:   yes");
    }

    #[test]
    fn test_explain_rejects_bad_status() {
        let err = explain(&explain_args("manual", "done", true, true), &FormConfig::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_strategy_defaults_to_config() {
        let config = FormConfig::new().strategy(ErrorDisplayStrategy::Manual);
        assert_eq!(resolve_strategy(None, &config), ErrorDisplayStrategy::Manual);
    }

    #[test]
    fn test_table_rows() {
        let all = table(&TableArgs { strategy: None }, &FormConfig::default());
        assert_eq!(all.len(), 1 + 4 * 3 * 4);

        let manual = table(
            &TableArgs {
                strategy: Some("manual".to_string()),
            },
            &FormConfig::default(),
        );
        assert_eq!(manual.len(), 1 + 3 * 4);
        assert!(manual[1..].iter().all(|row| row.ends_with("false")));
    }

    #[test]
    fn test_classify() {
        let lines = classify(&ClassifyArgs {
            kinds: vec!["required".to_string(), "warn:weak".to_string(), "warning".to_string()],
        });
        assert!(lines[0].ends_with("blocking"));
        assert!(lines[1].ends_with("warning"));
        assert!(lines[2].ends_with("blocking"));
    }
}
