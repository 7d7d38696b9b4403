use crate::{Diagnostic, Message, Severity};

#[test]
fn message_carries_severity_header() {
    colored::control::set_override(false);

    assert_eq!(
        Message::new(Severity::Error, "operator not found: %").to_string(),
        "[error]: operator not found: %"
    );
    assert_eq!(
        Message::new(Severity::Warning, "approximate").to_string(),
        "[warning]: approximate"
    );
}

#[test]
fn diagnostic_shows_subject_and_help() {
    colored::control::set_override(false);

    let diagnostic = Diagnostic {
        subject: Some("f'".to_string()),
        message: "`f` is not bound to a function".to_string(),
        severity: Severity::Error,
        help_message: Some("define `f(x) = ...` first".to_string()),
    };

    assert_eq!(
        diagnostic.to_string(),
        "[error]: `f` is not bound to a function\n --> f'\n  = help: define \
         `f(x) = ...` first"
    );
}
