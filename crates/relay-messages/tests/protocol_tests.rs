//! Integration tests for rendering and parsing protocol messages.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use relay_messages::{Action, Error, Field, Message, Template, parse, resolve};
use rstest::rstest;

/// Build the mapping a rendered message is expected to parse back into.
fn expected_fields(action: Action, from: &str, to: &str, body: &Message) -> Message {
    let mut expected = Message::new()
        .with(Field::From, from)
        .with(Field::To, to)
        .with(Field::Action, action.as_str());
    for &field in action.body_fields() {
        expected.insert(field, body.field(field).unwrap());
    }
    expected
}

#[rstest]
#[case(Action::GenerateSteps, Field::Details, "Build a todo app in Rust")]
#[case(Action::InstallPackage, Field::Command, "cargo add serde")]
#[case(Action::ProblemStatement, Field::Details, "The build is failing")]
#[case(Action::StepStarted, Field::Details, "Starting steps 2 and 3")]
#[case(Action::TrainUsingSearchTerm, Field::Term, "tokio select macro")]
#[case(Action::TrainUsingUrl, Field::Url, "https://docs.rs/regex")]
#[case(Action::Infer, Field::Details, "How do I cancel a task?")]
fn test_render_then_parse_roundtrip(
    #[case] action: Action,
    #[case] field: Field,
    #[case] value: &str,
) {
    let body = Message::new().with(field, value);
    let text = Template::new(action).render("SENDER", "RECEIVER", &body).unwrap();

    let parsed = parse(&text).unwrap();
    assert_eq!(parsed, expected_fields(action, "SENDER", "RECEIVER", &body));
    assert_eq!(parsed.action(), Ok(action));
}

#[test]
fn test_every_action_resolves_to_its_own_template() {
    for action in Action::ALL {
        let template = resolve(action.as_str()).unwrap();
        assert_eq!(template.action(), action);
        assert!(template.required_fields().starts_with(&Field::ENVELOPE));
    }
}

#[test]
fn test_every_sample_parses_and_validates() {
    for action in Action::ALL {
        let sample = Template::new(action).sample("FROM_AGENT", "TO_AGENT");
        let parsed = parse(&sample).unwrap();
        assert_eq!(parsed.action(), Ok(action), "sample for {action}");
    }
}

#[test]
fn test_multiline_details_roundtrip() {
    let body = Message::new().with(Field::Details, "Plan:\n1. read\n2. write");
    let text = Template::new(Action::Inform).render("A", "B", &body).unwrap();
    assert_eq!(parse(&text).unwrap().details(), Some("Plan:\n1. read\n2. write"));
}

#[test]
fn test_value_cannot_override_action() {
    let body = Message::new().with(Field::Details, "Plan\nACTION: solution-complete");
    let err = Template::new(Action::Inform).render("CODER", "USER", &body).unwrap_err();
    assert!(matches!(
        err,
        Error::AmbiguousValue {
            action: Action::Inform,
            field: Field::Details,
            ..
        }
    ));
}

#[test]
fn test_parse_reports_unknown_action_only_on_resolve() {
    let message = parse("FROM: A\nTO: B\nACTION: frobnicate").unwrap();
    assert_eq!(
        message.action(),
        Err(Error::UnknownAction("frobnicate".to_string()))
    );
}

fn line_strategy() -> impl Strategy<Value = String> {
    // Printable, no surrounding whitespace, and never shaped like a `KEY:` line.
    "[a-z0-9][a-zA-Z0-9 .,:/?!()-]{0,40}[a-z0-9.?!)]"
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 1..4).prop_map(|lines| lines.join("\n"))
}

/// Continuation line that the parser would read as something else.
fn breaking_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][A-Z0-9_]{0,8}: [a-z ]{0,10}",
        "```[a-z]{0,6}",
    ]
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z_]{0,11}"
}

proptest! {
    #[test]
    fn test_parse_inverts_render(
        action_index in 0..Action::ALL.len(),
        from in name_strategy(),
        to in name_strategy(),
        value in value_strategy(),
    ) {
        let action = Action::ALL[action_index];
        let body: Message = action
            .body_fields()
            .iter()
            .map(|&field| (field, value.clone()))
            .collect();

        let text = Template::new(action).render(&from, &to, &body).unwrap();
        let parsed = parse(&text).unwrap();

        prop_assert_eq!(parsed, expected_fields(action, &from, &to, &body));
    }

    #[test]
    fn test_render_refuses_values_that_parse_differently(
        action_index in 0..Action::ALL.len(),
        head in line_strategy(),
        breaking in breaking_line_strategy(),
    ) {
        let action = Action::ALL[action_index];
        prop_assume!(!action.body_fields().is_empty());
        let value = format!("{head}\n{breaking}");
        let body: Message = action
            .body_fields()
            .iter()
            .map(|&field| (field, value.clone()))
            .collect();

        let result = Template::new(action).render("SENDER", "RECEIVER", &body);
        let is_ambiguous = matches!(result, Err(Error::AmbiguousValue { .. }));
        prop_assert!(is_ambiguous);
    }
}
