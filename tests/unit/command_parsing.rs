//! Unit tests for the command line parser.

use stepper_pulse::command::{lookup, Command, COMMANDS};
use stepper_pulse::error::{CommandError, Error};

/// Test every legacy alias resolves to its primary verb.
#[test]
fn test_aliases_resolve() {
    for (alias, name) in [
        ("stepinit", "init"),
        ("stepenable", "enable"),
        ("steptim", "step-timer"),
        ("steptrapeze", "step-trapezoid"),
        ("stepstop", "step-stop"),
    ] {
        assert_eq!(lookup(alias).map(|info| info.name), Some(name));
    }
}

/// Test verbs are unique across names and aliases.
#[test]
fn test_verbs_unique() {
    let mut verbs: Vec<&str> = COMMANDS
        .iter()
        .flat_map(|info| core::iter::once(info.name).chain(info.alias))
        .collect();
    let count = verbs.len();
    verbs.sort_unstable();
    verbs.dedup();
    assert_eq!(verbs.len(), count);
}

/// Test extra arguments are ignored.
#[test]
fn test_extra_arguments_ignored() {
    assert_eq!(
        Command::parse("enable 1 trailing").unwrap(),
        Some(Command::Enable { state: 1 })
    );
}

/// Test a missing state argument is reported by name.
#[test]
fn test_missing_state_message() {
    let err = Command::parse("stepenable").unwrap_err();

    assert_eq!(err, Error::Command(CommandError::MissingArgument("state")));
    assert_eq!(
        format!("{}", err),
        "Command error: Missing state value"
    );
}

/// Test verbs are case sensitive.
#[test]
fn test_case_sensitive() {
    assert!(matches!(
        Command::parse("STEP 1 1"),
        Err(Error::Command(CommandError::UnknownCommand(_)))
    ));
}
