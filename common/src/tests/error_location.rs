use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every gateway error carries a location. If capture breaks,
/// an upstream failure in the logs can no longer be traced to the call that made it.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops being propagated
/// or if the file path is dropped.
#[test]
#[track_caller]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN/WHEN: An ErrorLocation built from the caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: File, line and column are populated
    assert!(location.file.contains("error_location.rs"));
    assert!(location.line > 0, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies the "[file:line:column]" display format.
///
/// **WHY THIS MATTERS**: Error messages embed the location verbatim; a format change
/// makes log lines unreadable for whoever is chasing an upstream outage.
///
/// **BUG THIS CATCHES**: Would catch if brackets or separators are removed.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A fixed location
    let location = ErrorLocation {
        file: "gateway.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting
    let formatted = location.to_string();

    // THEN: Bracketed triple
    assert_eq!(formatted, "[gateway.rs:42:7]");
}

/// **VALUE**: Verifies `ErrorLocation::caller()` reports the caller of a tracked function.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is removed from `caller()`,
/// which would make every error point at error_location.rs itself.
#[test]
fn given_tracked_helper_when_caller_used_then_reports_test_file() {
    #[track_caller]
    fn raise() -> ErrorLocation {
        ErrorLocation::caller()
    }

    let location = raise();

    assert!(location.file.contains("tests"));
    assert!(!location.file.ends_with("error/error_location.rs"));
}
