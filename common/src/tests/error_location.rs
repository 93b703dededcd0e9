use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every error in the workspace embeds an ErrorLocation. If capture
/// breaks, a rejected job delete or a failed CV upload can no longer be traced to its call site.
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN/WHEN: Creating ErrorLocation from this exact line
    let expected_line = line!() + 1;
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should point at this test file
    assert!(location.file.contains("error_location.rs"));
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0, "Should capture column number");
}

#[track_caller]
fn capture_through_helper() -> ErrorLocation {
    ErrorLocation::caller()
}

/// **VALUE**: `ErrorLocation::caller()` must resolve to the helper's caller, not the helper.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is dropped from `caller()`, which
/// would make every error report the same line inside `error_location.rs` of the common crate.
#[test]
fn given_track_caller_helper_when_capturing_then_reports_outer_call_site() {
    let expected_line = line!() + 1;
    let location = capture_through_helper();

    assert_eq!(location.line, expected_line);
    assert!(location.file.contains("tests"));
}

#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/api_client/jobs.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/api_client/jobs.rs:42:7]");
}
