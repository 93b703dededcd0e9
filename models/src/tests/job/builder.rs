use crate::{JobDraftBuilder, JobStatus, ModelError};

fn complete_builder() -> JobDraftBuilder {
    JobDraftBuilder::default()
        .with_title("Rust Engineer")
        .with_company("3")
        .with_location("Hanoi")
        .with_description("Build the client core")
}

/// **VALUE**: Verifies that a missing title is rejected before any request is made.
///
/// **WHY THIS MATTERS**: The backend answers `400 Missing fields` for incomplete posts.
/// Catching it locally keeps the failure a `ValidationError` instead of a round trip.
///
/// **BUG THIS CATCHES**: Would catch if the required-field check is removed from `build()`.
#[test]
fn given_missing_title_when_building_draft_then_returns_validation_error() {
    // GIVEN: Builder without a title
    let builder = JobDraftBuilder::default()
        .with_company("3")
        .with_location("Hanoi")
        .with_description("Build the client core");

    // WHEN: Building
    let result = builder.build();

    // THEN: Validation error names the field
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => assert_eq!(message, "Title is required"),
    }
}

#[test]
fn given_blank_location_when_building_draft_then_returns_validation_error() {
    let result = complete_builder().with_location("   ").build();

    let err = result.unwrap_err();
    assert_eq!(err.message(), "Location cannot be empty");
}

/// **VALUE**: An inverted salary range is rejected.
///
/// **BUG THIS CATCHES**: Would catch a swapped comparison that lets `min > max` through,
/// which would render as a negative range on the listing card.
#[test]
fn given_inverted_salary_range_when_building_then_returns_validation_error() {
    let result = complete_builder()
        .with_salary_range(Some(3000), Some(1000))
        .build();

    assert!(result.unwrap_err().message().contains("exceeds maximum"));
}

#[test]
fn given_complete_builder_when_building_then_form_fields_include_optional_values() {
    // GIVEN: Every field populated
    let draft = complete_builder()
        .with_employment_type("Full-time")
        .with_salary_range(Some(1000), Some(2000))
        .with_status(JobStatus::Draft)
        .build()
        .unwrap();

    // WHEN: Flattening into form fields
    let fields = draft.form_fields();

    // THEN: Required fields come first, optional ones follow
    assert_eq!(fields[0], ("title", String::from("Rust Engineer")));
    assert!(fields.contains(&("type", String::from("Full-time"))));
    assert!(fields.contains(&("salary_max", String::from("2000"))));
    assert!(fields.contains(&("status", String::from("draft"))));
}
