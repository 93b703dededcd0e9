use crate::error::ApiError;
use crate::error::api::extract_server_message;

use common::HttpStatusCode;

#[test]
fn given_detail_string_when_building_from_response_then_message_is_detail() {
    let err = ApiError::from_response(HttpStatusCode(400), r#"{"detail": "Only PDF/DOC/DOCX allowed."}"#);

    assert_eq!(err.user_message(), "Only PDF/DOC/DOCX allowed.");
    assert_eq!(err.status(), Some(HttpStatusCode(400)));
}

/// **VALUE**: FastAPI validation errors arrive as `{"detail": [{"msg": ...}]}`.
///
/// **BUG THIS CATCHES**: Showing "Server error: 422" instead of the field message.
#[test]
fn given_pydantic_detail_list_when_extracting_then_messages_joined() {
    let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "field required"}, {"msg": "too short"}]}"#;

    assert_eq!(
        extract_server_message(body).as_deref(),
        Some("field required; too short")
    );
}

#[test]
fn given_message_or_error_field_when_extracting_then_used_as_fallback() {
    assert_eq!(
        extract_server_message(r#"{"success": false, "message": "Wrong password"}"#).as_deref(),
        Some("Wrong password")
    );
    assert_eq!(
        extract_server_message(r#"{"success": false, "error": "duplicate"}"#).as_deref(),
        Some("duplicate")
    );
}

#[test]
fn given_unreadable_body_when_building_from_response_then_generic_message() {
    let html = ApiError::from_response(HttpStatusCode(502), "<html>Bad Gateway</html>");
    let blank = ApiError::from_response(HttpStatusCode(500), r#"{"detail": "  "}"#);

    assert_eq!(html.user_message(), "Server error: 502");
    assert_eq!(blank.user_message(), "Server error: 500");
}

#[test]
fn given_each_kind_when_checking_retryable_then_only_transient_failures_retry() {
    assert!(ApiError::network("connection refused", false).is_retryable());
    assert!(ApiError::rejected(503u16, "down").is_retryable());
    assert!(ApiError::rejected(429u16, "slow down").is_retryable());
    assert!(!ApiError::rejected(404u16, "gone").is_retryable());
    assert!(!ApiError::validation("bad").is_retryable());
    assert!(!ApiError::auth_expired().is_retryable());
}

#[test]
fn given_network_or_auth_error_when_rendering_for_user_then_fixed_copy() {
    assert_eq!(
        ApiError::network("tcp reset", true).user_message(),
        "Network error - please check your connection and retry."
    );
    assert_eq!(
        ApiError::auth_expired().user_message(),
        "Session expired, please login again"
    );
    assert_eq!(ApiError::auth_expired().status(), Some(HttpStatusCode::UNAUTHORIZED));
}

/// **VALUE**: Display carries the kind and the file position.
#[test]
fn given_error_when_displayed_then_includes_kind_and_location() {
    let err = ApiError::validation("Please choose a CV file.");

    let text = err.to_string();

    assert!(text.starts_with("Validation Error: Please choose a CV file."), "{text}");
    assert!(text.contains("api_error.rs"), "{text}");
}

#[test]
fn given_model_error_when_converted_then_becomes_validation() {
    let model_err = models::SkillAssignment::check_level(9).unwrap_err();

    let err: ApiError = model_err.into();

    assert!(matches!(err, ApiError::Validation { .. }));
    assert!(err.user_message().contains("between 1 and 5"));
}
