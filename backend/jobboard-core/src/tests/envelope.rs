use crate::envelope::{ListEnvelope, decode_item, decode_list};
use crate::error::ApiError;

use common::HttpStatusCode;
use models::{Application, JobPosting, SkillCatalogEntry};

use serde_json::json;

const OK: HttpStatusCode = HttpStatusCode(200);

#[test]
fn given_keyed_envelope_when_body_matches_then_items_decoded_in_order() {
    let body = json!({"jobs": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}], "total": 2});

    let jobs: Vec<JobPosting> = decode_list(ListEnvelope::Keyed("jobs"), OK, body).unwrap();

    assert_eq!(jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn given_bare_envelope_when_body_is_array_then_items_decoded() {
    let body = json!([{"skill_id": 1, "name": "Rust"}, {"id": 2, "name": "Go"}]);

    let skills: Vec<SkillCatalogEntry> = decode_list(ListEnvelope::Bare, OK, body).unwrap();

    assert_eq!(skills[1].skill_id, 2, "`id` alias accepted");
}

/// **VALUE**: A contract change on the server surfaces as an error.
///
/// **WHY THIS MATTERS**: Defaulting an unexpected shape to `[]` renders as
/// "no jobs found", which hides the real failure from users and developers.
///
/// **BUG THIS CATCHES**: Falling back to an empty list when `{"jobs": ...}`
/// comes back as a bare array (or vice versa).
#[test]
fn given_wrong_shape_when_decoding_list_then_rejected_as_malformed() {
    let bare_where_keyed = decode_list::<JobPosting>(ListEnvelope::Keyed("jobs"), OK, json!([]));
    let keyed_where_bare = decode_list::<JobPosting>(ListEnvelope::Bare, OK, json!({"jobs": []}));
    let missing_key = decode_list::<Application>(ListEnvelope::Keyed("result"), OK, json!({"success": true}));

    for result in [bare_where_keyed, keyed_where_bare] {
        match result {
            Err(ApiError::Rejected { status, message, .. }) => {
                assert_eq!(status, OK);
                assert!(message.starts_with("Malformed response"), "{message}");
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }
    match missing_key {
        Err(ApiError::Rejected { message, .. }) => assert!(message.contains("missing 'result'")),
        other => panic!("Expected Rejected, got {other:?}"),
    }
}

#[test]
fn given_key_holding_non_array_when_decoding_then_reason_names_the_key() {
    let result = decode_list::<JobPosting>(ListEnvelope::Keyed("jobs"), OK, json!({"jobs": null}));

    let err = result.unwrap_err();
    assert!(err.to_string().contains("'jobs' is null"), "{err}");
}

#[test]
fn given_one_bad_item_when_decoding_list_then_error_names_index() {
    let body = json!([{"skill_id": 1, "name": "Rust"}, {"name": "no id"}]);

    let err = decode_list::<SkillCatalogEntry>(ListEnvelope::Bare, OK, body).unwrap_err();

    assert!(err.user_message().contains("item 1"), "{}", err.user_message());
}

#[test]
fn given_null_body_when_decoding_item_then_rejected() {
    let err = decode_item::<JobPosting>(HttpStatusCode(201), serde_json::Value::Null).unwrap_err();

    assert_eq!(err.status(), Some(HttpStatusCode(201)));
}
