use crate::helpers::{closed_port_url, jobs_body, signed_in_client, start_backend};

use jobboard_core::{ApiError, JobBoardClient};
use jobboard_core::api_client::JobQuery;
use models::Role;

use common::HttpStatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: A body in the wrong shape is an error, not an empty list.
///
/// **WHY THIS MATTERS**: Silently defaulting to `[]` would show "no jobs" when
/// the backend contract changed, hiding the real failure.
#[tokio::test]
async fn given_bare_array_for_keyed_endpoint_when_listing_then_rejected_as_malformed() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "jobId": 1 }])))
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let error = client.list_jobs(&JobQuery::All).await.unwrap_err();

    assert!(matches!(error, ApiError::Rejected { .. }));
    assert!(error.user_message().starts_with("Malformed response"));
}

#[tokio::test]
async fn given_html_body_when_listing_then_rejected_as_not_json() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/company/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let error = client.list_companies().await.unwrap_err();

    assert_eq!(error.status(), Some(HttpStatusCode(200)));
    assert!(
        error
            .user_message()
            .starts_with("Malformed response: body is not JSON"),
        "got {error:?}"
    );
}

#[tokio::test]
async fn given_fastapi_validation_error_when_request_fails_then_messages_joined() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/application/apply/5"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "cv"], "msg": "field required" },
                { "loc": ["path", "job_id"], "msg": "value is not a valid integer" },
            ]
        })))
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let error = client.apply(5).await.unwrap_err();

    assert_eq!(error.status(), Some(HttpStatusCode(422)));
    assert_eq!(
        error.user_message(),
        "field required; value is not a valid integer"
    );
}

#[tokio::test]
async fn given_error_without_message_when_request_fails_then_generic_server_error() {
    let server = start_backend().await;
    Mock::given(method("DELETE"))
        .and(path("/api/job/delete/9"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    let error = client.delete_job(9).await.unwrap_err();

    assert_eq!(error.user_message(), "Server error: 500");
}

/// **VALUE**: Idempotent reads ride out a brief outage.
///
/// **BUG THIS CATCHES**: Retry loop that gives up after the first 503, or
/// that keeps going forever.
#[tokio::test]
async fn given_two_503s_when_listing_then_third_attempt_succeeds() {
    // GIVEN: A backend that fails twice, then recovers
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body(&[1, 2, 3])))
        .with_priority(2)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    // WHEN: Listing jobs
    let jobs = client.list_jobs(&JobQuery::All).await.unwrap();

    // THEN: Three attempts in total
    assert_eq!(jobs.len(), 3);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn given_persistent_503_when_listing_then_gives_up_after_retry_budget() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let error = client.list_jobs(&JobQuery::All).await.unwrap_err();

    assert_eq!(error.status(), Some(HttpStatusCode(503)));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn given_503_on_mutation_when_sending_then_not_retried() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/job/3/publish"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    assert!(client.set_job_published(3, true).await.is_err());
}

#[tokio::test]
async fn given_unreachable_backend_when_listing_then_network_error() {
    let client = JobBoardClient::new(&closed_port_url()).expect("Failed to build client");

    let error = client.list_companies().await.unwrap_err();

    assert!(matches!(error, ApiError::Network { .. }), "got {error:?}");
    assert_eq!(
        error.user_message(),
        "Network error - please check your connection and retry."
    );
}
