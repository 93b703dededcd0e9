use crate::helpers::{signed_in_client, start_backend};

use jobboard_core::SessionEvent;
use jobboard_core::views::{CandidateReview, CompanyDirectory, EmployerJobBoard};
use models::{ApplicationAction, ApplicationStatus, Role};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: A failed load never leaves yesterday's list on screen.
///
/// **BUG THIS CATCHES**: Keeping the previous items after an error so the
/// user acts on rows that may no longer exist.
#[tokio::test]
async fn given_loaded_board_when_reload_fails_then_empty_list_and_banner() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/by-company/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "jobs": [{ "jobId": 1, "title": "A" }] })),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/job/by-company/"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "detail": "No company yet" })),
        )
        .with_priority(2)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let board = EmployerJobBoard::new(client);
    assert_eq!(board.load().await.unwrap(), 1);

    assert!(board.load().await.is_err());

    assert!(board.jobs().is_empty());
    assert_eq!(board.jobs().error().as_deref(), Some("No company yet"));
}

#[tokio::test]
async fn given_expired_cookie_when_loading_then_session_expired_event() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/company/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let (client, session) = signed_in_client(&server, Role::Seeker).await;
    let mut events = session.subscribe();
    let directory = CompanyDirectory::new(client);

    let error = directory.load().await.unwrap_err();

    assert!(error.is_auth_expired());
    assert_eq!(
        directory.companies().error().as_deref(),
        Some("Session expired, please login again")
    );
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn given_company_list_when_searching_then_filtered_locally() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/company/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "companyId": 1, "name": "Acme", "industry": "Logistics", "location": "Ha Noi" },
            { "companyId": 2, "name": "Globex", "industry": "Energy", "location": "Da Nang" },
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let mut directory = CompanyDirectory::new(client);
    directory.load().await.unwrap();

    directory.set_query("energy");
    let names: Vec<String> = directory.visible().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec![String::from("Globex")]);

    directory.set_query("");
    directory.set_location("ha noi");
    let names: Vec<String> = directory.visible().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec![String::from("Acme")]);
}

#[tokio::test]
async fn given_candidate_when_accepted_then_status_interview_and_route_called() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/application/candicate_list/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [
                { "applicationId": 31, "jobId": 5, "fullName": "Ann Lee", "status": "submitted" },
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/application/fkoff/31/accept"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let review = CandidateReview::new(client, 5);
    review.load().await.unwrap();

    review.review(31, ApplicationAction::Accept).await.unwrap();

    let candidate = review.candidates().get(&31).unwrap();
    assert_eq!(candidate.status, ApplicationStatus::Interview);
    assert_eq!(candidate.applicant_name.as_deref(), Some("Ann Lee"));
}

/// **BUG THIS CATCHES**: A refused rejection leaving the candidate shown as
/// `rejected` while the server still has the application as submitted.
#[tokio::test]
async fn given_candidate_when_reject_fails_then_submitted_again_and_banner_shown() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/application/candicate_list/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [
                { "applicationId": 30, "jobId": 5, "fullName": "Bo Tran", "status": "submitted" },
                { "applicationId": 31, "jobId": 5, "fullName": "Ann Lee", "status": "submitted" },
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/application/fkoff/31/reject"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let review = CandidateReview::new(client, 5);
    review.load().await.unwrap();
    let before = review.candidates().snapshot();

    let error = review.review(31, ApplicationAction::Reject).await.unwrap_err();

    assert_eq!(error.user_message(), "Server error: 500");
    assert_eq!(review.candidates().snapshot(), before);
    assert_eq!(
        review.candidates().get(&31).unwrap().status,
        ApplicationStatus::Submitted
    );
    assert_eq!(
        review.candidates().error().as_deref(),
        Some("Server error: 500")
    );
}
