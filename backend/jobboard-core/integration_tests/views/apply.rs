use crate::helpers::{jobs_body, signed_in_client, start_backend};

use jobboard_core::apply_flow::{AppliedJobs, ApplyOutcome, ApplyState, CvFile, MIME_PDF};
use jobboard_core::views::{JobListings, MyApplications};
use models::Role;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MB: usize = 1024 * 1024;

async fn mount_jobs(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body(&[5, 6])))
        .mount(server)
        .await;
}

/// **VALUE**: The whole apply journey: pick a CV, upload, job marked applied.
///
/// **WHY THIS MATTERS**: The upload is multipart with the file under `cv`; a
/// hand-set content type without a boundary makes the backend drop the file.
///
/// **BUG THIS CATCHES**: A missing boundary, a wrong field name, or the job
/// not being recorded as applied so the button stays enabled.
#[tokio::test]
async fn given_two_megabyte_pdf_when_applying_then_uploaded_and_job_marked_applied() {
    // GIVEN: Job listings with job 5, and an apply endpoint expecting a CV part
    let server = start_backend().await;
    mount_jobs(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/application/apply/5"))
        .and(header_regex("content-type", "^multipart/form-data; boundary=.+"))
        .and(body_string_contains("name=\"cv\"; filename=\"resume.pdf\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "applied": true, "cv": "cv_5_11.pdf" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let listings = JobListings::new(client.clone(), AppliedJobs::new());
    listings.load().await.unwrap();

    // WHEN: Selecting resume.pdf and submitting
    let mut flow = listings.apply_flow(5);
    flow.select_file(CvFile::new("resume.pdf", MIME_PDF, vec![0u8; 2 * MB]))
        .unwrap();
    let outcome = flow.submit(&client).await.unwrap();

    // THEN: Applied, remembered for the session
    match outcome {
        ApplyOutcome::Applied(receipt) => {
            assert!(receipt.applied);
            assert_eq!(receipt.cv.as_deref(), Some("cv_5_11.pdf"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(flow.state(), ApplyState::Applied);
    assert!(listings.is_applied(5));
    assert!(!listings.is_applied(6));
    assert_eq!(listings.apply_flow(5).state(), ApplyState::Applied);
}

#[tokio::test]
async fn given_oversized_cv_when_selecting_then_nothing_sent() {
    let server = start_backend().await;
    mount_jobs(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/application/apply/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let listings = JobListings::new(client.clone(), AppliedJobs::new());

    let mut flow = listings.apply_flow(5);
    assert!(
        flow.select_file(CvFile::new("big.pdf", MIME_PDF, vec![0u8; 6 * MB]))
            .is_err()
    );
    let error = flow.submit(&client).await.unwrap_err();

    assert_eq!(error.user_message(), "Please choose a CV file.");
    assert!(!listings.is_applied(5));
}

#[tokio::test]
async fn given_upload_refused_when_applying_then_file_kept_for_retry() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/application/apply/5"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Job is closed" })),
        )
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let listings = JobListings::new(client.clone(), AppliedJobs::new());

    let mut flow = listings.apply_flow(5);
    flow.select_file(CvFile::new("resume.pdf", MIME_PDF, vec![1u8; 1024]))
        .unwrap();
    assert!(flow.submit(&client).await.is_err());

    assert_eq!(flow.error().as_deref(), Some("Job is closed"));
    assert!(flow.can_submit());
    assert!(!listings.is_applied(5));
}

#[tokio::test]
async fn given_existing_applications_when_loaded_then_jobs_marked_applied() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/application/application_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [
                { "applicationId": 1, "jobId": 5, "status": "pending", "title": "Job 5" },
                { "applicationId": 2, "jobId": 6, "status": "interview", "title": "Job 6" },
            ]
        })))
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let applied = AppliedJobs::new();
    let applications = MyApplications::new(client.clone(), applied.clone());
    let listings = JobListings::new(client, applied);

    assert_eq!(applications.load().await.unwrap(), 2);

    assert!(listings.is_applied(5));
    assert!(listings.is_applied(6));
    assert_eq!(listings.apply_flow(6).state(), ApplyState::Applied);
}
