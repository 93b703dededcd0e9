use crate::helpers::{jobs_body, signed_in_client, start_backend};

use jobboard_core::ApiError;
use jobboard_core::api_client::JobQuery;
use models::Role;
use models::JobDraftBuilder;

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn given_location_query_when_listing_then_location_is_a_path_segment() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/by-location/Ha%20Noi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body(&[1, 2])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let jobs = client
        .list_jobs(&JobQuery::Location(String::from(" Ha Noi ")))
        .await
        .unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].company_name(), "Acme");
}

#[tokio::test]
async fn given_skill_query_when_listing_then_each_skill_id_sent() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/by-skill"))
        .and(query_param("skill_ids", "1"))
        .and(query_param("skill_ids", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body(&[8])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let jobs = client.list_jobs(&JobQuery::Skills(vec![1, 4])).await.unwrap();

    assert_eq!(jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![8]);
}

#[tokio::test]
async fn given_inverted_salary_range_when_listing_then_validation_without_request() {
    let server = start_backend().await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let error = client
        .list_jobs(&JobQuery::SalaryRange {
            min: Some(3_000),
            max: Some(1_000),
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_salary_range_when_listing_then_bounds_sent_as_query() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .and(query_param("min_salary", "1000"))
        .and(query_param("max_salary", "3000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body(&[2, 3])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let jobs = client
        .list_jobs(&JobQuery::SalaryRange {
            min: Some(1_000),
            max: Some(3_000),
        })
        .await
        .unwrap();

    assert_eq!(jobs.len(), 2);
}

#[tokio::test]
async fn given_job_id_when_fetching_detail_then_single_object_decoded() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/job/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobId": 42,
            "title": "Backend Engineer",
            "isOpen": false,
            "skills": [{ "skillId": 7, "name": "Rust", "level": 3, "yearsExp": 2 }],
        })))
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let job = client.get_job(42).await.unwrap();

    assert_eq!(job.id, 42);
    assert!(!job.is_published());
    assert_eq!(job.skills[0].skill_id, 7);
    assert_eq!(job.skills[0].years_experience, 2.0);
}

#[tokio::test]
async fn given_employer_when_deleting_and_publishing_then_expected_routes_called() {
    let server = start_backend().await;
    Mock::given(method("DELETE"))
        .and(path("/api/job/delete/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/job/42/publish"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/job/42/unpublish"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    client.delete_job(42).await.unwrap();
    client.set_job_published(42, true).await.unwrap();
    client.set_job_published(42, false).await.unwrap();
}

#[tokio::test]
async fn given_job_draft_when_creating_then_sent_as_multipart_form() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/job/add"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Rust Engineer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    let draft = JobDraftBuilder::default()
        .with_title("Rust Engineer")
        .with_company("Acme")
        .with_location("Ha Noi")
        .with_description("Build the job board")
        .build()
        .expect("Draft should be valid");

    client.create_job(&draft).await.unwrap();
}

#[tokio::test]
async fn given_job_draft_when_updating_then_json_put_to_job_route() {
    let server = start_backend().await;
    Mock::given(method("PUT"))
        .and(path("/api/job/update/42"))
        .and(body_partial_json(json!({
            "title": "Senior Rust Engineer",
            "salary_min": 1500,
            "salary_max": 2500,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    let draft = JobDraftBuilder::default()
        .with_title("Senior Rust Engineer")
        .with_company("Acme")
        .with_location("Ha Noi")
        .with_description("Lead the job board")
        .with_salary_range(Some(1500), Some(2500))
        .build()
        .expect("Draft should be valid");

    client.update_job(42, &draft).await.unwrap();
}
