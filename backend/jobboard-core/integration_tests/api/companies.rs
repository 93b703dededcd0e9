use crate::helpers::{signed_in_client, start_backend};

use jobboard_core::ApiError;
use models::{CompanyDraft, Role};

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn draft(name: &str) -> CompanyDraft {
    CompanyDraft {
        name: String::from(name),
        website: Some(String::from("https://acme.example")),
        location: Some(String::from("Ha Noi")),
        ..CompanyDraft::default()
    }
}

#[tokio::test]
async fn given_employer_when_fetching_own_company_then_embedded_jobs_decoded() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/company/mine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "companyId": 3,
            "name": "Acme",
            "location": "Ha Noi",
            "description": "Makes anvils",
            "jobs": [{ "jobId": 42, "title": "Rust Engineer", "isOpen": true }],
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    let company = client.my_company().await.unwrap();

    assert_eq!(company.id, 3);
    assert_eq!(company.about.as_deref(), Some("Makes anvils"));
    assert_eq!(company.jobs.len(), 1);
    assert_eq!(company.jobs[0].id, 42);
}

#[tokio::test]
async fn given_company_draft_when_creating_then_posted_as_json() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/company/add"))
        .and(body_partial_json(json!({ "name": "Acme", "location": "Ha Noi" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    client.create_company(&draft("Acme")).await.unwrap();
}

#[tokio::test]
async fn given_company_draft_when_updating_then_put_without_company_id() {
    let server = start_backend().await;
    Mock::given(method("PUT"))
        .and(path("/api/company/update"))
        .and(body_partial_json(json!({ "name": "Acme Ltd" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    client.update_my_company(&draft("Acme Ltd")).await.unwrap();
}

#[tokio::test]
async fn given_blank_company_name_when_creating_then_validation_without_request() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;

    let result = client.create_company(&draft("   ")).await;

    assert!(matches!(result, Err(ApiError::Validation { .. })));
}
