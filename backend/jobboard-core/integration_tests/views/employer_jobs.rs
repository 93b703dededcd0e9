use crate::helpers::{jobs_body, signed_in_client, start_backend};

use jobboard_core::filter::StatusTab;
use jobboard_core::optimistic::MutationOutcome;
use jobboard_core::views::EmployerJobBoard;
use models::Role;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_company_jobs(server: &MockServer, ids: &[u64]) {
    Mock::given(method("GET"))
        .and(path("/api/job/by-company/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body(ids)))
        .mount(server)
        .await;
}

fn visible_ids(board: &EmployerJobBoard) -> Vec<u64> {
    board.visible().iter().map(|j| j.id).collect()
}

/// **VALUE**: End-to-end optimistic delete with a server refusal.
///
/// **WHY THIS MATTERS**: The employer sees the row vanish immediately; when
/// the server says no, the row must come back in place with the reason.
///
/// **BUG THIS CATCHES**: Rollback appending job 42 at the end, or the error
/// banner never being set.
#[tokio::test]
async fn given_five_jobs_when_delete_fails_then_job_restored_in_place_with_banner() {
    // GIVEN: Five company jobs and a delete endpoint that fails slowly
    let server = start_backend().await;
    mount_company_jobs(&server, &[40, 41, 42, 43, 44]).await;
    Mock::given(method("DELETE"))
        .and(path("/api/job/delete/42"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "detail": "Job has applications" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let board = EmployerJobBoard::new(client);
    assert_eq!(board.load().await.unwrap(), 5);

    // WHEN: Deleting job 42 and looking while the request is pending
    let observer = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        (visible_ids(&board), board.jobs().is_busy(&42))
    };
    let (result, (during, busy)) = tokio::join!(board.delete(42), observer);

    // THEN: Hidden during the call, restored afterwards
    assert_eq!(during, vec![40, 41, 43, 44]);
    assert!(busy);
    assert!(result.is_err());
    assert_eq!(visible_ids(&board), vec![40, 41, 42, 43, 44]);
    assert_eq!(board.jobs().error().as_deref(), Some("Job has applications"));
    assert!(!board.jobs().is_busy(&42));
}

#[tokio::test]
async fn given_five_jobs_when_delete_succeeds_then_four_remain() {
    let server = start_backend().await;
    mount_company_jobs(&server, &[40, 41, 42, 43, 44]).await;
    Mock::given(method("DELETE"))
        .and(path("/api/job/delete/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let board = EmployerJobBoard::new(client);
    board.load().await.unwrap();

    let outcome = board.delete(42).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Committed(None));
    assert_eq!(visible_ids(&board), vec![40, 41, 43, 44]);
    assert_eq!(board.jobs().error(), None);
}

#[tokio::test]
async fn given_open_job_when_toggling_publish_then_closed_and_listed_under_closed_tab() {
    let server = start_backend().await;
    mount_company_jobs(&server, &[7, 8]).await;
    Mock::given(method("POST"))
        .and(path("/api/job/7/unpublish"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let mut board = EmployerJobBoard::new(client);
    board.load().await.unwrap();

    board.toggle_publish(7).await.unwrap();
    board.set_tab(StatusTab::Closed);

    assert_eq!(visible_ids(&board), vec![7]);
    board.set_tab(StatusTab::Open);
    assert_eq!(visible_ids(&board), vec![8]);
}

#[tokio::test]
async fn given_unknown_job_when_toggling_publish_then_validation_without_request() {
    let server = start_backend().await;
    mount_company_jobs(&server, &[7]).await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let board = EmployerJobBoard::new(client);
    board.load().await.unwrap();

    assert!(board.toggle_publish(99).await.is_err());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_unmounted_board_when_delete_fails_then_stale_and_no_banner() {
    let server = start_backend().await;
    mount_company_jobs(&server, &[1, 2]).await;
    Mock::given(method("DELETE"))
        .and(path("/api/job/delete/2"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let board = EmployerJobBoard::new(client);
    board.load().await.unwrap();

    let leave = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        board.unmount();
    };
    let (outcome, ()) = tokio::join!(board.delete(2), leave);

    assert_eq!(outcome.unwrap(), MutationOutcome::Stale);
    assert_eq!(board.jobs().error(), None);
}

#[tokio::test]
async fn given_open_job_when_toggled_twice_then_open_again() {
    let server = start_backend().await;
    mount_company_jobs(&server, &[7]).await;
    for action in ["unpublish", "publish"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/job/7/{action}")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }
    let (client, _session) = signed_in_client(&server, Role::Employer).await;
    let board = EmployerJobBoard::new(client);
    board.load().await.unwrap();

    board.toggle_publish(7).await.unwrap();
    board.toggle_publish(7).await.unwrap();

    let job = board.jobs().get(&7).unwrap();
    assert!(job.is_published());
}
