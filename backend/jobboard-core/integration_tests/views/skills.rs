use crate::helpers::{signed_in_client, start_backend};

use jobboard_core::ApiError;
use jobboard_core::views::SkillsPicker;
use models::{Role, SkillCatalogEntry};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_my_skills(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/profile/skills/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "skillId": 7, "name": "Rust", "level": 2, "yearsExp": 1.5 },
            { "skillId": 9, "name": "SQL", "level": 3, "yearsExp": 4 },
        ])))
        .mount(server)
        .await;
}

fn level_of(picker: &SkillsPicker, skill_id: u64) -> Option<u8> {
    picker.skills().get(&skill_id).map(|s| s.level)
}

#[tokio::test]
async fn given_level_two_when_server_accepts_level_four_then_four_kept() {
    let server = start_backend().await;
    mount_my_skills(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/profile/skills/7"))
        .and(body_json(json!({ "level": 4, "years_exp": 1.5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let picker = SkillsPicker::new(client);
    picker.load().await.unwrap();

    let outcome = picker.set_level(7, 4).await.unwrap();

    assert!(outcome.is_committed());
    assert_eq!(level_of(&picker, 7), Some(4));
    assert_eq!(level_of(&picker, 9), Some(3));
}

/// **VALUE**: A refused level change reverts to the pre-call value.
///
/// **BUG THIS CATCHES**: The picker keeping level 4 on screen while the
/// server still stores level 2.
#[tokio::test]
async fn given_level_two_when_server_rejects_level_four_then_reverted_to_two() {
    let server = start_backend().await;
    mount_my_skills(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/profile/skills/7"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Level locked" })),
        )
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let picker = SkillsPicker::new(client);
    picker.load().await.unwrap();

    let error = picker.set_level(7, 4).await.unwrap_err();

    assert_eq!(error.user_message(), "Level locked");
    assert_eq!(level_of(&picker, 7), Some(2));
    assert_eq!(picker.skills().error().as_deref(), Some("Level locked"));
}

#[tokio::test]
async fn given_out_of_range_level_when_setting_then_validation_without_request() {
    let server = start_backend().await;
    mount_my_skills(&server).await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let picker = SkillsPicker::new(client);
    picker.load().await.unwrap();

    let error = picker.set_level(7, 6).await.unwrap_err();

    assert!(matches!(error, ApiError::Validation { .. }));
    assert_eq!(level_of(&picker, 7), Some(2));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_owned_skill_when_adding_again_then_rejected_locally() {
    let server = start_backend().await;
    mount_my_skills(&server).await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let picker = SkillsPicker::new(client);
    picker.load().await.unwrap();

    let rust = SkillCatalogEntry {
        skill_id: 7,
        name: String::from("Rust"),
    };

    assert!(picker.add(&rust).await.is_err());
    assert_eq!(picker.skills().len(), 2);
}

#[tokio::test]
async fn given_new_catalog_skill_when_adding_then_saved_at_level_one() {
    let server = start_backend().await;
    mount_my_skills(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/profile/skills/12"))
        .and(body_json(json!({ "level": 1, "years_exp": 0.0 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let picker = SkillsPicker::new(client);
    picker.load().await.unwrap();

    let go = SkillCatalogEntry {
        skill_id: 12,
        name: String::from("Go"),
    };
    picker.add(&go).await.unwrap();

    assert_eq!(level_of(&picker, 12), Some(1));
    assert_eq!(picker.skills().len(), 3);
}

#[tokio::test]
async fn given_catalog_search_when_typing_then_only_final_query_hits_server() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .and(query_param("query", "rus"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 7, "name": "Rust" }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let picker = SkillsPicker::new(client);

    let mut search = picker.catalog_search(Duration::from_millis(150));
    search.set_query("r");
    search.set_query("ru");
    search.set_query("rus");
    let state = search.settled().await;

    assert_eq!(state.query, "rus");
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].name, "Rust");
}

#[tokio::test]
async fn given_skill_when_remove_fails_then_restored_at_same_position() {
    let server = start_backend().await;
    mount_my_skills(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/profile/skills/7"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;
    let picker = SkillsPicker::new(client);
    picker.load().await.unwrap();
    let before = picker.skills().snapshot();

    let error = picker.remove(7).await.unwrap_err();

    assert!(matches!(error, ApiError::Rejected { .. }));
    assert_eq!(picker.skills().snapshot(), before);
    assert_eq!(level_of(&picker, 7), Some(2));
    assert_eq!(
        picker.skills().error().as_deref(),
        Some("Server error: 500")
    );
}
