use crate::helpers::{signed_in_client, start_backend};

use models::{ProfileUpdate, Role};

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn given_signed_in_user_when_fetching_profile_then_id_alias_decoded() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11,
            "fullName": "Test User",
            "email": "test@example.com",
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let profile = client.my_profile().await.unwrap();

    assert_eq!(profile.user_id, Some(11));
    assert_eq!(profile.full_name.as_deref(), Some("Test User"));
    assert_eq!(profile.phone, None);
}

/// **BUG THIS CATCHES**: unset fields serialized as `null` would wipe the
/// stored phone number when only the name changes.
#[tokio::test]
async fn given_name_only_update_when_saving_profile_then_phone_omitted() {
    let server = start_backend().await;
    Mock::given(method("PUT"))
        .and(path("/api/profile/me"))
        .and(body_json(json!({ "full_name": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = signed_in_client(&server, Role::Seeker).await;

    let update = ProfileUpdate {
        full_name: Some(String::from("Renamed")),
        phone: None,
    };

    client.update_my_profile(&update).await.unwrap();
}
