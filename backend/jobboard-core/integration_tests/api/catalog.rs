use crate::helpers::{client_for, start_backend};

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn given_query_when_searching_skills_then_trimmed_query_and_object_format_sent() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .and(query_param("format", "object"))
        .and(query_param("query", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Rust" },
            { "skillId": 9, "name": "Rust async" },
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = client_for(&server);

    let skills = client.search_skills("  rust ").await.unwrap();

    let ids: Vec<u64> = skills.iter().map(|s| s.skill_id).collect();
    assert_eq!(ids, vec![7, 9]);
}

/// **BUG THIS CATCHES**: Sending `query=` for the default page, which the
/// backend answers with an empty result.
#[tokio::test]
async fn given_blank_query_when_searching_regions_then_query_param_omitted() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/location"))
        .and(query_param("format", "object"))
        .and(query_param_is_missing("query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "regionId": 1, "name": "Ha Noi" }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = client_for(&server);

    let regions = client.search_regions("   ").await.unwrap();

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].name, "Ha Noi");
}
