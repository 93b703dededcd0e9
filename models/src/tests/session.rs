use crate::{Role, SessionIdentity};

use serde_json::json;

#[test]
fn given_login_role_strings_when_parsing_then_unknown_falls_back_to_seeker() {
    assert_eq!(Role::from_login(Some("Employer")), Role::Employer);
    assert_eq!(Role::from_login(Some("admin")), Role::Admin);
    assert_eq!(Role::from_login(Some("user")), Role::Seeker);
    assert_eq!(Role::from_login(Some("recruiter")), Role::Seeker);
    assert_eq!(Role::from_login(None), Role::Seeker);
}

#[test]
fn given_identity_when_round_tripping_json_then_role_uses_backend_names() {
    let identity = SessionIdentity {
        user_id: 4,
        role: Role::Seeker,
        display_name: String::from("An"),
    };

    let value = serde_json::to_value(&identity).unwrap();

    assert_eq!(value["role"], json!("user"));
    let seeker: SessionIdentity = serde_json::from_value(
        json!({"user_id": 4, "role": "seeker", "display_name": "An"}),
    )
    .unwrap();
    assert_eq!(seeker, identity);
}
