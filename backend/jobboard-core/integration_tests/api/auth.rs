use crate::helpers::{client_for, signed_in_client, start_backend};

use common::RedactedSecret;
use jobboard_core::api_client::{Credentials, Registration};
use jobboard_core::{ApiError, SessionEvent};
use models::Role;

use serde_json::json;
use tokio::sync::broadcast::error::TryRecvError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: Login records exactly the identity the server returned.
///
/// **WHY THIS MATTERS**: Role drives which screens are reachable; a seeker
/// mis-read as an employer would see the job management board.
#[tokio::test]
async fn given_valid_credentials_when_login_then_session_signed_in_with_role() {
    // GIVEN: A backend that accepts the credentials
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .and(body_json(json!({ "username": "ann@acme.io", "password": "hunter22" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "user_id": 11, "role": "employer" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, session) = client_for(&server);
    let mut events = session.subscribe();

    // WHEN: Logging in (username is trimmed)
    let identity = client
        .login(&Credentials::new("  ann@acme.io ", "hunter22"))
        .await
        .expect("Login should succeed");

    // THEN: Identity is stored and broadcast
    assert_eq!(identity.user_id, 11);
    assert_eq!(identity.role, Role::Employer);
    assert_eq!(identity.display_name, "ann@acme.io");
    assert_eq!(session.current().await, Some(identity.clone()));
    assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedIn(identity));
}

#[tokio::test]
async fn given_wrong_password_when_login_then_rejected_and_no_expiry_event() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;
    let (client, session) = client_for(&server);
    let mut events = session.subscribe();

    let error = client
        .login(&Credentials::new("ann@acme.io", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Rejected { .. }), "got {error:?}");
    assert_eq!(error.user_message(), "Invalid credentials");
    assert!(!session.is_signed_in().await);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn given_empty_password_when_login_then_validation_without_request() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _session) = client_for(&server);

    let error = client
        .login(&Credentials::new("ann@acme.io", ""))
        .await
        .unwrap_err();

    assert_eq!(error.user_message(), "Please enter both email and password.");
}

#[tokio::test]
async fn given_success_without_user_id_when_login_then_rejected() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;
    let (client, session) = client_for(&server);

    let error = client
        .login(&Credentials::new("ann@acme.io", "hunter22"))
        .await
        .unwrap_err();

    assert_eq!(error.user_message(), "Login failed.");
    assert!(!session.is_signed_in().await);
}

/// **VALUE**: Any 401 outside login ends the session and tells subscribers.
///
/// **BUG THIS CATCHES**: Views showing "Session expired" while the stored
/// identity still claims the user is signed in.
#[tokio::test]
async fn given_signed_in_when_request_answers_401_then_auth_expired_and_session_cleared() {
    // GIVEN: A signed in seeker whose cookie the server no longer accepts
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/skills/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    let (client, session) = signed_in_client(&server, Role::Seeker).await;
    let mut events = session.subscribe();

    // WHEN: Loading skills
    let error = client.my_skills().await.unwrap_err();

    // THEN: AuthExpired, not retried, session gone
    assert!(error.is_auth_expired());
    assert_eq!(error.user_message(), "Session expired, please login again");
    assert!(!session.is_signed_in().await);
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn given_signed_in_when_logout_then_session_cleared() {
    let server = start_backend().await;
    let (client, session) = signed_in_client(&server, Role::Seeker).await;

    client.logout().await.unwrap();

    assert!(!session.is_signed_in().await);
}

fn registration(email: &str, password: &str) -> Registration {
    Registration {
        full_name: String::from("Ann Lee"),
        email: email.to_string(),
        phone: String::from("0900000000"),
        password: RedactedSecret::new(password),
        role: Role::Seeker,
    }
}

#[tokio::test]
async fn given_registration_when_valid_then_email_doubles_as_username() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/user/register"))
        .and(body_json(json!({
            "full_name": "Ann Lee",
            "email": "ann@acme.io",
            "username": "ann@acme.io",
            "phone": "0900000000",
            "password": "hunter22",
            "role": "user",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _session) = client_for(&server);

    client
        .register(&registration(" ann@acme.io ", "hunter22"))
        .await
        .expect("Register should succeed");
}

#[tokio::test]
async fn given_bad_registration_when_submitting_then_field_messages() {
    let server = start_backend().await;
    let (client, _session) = client_for(&server);

    let cases = [
        ("", "hunter22", "Email is required."),
        ("ann@acme", "hunter22", "Invalid email format."),
        ("ann smith@acme.io", "hunter22", "Invalid email format."),
        ("@acme.io", "hunter22", "Invalid email format."),
        ("ann@acme.", "hunter22", "Invalid email format."),
        ("ann@@acme.io", "hunter22", "Invalid email format."),
        ("ann@acme.io", "", "Password is required."),
        ("ann@acme.io", "12345", "Password must be at least 6 characters."),
    ];

    for (email, password, expected) in cases {
        let error = client
            .register(&registration(email, password))
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), expected, "email={email:?}");
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}
