//! Shared fixtures: a mock backend under `/api/` and JSON builders.

use jobboard_core::{JobBoardClient, SessionStore};
use models::{Role, SessionIdentity};

use std::net::TcpListener;

use serde_json::{Value, json};
use wiremock::MockServer;

pub async fn start_backend() -> MockServer {
    MockServer::start().await
}

pub fn api_url(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

/// API URL on a local port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a free port");
    let port = listener
        .local_addr()
        .expect("Failed to read the bound address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/")
}

/// Client with an in-memory session store attached.
pub fn client_for(server: &MockServer) -> (JobBoardClient, SessionStore) {
    let session = SessionStore::new();
    let client = JobBoardClient::new(&api_url(server))
        .expect("Failed to build client")
        .with_session(session.clone());
    (client, session)
}

/// Client whose session is already signed in as `role`.
pub async fn signed_in_client(server: &MockServer, role: Role) -> (JobBoardClient, SessionStore) {
    let (client, session) = client_for(server);
    session
        .sign_in(SessionIdentity {
            user_id: 11,
            role,
            display_name: String::from("Test User"),
        })
        .await
        .expect("Failed to sign in");
    (client, session)
}

pub fn job_json(id: u64, title: &str, status: &str) -> Value {
    json!({
        "jobId": id,
        "title": title,
        "location": "Ha Noi",
        "status": status,
        "companyRef": { "id": 3, "name": "Acme" },
    })
}

pub fn jobs_body(ids: &[u64]) -> Value {
    let jobs: Vec<Value> = ids
        .iter()
        .map(|id| job_json(*id, &format!("Job {id}"), "open"))
        .collect();
    json!({ "jobs": jobs })
}
