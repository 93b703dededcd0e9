use super::{JobBoardClient, Unauthorized};
use crate::error::ApiError;

use common::RedactedSecret;
use models::{Role, SessionIdentity, UserId};

use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

const LOGIN_ENDPOINT: &str = "user/login";
const REGISTER_ENDPOINT: &str = "user/register";
const MIN_PASSWORD_LEN: usize = 6;

/// Something, an `@`, something, a dot, something; no whitespace anywhere.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid regex pattern"))
}

/// Username (the account e-mail) and password for `POST user/login`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: RedactedSecret,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: RedactedSecret::new(password),
        }
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::validation(
                "Please enter both email and password.",
            ));
        }
        Ok(())
    }
}

/// Sign-up form for `POST user/register`.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: RedactedSecret,
    pub role: Role,
}

impl Registration {
    #[track_caller]
    fn validate(&self) -> Result<(), ApiError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ApiError::validation("Email is required."));
        }
        if !email_regex().is_match(email) {
            return Err(ApiError::validation("Invalid email format."));
        }
        if self.password.is_empty() {
            return Err(ApiError::validation("Password is required."));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default, alias = "id")]
    user_id: Option<UserId>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default, alias = "username")]
    name: Option<String>,
}

impl JobBoardClient {
    /// Authenticate and record the identity in the attached session store.
    ///
    /// The server sets the session cookie; the client keeps only the
    /// returned user id, role and display name.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionIdentity, ApiError> {
        credentials.validate()?;

        let url = self.endpoint(LOGIN_ENDPOINT)?;
        let body = json!({
            "username": credentials.username.trim(),
            "password": credentials.password.expose(),
        });

        let (status, value) = self
            .dispatch(self.client.post(url).json(&body), Unauthorized::Reject)
            .await?;
        let response: LoginResponse = crate::envelope::decode_item(status, value)?;

        let user_id = response
            .user_id
            .ok_or_else(|| ApiError::rejected(status, "Login failed."))?;

        let identity = SessionIdentity {
            user_id,
            role: Role::from_login(response.role.as_deref()),
            display_name: response
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| credentials.username.trim().to_string()),
        };

        match &self.session {
            Some(session) => session.sign_in(identity.clone()).await.map_err(|e| {
                ApiError::validation(format!("Signed in but session could not be stored: {e}"))
            })?,
            None => warn!("Login succeeded without an attached session store"),
        }

        info!("Logged in as user {} ({})", identity.user_id, identity.role);
        Ok(identity)
    }

    /// Forget the local identity. The backend has no logout endpoint; the
    /// cookie simply stops being sent once this client is dropped.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if let Some(session) = &self.session {
            session
                .sign_out()
                .await
                .map_err(|e| ApiError::validation(format!("Could not clear session: {e}")))?;
        }
        Ok(())
    }

    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        registration.validate()?;

        let url = self.endpoint(REGISTER_ENDPOINT)?;
        let email = registration.email.trim();
        let body = json!({
            "full_name": registration.full_name.trim(),
            "email": email,
            "username": email,
            "phone": registration.phone.trim(),
            "password": registration.password.expose(),
            "role": registration.role.as_str(),
        });

        self.send(self.client.post(url).json(&body)).await?;
        info!("Registered account {email}");
        Ok(())
    }
}

