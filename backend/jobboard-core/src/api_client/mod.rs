//! HTTP client for the job board REST API.
//!
//! One [`JobBoardClient`] covers every resource; the endpoint groups live in
//! submodules (`jobs`, `applications`, `companies`, `catalog`, `profile`,
//! `auth`) as additional `impl` blocks.
//!
//! Every response goes through the same path: status check (401 clears the
//! session), body read, key normalization, envelope validation. Idempotent
//! reads retry transient failures with exponential backoff; mutations are
//! sent exactly once.

mod applications;
mod auth;
mod catalog;
mod companies;
mod jobs;
mod profile;

pub use applications::ApplyReceipt;
pub use auth::{Credentials, Registration};
pub use jobs::JobQuery;

use crate::config::ClientConfig;
use crate::envelope::{ListEnvelope, decode_item, decode_list};
use crate::error::ApiError;
use crate::field_normalizer::normalize_json;
use crate::session::SessionStore;

use common::HttpStatusCode;

use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, error, trace, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep as TokioSleep;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 2;
const RETRY_INITIAL_INTERVAL: Duration = Duration::from_millis(200);
const RETRY_MAX_INTERVAL: Duration = Duration::from_secs(2);
const ACCEPT_HEADER_KEY: &str = "accept";
const ACCEPT_JSON: &str = "application/json";

/// What a 401 means for a given request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unauthorized {
    /// The session cookie is no longer accepted.
    ExpireSession,
    /// Wrong credentials on login; reported like any other rejection.
    Reject,
}

#[derive(Clone)]
pub struct JobBoardClient {
    base_url: Url,
    client: Client,
    session: Option<SessionStore>,
    max_retries: u32,
}

impl JobBoardClient {
    pub fn new(base_url_str: &str) -> Result<Self, ApiError> {
        Self::build(base_url_str, DEFAULT_TIMEOUT_DURATION, DEFAULT_MAX_RETRIES)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::build(&config.api.base_url, config.timeout(), config.api.max_retries)
    }

    fn build(base_url_str: &str, timeout: Duration, max_retries: u32) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url_str)?;

        // `Url::join` replaces the last segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            base_url,
            client,
            session: None,
            max_retries,
        })
    }

    /// Attach the session store that a 401 response should clear.
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&SessionStore> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn prepare_request(&self, request: RequestBuilder) -> RequestBuilder {
        // Content type is left to `.json()` / `.multipart()` so the
        // multipart boundary is never overridden.
        request.header(ACCEPT_HEADER_KEY, ACCEPT_JSON)
    }

    // ============================================
    // READS (retried)
    // ============================================

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
        envelope: ListEnvelope,
    ) -> Result<Vec<T>, ApiError> {
        let (status, body) = self.get_with_retry(url).await?;
        decode_list(envelope, status, body)
    }

    pub(crate) async fn get_item<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let (status, body) = self.get_with_retry(url).await?;
        decode_item(status, body)
    }

    async fn get_with_retry(&self, url: Url) -> Result<(HttpStatusCode, Value), ApiError> {
        let mut backoff = ExponentialBackoff {
            initial_interval: RETRY_INITIAL_INTERVAL,
            max_interval: RETRY_MAX_INTERVAL,
            max_elapsed_time: None,
            ..Default::default()
        };
        let mut attempt: u32 = 0;

        loop {
            debug!("GET {url} (attempt {})", attempt + 1);
            let result = self.send(self.client.get(url.clone())).await;

            match result {
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff.next_backoff().unwrap_or(RETRY_MAX_INTERVAL);
                    warn!("GET {url} failed ({e}), retry {attempt} in {delay:?}");
                    TokioSleep(delay).await;
                }
                other => return other,
            }
        }
    }

    // ============================================
    // SEND + RESPONSE HANDLING
    // ============================================

    /// Send once and read the normalized JSON body.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<(HttpStatusCode, Value), ApiError> {
        self.dispatch(request, Unauthorized::ExpireSession).await
    }

    async fn dispatch(
        &self,
        request: RequestBuilder,
        on_unauthorized: Unauthorized,
    ) -> Result<(HttpStatusCode, Value), ApiError> {
        let response = self.prepare_request(request).send().await?;
        self.read_response(response, on_unauthorized).await
    }

    async fn read_response(
        &self,
        response: Response,
        on_unauthorized: Unauthorized,
    ) -> Result<(HttpStatusCode, Value), ApiError> {
        let status = HttpStatusCode::from(response.status().as_u16());
        let url = response.url().clone();
        let text = response.text().await?;

        if status.is_unauthorized() && on_unauthorized == Unauthorized::ExpireSession {
            warn!("{url} answered 401, clearing session");
            self.expire_session().await;
            return Err(ApiError::auth_expired());
        }

        if !status.is_success() {
            let err = ApiError::from_response(status, &text);
            debug!("{url} rejected: {err}");
            return Err(err);
        }

        trace!("{url} -> HTTP {status}, {} bytes", text.len());

        if text.trim().is_empty() {
            return Ok((status, Value::Null));
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            ApiError::rejected(status, format!("Malformed response: body is not JSON: {e}"))
        })?;

        Ok((status, normalize_json(body)))
    }

    async fn expire_session(&self) {
        if let Some(session) = &self.session {
            if let Err(e) = session.expire().await {
                error!("Failed to clear expired session: {e}");
            }
        }
    }
}
