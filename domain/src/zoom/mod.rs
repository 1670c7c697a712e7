//! Zoom REST API (v2) client.
//!
//! `ZoomClient` holds the account credentials and exposes one method per
//! domain operation. Every operation assembles its payload, passes it through
//! the [`HookRegistry`] exactly once and hands it to the dispatcher, which:
//!
//! 1. signs a fresh access token from the current credentials,
//! 2. builds the request (`GET` payloads become query parameters, every other
//!    method sends a non-empty payload as a JSON body),
//! 3. executes it through the [`Transport`] and normalizes the outcome into an
//!    [`ApiResponse`].
//!
//! The client performs no retries, pagination or caching.

use std::sync::Arc;
use std::time::Duration;

use log::*;
use meeting_auth::credentials::{CredentialStore, Credentials};
use meeting_auth::error::{credential_error, CredentialErrorKind, Error as MeetingAuthError};
use meeting_auth::http::{HttpClientBuilder, HttpMethod, HttpRequest, ReqwestTransport, Transport};
use meeting_auth::jwt;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::Error;

pub use hooks::{HookRegistry, Operation, PayloadHook};
pub use meetings::{CreateMeetingRequest, UpdateMeetingRequest};
pub use recordings::ListRecordingsRequest;
pub use response::{ApiResponse, FailureReason};
pub use users::CreateUserRequest;
pub use webinars::WebinarRegistrant;

mod hooks;
mod meetings;
mod payload;
mod recordings;
mod reports;
mod response;
mod users;
mod webinars;

#[cfg(test)]
mod test_support;

/// Base URL of the Zoom REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.zoom.us/v2/";

/// Build the HTTPS transport used to reach the API, with `timeout` per request.
pub fn http_transport(timeout: Duration) -> Result<Arc<dyn Transport>, Error> {
    let client = HttpClientBuilder::new()
        .with_timeout(timeout)
        .build()
        .map_err(|e| {
            warn!("Failed to build HTTP client: {:?}", e);
            MeetingAuthError::from(e)
        })?;
    Ok(Arc::new(ReqwestTransport::new(client)))
}

/// Client for the Zoom REST API.
///
/// Construct one client per credential set and share it by reference or
/// `Arc`. Credentials sit behind an async `RwLock`, so
/// [`ZoomClient::set_credentials`] may be called while requests are in flight;
/// a request signs with whichever credentials it reads first.
pub struct ZoomClient {
    base_url: String,
    credentials: RwLock<Credentials>,
    transport: Arc<dyn Transport>,
    hooks: HookRegistry,
}

impl ZoomClient {
    /// Create a client for the public API base URL.
    pub fn new(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: normalize_base_url(DEFAULT_BASE_URL),
            credentials: RwLock::new(credentials),
            transport,
            hooks: HookRegistry::new(),
        }
    }

    /// Create a client from the credentials currently held by `store`.
    pub async fn from_store(
        store: &dyn CredentialStore,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, Error> {
        let credentials = store.load().await?.ok_or_else(|| {
            warn!("No API credentials configured");
            credential_error(CredentialErrorKind::NotFound, "no API credentials configured")
        })?;
        Ok(Self::new(credentials, transport))
    }

    /// Point the client at a different base URL (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Replace the payload hooks.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API key of the credentials currently in use.
    pub async fn api_key(&self) -> String {
        self.credentials.read().await.key().to_string()
    }

    /// Replace the credentials used to sign subsequent requests.
    pub async fn set_credentials(&self, credentials: Credentials) {
        info!("Replacing API credentials (key {})", credentials.key());
        *self.credentials.write().await = credentials;
    }

    /// Send `payload` to `path` with `method` and normalize the response.
    ///
    /// Returns `Err` only when no request could be built (signing or payload
    /// encoding failed). Transport failures and missing bodies come back as
    /// [`ApiResponse::Failure`].
    pub async fn dispatch(
        &self,
        path: &str,
        method: HttpMethod,
        payload: Value,
    ) -> Result<ApiResponse, Error> {
        let token = {
            let credentials = self.credentials.read().await;
            jwt::sign(&credentials).map_err(|e| {
                warn!("Failed to sign access token: {:?}", e);
                Error::from(e)
            })?
        };

        let request = self.build_request(&token, path, method, &payload)?;
        debug!("Dispatching {} {}", method, path);

        match self.transport.execute(request).await {
            Ok(response) => {
                let normalized = response::normalize(response);
                if let ApiResponse::Failure(reason) = &normalized {
                    warn!("{} {} returned no usable response: {:?}", method, path, reason);
                }
                Ok(normalized)
            }
            Err(e) => {
                warn!("Transport failure for {} {}: {}", method, path, e);
                Ok(ApiResponse::Failure(FailureReason::Transport(e.to_string())))
            }
        }
    }

    /// [`ZoomClient::dispatch`] with the method given by name.
    ///
    /// Only the exact upper-case names `GET`, `PUT`, `PATCH` and `DELETE` select
    /// those methods; any other string, recognized or not, is sent as `POST`.
    pub async fn dispatch_verb(
        &self,
        path: &str,
        verb: &str,
        payload: Value,
    ) -> Result<ApiResponse, Error> {
        let method = HttpMethod::parse(verb).unwrap_or_else(|| {
            warn!("Unrecognized HTTP method {:?}; sending as POST", verb);
            HttpMethod::Post
        });
        self.dispatch(path, method, payload).await
    }

    /// Run the hooks for `operation` over `payload`, then dispatch.
    async fn send(
        &self,
        operation: Operation,
        path: String,
        method: HttpMethod,
        payload: Value,
    ) -> Result<ApiResponse, Error> {
        let payload = self.hooks.apply(operation, payload);
        trace!("Applied {} hook(s) for {}", self.hooks.len(), operation);
        self.dispatch(&path, method, payload).await
    }

    fn build_request(
        &self,
        token: &str,
        path: &str,
        method: HttpMethod,
        payload: &Value,
    ) -> Result<HttpRequest, Error> {
        let headers = vec![
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];

        let (query, body) = match method {
            HttpMethod::Get => (payload::query_pairs(payload), None),
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete => {
                let body = if payload::is_empty_payload(payload) {
                    None
                } else {
                    Some(serde_json::to_string(payload)?)
                };
                (Vec::new(), body)
            }
        };

        Ok(HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            query,
            body,
        })
    }
}

fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}
