//! Test double for the transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meeting_auth::credentials::Credentials;
use meeting_auth::error::{http_error, Error, HttpErrorKind};
use meeting_auth::http::{HttpRequest, HttpResponse, Transport};
use secrecy::SecretString;

use super::ZoomClient;

/// Records every request and answers each with the same canned outcome.
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    response: Option<HttpResponse>,
}

impl RecordingTransport {
    pub(crate) fn responding(status: u16, body: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Some(HttpResponse {
                status,
                headers: Vec::new(),
                body: Some(body.to_string()),
            }),
        }
    }

    pub(crate) fn without_body(status: u16) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Some(HttpResponse {
                status,
                headers: Vec::new(),
                body: None,
            }),
        }
    }

    /// Every request fails as if the connection was refused.
    pub(crate) fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: None,
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// The last request's JSON body, decoded.
    pub(crate) fn last_body(&self) -> serde_json::Value {
        let request = self.last_request();
        serde_json::from_str(request.body.as_deref().expect("request has no body")).unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        self.requests.lock().unwrap().push(request);
        self.response
            .clone()
            .ok_or_else(|| http_error(HttpErrorKind::Network, "connection refused"))
    }
}

/// A client with test credentials backed by `transport`.
pub(crate) fn recording_client(
    transport: RecordingTransport,
) -> (ZoomClient, Arc<RecordingTransport>) {
    let transport = Arc::new(transport);
    let client = ZoomClient::new(
        Credentials::new("test_key", SecretString::new("test_secret".to_string())),
        transport.clone(),
    );
    (client, transport)
}
