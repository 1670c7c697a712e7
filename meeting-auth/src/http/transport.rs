//! Request transport: executes an [`HttpRequest`] and returns an [`HttpResponse`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use tracing::{debug, warn};
use url::Url;

use super::{HttpClientBuilder, HttpMethod, HttpRequest, HttpResponse};
use crate::error::{Error, ErrorKind, HttpErrorKind};

/// Trait for executing HTTP requests.
///
/// An `Err` means the request never produced a response (connection refused,
/// DNS failure, timeout, malformed request). Any response the server sends
/// back, whatever its status, is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an already configured client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport from the default [`HttpClientBuilder`] settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Ok(Self::new(HttpClientBuilder::new().build()?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let mut url = Url::parse(&request.url).map_err(|e| {
            warn!("Invalid request URL {}: {:?}", request.url, e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::Http(HttpErrorKind::RequestFailed),
            }
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        debug!("{} {}", request.method, url.path());

        let mut builder = self
            .client
            .request(reqwest_method(request.method), url)
            .headers(header_map(&request.headers)?);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("HTTP request failed: {:?}", e);
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body: Some(body),
        })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::Http(HttpErrorKind::InvalidHeader),
        })?;
        let mut header_value = HeaderValue::from_str(value).map_err(|e| {
            warn!("Failed to create header value for {}: {:?}", name, e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::Http(HttpErrorKind::InvalidHeader),
            }
        })?;
        if header_name == AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        map.append(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn request(method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![
                ("Authorization".to_string(), "Bearer token_abc".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            query: Vec::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_get_sends_query_and_headers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/users")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page_size".into(), "300".into()),
                Matcher::UrlEncoded("page_number".into(), "2".into()),
            ]))
            .match_header("authorization", "Bearer token_abc")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"users":[]}"#)
            .create_async()
            .await;

        let mut req = request(HttpMethod::Get, format!("{}/users", server.url()));
        req.query = vec![
            ("page_size".to_string(), "300".to_string()),
            ("page_number".to_string(), "2".to_string()),
        ];

        let transport = ReqwestTransport::with_defaults().unwrap();
        let response = transport.execute(req).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body.as_deref(), Some(r#"{"users":[]}"#));
    }

    #[tokio::test]
    async fn test_patch_sends_json_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/meetings/m1")
            .match_body(Matcher::Json(serde_json::json!({"topic": "X"})))
            .with_status(204)
            .create_async()
            .await;

        let mut req = request(HttpMethod::Patch, format!("{}/meetings/m1", server.url()));
        req.body = Some(r#"{"topic":"X"}"#.to_string());

        let transport = ReqwestTransport::with_defaults().unwrap();
        let response = transport.execute(req).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 204);
        assert_eq!(response.body.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/users/u1")
            .with_status(404)
            .with_body(r#"{"code":1001,"message":"User does not exist"}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::with_defaults().unwrap();
        let response = transport
            .execute(request(HttpMethod::Delete, format!("{}/users/u1", server.url())))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let transport = ReqwestTransport::with_defaults().unwrap();
        let result = transport
            .execute(request(HttpMethod::Get, "http://127.0.0.1:1/users".to_string()))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_error() {
        let transport = ReqwestTransport::with_defaults().unwrap();
        let err = transport
            .execute(request(HttpMethod::Get, "not a url".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::RequestFailed));
    }

    #[test]
    fn test_header_map_marks_authorization_sensitive() {
        let headers = vec![("Authorization".to_string(), "Bearer t".to_string())];
        let map = header_map(&headers).unwrap();
        assert!(map.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_header_map_rejects_invalid_value() {
        let headers = vec![("Authorization".to_string(), "Bearer \n".to_string())];
        let err = header_map(&headers).unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::InvalidHeader));
    }
}
