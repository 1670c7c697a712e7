//! Normalization of transport results into [`ApiResponse`].

use meeting_auth::http::HttpResponse;
use serde_json::Value;

/// Status codes the API uses for "succeeded, nothing to return".
const NO_CONTENT_CODES: [u16; 2] = [203, 204];

/// Outcome of a dispatched request.
///
/// HTTP-level failures never surface as `Err`; they land in `Failure` so the
/// caller can always tell a failed call from a no-content success.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The decoded response body.
    Success(Value),
    /// The request succeeded and the API returned no usable body.
    EmptyOk,
    /// The request did not produce a usable response.
    Failure(FailureReason),
}

/// Why a request produced [`ApiResponse::Failure`].
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The transport could not complete the request.
    Transport(String),
    /// The transport returned a response without a body.
    EmptyBody,
    /// A payload hook emptied the payload, so the request was never sent.
    Cancelled,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        !self.is_failure()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ApiResponse::Failure(_))
    }

    /// The decoded body, if the API returned one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiResponse::Success(body) => Some(body),
            _ => None,
        }
    }

    pub fn into_body(self) -> Option<Value> {
        match self {
            ApiResponse::Success(body) => Some(body),
            _ => None,
        }
    }

    /// Collapse into the loose `true` / body / `false` convention.
    ///
    /// A body that is itself `false` can not be told apart from a failure in
    /// this form; match on the enum when that matters.
    pub fn to_legacy_value(&self) -> Value {
        match self {
            ApiResponse::Success(body) => body.clone(),
            ApiResponse::EmptyOk => Value::Bool(true),
            ApiResponse::Failure(_) => Value::Bool(false),
        }
    }
}

/// Normalize a transport result.
///
/// In order: a missing body is a failure; a 203/204 transport status is a
/// no-content success; a body whose `response.code` is 203/204 is a no-content
/// success; anything else is returned as the decoded body.
pub(crate) fn normalize(response: HttpResponse) -> ApiResponse {
    let Some(raw) = response.body else {
        return ApiResponse::Failure(FailureReason::EmptyBody);
    };

    if NO_CONTENT_CODES.contains(&response.status) {
        return ApiResponse::EmptyOk;
    }

    let body = decode_body(raw);
    if embedded_no_content(&body) {
        return ApiResponse::EmptyOk;
    }

    ApiResponse::Success(body)
}

/// JSON bodies are decoded; anything else is kept as a JSON string.
fn decode_body(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

fn embedded_no_content(body: &Value) -> bool {
    body.get("response")
        .and_then(|response| response.get("code"))
        .and_then(Value::as_u64)
        .is_some_and(|code| NO_CONTENT_CODES.iter().any(|c| u64::from(*c) == code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Option<&str>) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_body_is_failure() {
        assert_eq!(
            normalize(response(200, None)),
            ApiResponse::Failure(FailureReason::EmptyBody)
        );
    }

    #[test]
    fn test_missing_body_wins_over_no_content_status() {
        assert_eq!(
            normalize(response(204, None)),
            ApiResponse::Failure(FailureReason::EmptyBody)
        );
    }

    #[test]
    fn test_204_with_any_body_is_empty_ok() {
        assert_eq!(normalize(response(204, Some(""))), ApiResponse::EmptyOk);
        assert_eq!(
            normalize(response(204, Some(r#"{"id":1}"#))),
            ApiResponse::EmptyOk
        );
    }

    #[test]
    fn test_203_is_empty_ok() {
        assert_eq!(normalize(response(203, Some("ignored"))), ApiResponse::EmptyOk);
    }

    #[test]
    fn test_embedded_response_code_is_empty_ok() {
        assert_eq!(
            normalize(response(200, Some(r#"{"response":{"code":203}}"#))),
            ApiResponse::EmptyOk
        );
        assert_eq!(
            normalize(response(200, Some(r#"{"response":{"code":204}}"#))),
            ApiResponse::EmptyOk
        );
    }

    #[test]
    fn test_embedded_code_must_be_an_integer() {
        let normalized = normalize(response(200, Some(r#"{"response":{"code":"204"}}"#)));
        assert_eq!(
            normalized,
            ApiResponse::Success(json!({"response": {"code": "204"}}))
        );
    }

    #[test]
    fn test_other_embedded_code_is_returned_as_body() {
        let normalized = normalize(response(200, Some(r#"{"response":{"code":200}}"#)));
        assert_eq!(
            normalized,
            ApiResponse::Success(json!({"response": {"code": 200}}))
        );
    }

    #[test]
    fn test_json_body_is_decoded() {
        let normalized = normalize(response(200, Some(r#"{"users":[{"id":"u1"}]}"#)));
        assert_eq!(normalized.body(), Some(&json!({"users": [{"id": "u1"}]})));
    }

    #[test]
    fn test_error_status_body_is_returned_unchanged() {
        let normalized = normalize(response(
            404,
            Some(r#"{"code":3001,"message":"Meeting does not exist"}"#),
        ));
        assert_eq!(
            normalized,
            ApiResponse::Success(json!({"code": 3001, "message": "Meeting does not exist"}))
        );
    }

    #[test]
    fn test_array_body_is_decoded() {
        let normalized = normalize(response(200, Some("[1,2]")));
        assert_eq!(normalized, ApiResponse::Success(json!([1, 2])));
    }

    #[test]
    fn test_non_json_body_is_kept_as_string() {
        let normalized = normalize(response(502, Some("Bad Gateway")));
        assert_eq!(normalized, ApiResponse::Success(json!("Bad Gateway")));
    }

    #[test]
    fn test_legacy_value() {
        assert_eq!(ApiResponse::EmptyOk.to_legacy_value(), json!(true));
        assert_eq!(
            ApiResponse::Failure(FailureReason::EmptyBody).to_legacy_value(),
            json!(false)
        );
        assert_eq!(
            ApiResponse::Success(json!({"id": 7})).to_legacy_value(),
            json!({"id": 7})
        );
    }

    #[test]
    fn test_success_predicates() {
        assert!(ApiResponse::EmptyOk.is_success());
        assert!(ApiResponse::Success(json!({})).is_success());
        assert!(ApiResponse::Failure(FailureReason::Cancelled).is_failure());
        assert_eq!(ApiResponse::EmptyOk.body(), None);
    }
}
