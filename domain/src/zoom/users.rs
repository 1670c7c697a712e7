//! User management operations.

use meeting_auth::http::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::payload::{from_input, loose_i64, nullable_string, path_segment, DEFAULT_PAGE_SIZE};
use super::{ApiResponse, Operation, ZoomClient};
use crate::error::Error;

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// How the account is created: `create`, `autoCreate`, `custCreate` or `ssoCreate`.
    pub action: String,
    pub email: String,
    /// License type: 1 basic, 2 licensed, 3 on-prem. Left out when unset.
    #[serde(default, rename = "type", deserialize_with = "loose_i64")]
    pub user_type: Option<i64>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub last_name: String,
}

impl CreateUserRequest {
    /// Build the request from a loosely typed input mapping.
    pub fn from_value(input: Value) -> Result<Self, Error> {
        from_input(input)
    }
}

#[derive(Debug, Serialize)]
struct CreateUserPayload<'a> {
    action: &'a str,
    user_info: UserInfo<'a>,
}

#[derive(Debug, Serialize)]
struct UserInfo<'a> {
    email: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    user_type: Option<i64>,
    first_name: &'a str,
    last_name: &'a str,
}

#[derive(Debug, Serialize)]
struct ListUsersPayload {
    page_size: u32,
    page_number: u64,
}

impl ZoomClient {
    /// Create a user on the account.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<ApiResponse, Error> {
        let payload = serde_json::to_value(CreateUserPayload {
            action: &request.action,
            user_info: UserInfo {
                email: &request.email,
                user_type: request.user_type,
                first_name: &request.first_name,
                last_name: &request.last_name,
            },
        })?;

        self.send(Operation::CreateUser, "users".to_string(), HttpMethod::Post, payload)
            .await
    }

    /// List one page of users. Negative page numbers are taken by magnitude;
    /// `filters` (e.g. `status`, `role_id`) are merged over the defaults.
    pub async fn list_users(
        &self,
        page: i64,
        filters: Map<String, Value>,
    ) -> Result<ApiResponse, Error> {
        let mut payload = serde_json::to_value(ListUsersPayload {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: page.unsigned_abs(),
        })?;
        if let Value::Object(map) = &mut payload {
            map.extend(filters);
        }

        self.send(Operation::ListUsers, "users".to_string(), HttpMethod::Get, payload)
            .await
    }

    pub async fn get_user_info(&self, user_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("users/{}", path_segment("user_id", user_id)?);
        self.send(Operation::GetUserInfo, path, HttpMethod::Get, Value::Null)
            .await
    }

    /// Delete a user. Sent without a body.
    pub async fn delete_user(&self, user_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("users/{}", path_segment("user_id", user_id)?);
        self.send(Operation::DeleteUser, path, HttpMethod::Delete, Value::Null)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{recording_client, RecordingTransport};
    use super::super::HookRegistry;
    use super::*;
    use serde_json::json;

    fn create_user_request() -> CreateUserRequest {
        serde_json::from_value(json!({
            "action": "create",
            "email": "jane@example.com",
            "type": 1,
            "first_name": "Jane",
            "last_name": "Doe",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_user_nests_user_info() {
        let (client, transport) =
            recording_client(RecordingTransport::responding(201, r#"{"id":"u1"}"#));

        let response = client.create_user(&create_user_request()).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.zoom.us/v2/users");
        assert_eq!(
            transport.last_body(),
            json!({
                "action": "create",
                "user_info": {
                    "email": "jane@example.com",
                    "type": 1,
                    "first_name": "Jane",
                    "last_name": "Doe",
                }
            })
        );
        assert_eq!(response.body(), Some(&json!({"id": "u1"})));
    }

    #[tokio::test]
    async fn test_create_user_accepts_form_values() {
        let (client, transport) = recording_client(RecordingTransport::responding(201, "{}"));
        let request = CreateUserRequest::from_value(json!({
            "action": "autoCreate",
            "email": "jane@example.com",
            "type": "2",
            "first_name": null,
            "last_name": "Doe",
        }))
        .unwrap();

        client.create_user(&request).await.unwrap();

        assert_eq!(
            transport.last_body()["user_info"],
            json!({
                "email": "jane@example.com",
                "type": 2,
                "first_name": "",
                "last_name": "Doe",
            })
        );
    }

    #[tokio::test]
    async fn test_create_user_without_type_omits_it() {
        let (client, transport) = recording_client(RecordingTransport::responding(201, "{}"));
        let request = CreateUserRequest::from_value(json!({
            "action": "create",
            "email": "jane@example.com",
            "type": "",
        }))
        .unwrap();

        client.create_user(&request).await.unwrap();

        let user_info = &transport.last_body()["user_info"];
        assert!(user_info.get("type").is_none());
        assert_eq!(user_info["first_name"], "");
    }

    #[test]
    fn test_create_user_rejects_non_numeric_type() {
        let err = CreateUserRequest::from_value(json!({
            "action": "create",
            "email": "jane@example.com",
            "type": "basic",
        }))
        .unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_list_users_defaults() {
        let (client, transport) = recording_client(RecordingTransport::responding(200, "{}"));

        client.list_users(2, Map::new()).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://api.zoom.us/v2/users");
        assert!(request.body.is_none());

        let mut query = request.query;
        query.sort();
        assert_eq!(
            query,
            vec![
                ("page_number".to_string(), "2".to_string()),
                ("page_size".to_string(), "300".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_users_coerces_negative_page() {
        let (client, transport) = recording_client(RecordingTransport::responding(200, "{}"));

        client.list_users(-3, Map::new()).await.unwrap();

        assert!(transport
            .last_request()
            .query
            .contains(&("page_number".to_string(), "3".to_string())));
    }

    #[tokio::test]
    async fn test_list_users_merges_filters_over_defaults() {
        let (client, transport) = recording_client(RecordingTransport::responding(200, "{}"));
        let filters = json!({"status": "pending", "page_size": 30});

        client
            .list_users(1, filters.as_object().cloned().unwrap())
            .await
            .unwrap();

        let query = transport.last_request().query;
        assert!(query.contains(&("status".to_string(), "pending".to_string())));
        assert!(query.contains(&("page_size".to_string(), "30".to_string())));
        assert!(query.contains(&("page_number".to_string(), "1".to_string())));
    }

    #[tokio::test]
    async fn test_list_users_hook_sees_merged_payload() {
        let (client, transport) = recording_client(RecordingTransport::responding(200, "{}"));
        let client = client.with_hooks(HookRegistry::new().with_hook(
            |operation: Operation, mut payload: Value| {
                assert_eq!(operation, Operation::ListUsers);
                assert_eq!(payload["status"], "active");
                payload["page_size"] = json!(10);
                payload
            },
        ));

        client
            .list_users(1, json!({"status": "active"}).as_object().cloned().unwrap())
            .await
            .unwrap();

        assert!(transport
            .last_request()
            .query
            .contains(&("page_size".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn test_get_user_info_path() {
        let (client, transport) = recording_client(RecordingTransport::responding(200, "{}"));

        client.get_user_info("jane@example.com").await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.url, "https://api.zoom.us/v2/users/jane%40example.com");
        assert!(request.query.is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_sends_no_body() {
        let (client, transport) = recording_client(RecordingTransport::responding(204, ""));

        let response = client.delete_user("u1").await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "https://api.zoom.us/v2/users/u1");
        assert!(request.body.is_none());
        assert_eq!(response, ApiResponse::EmptyOk);
    }

    #[tokio::test]
    async fn test_empty_user_id_is_rejected_before_sending() {
        let (client, transport) = recording_client(RecordingTransport::responding(200, "{}"));

        let err = client.delete_user("").await.unwrap_err();

        assert!(err.is_validation());
        assert!(transport.requests().is_empty());
    }
}
