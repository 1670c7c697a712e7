//! Webinar and webinar registrant operations.

use meeting_auth::http::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::payload::{from_input, path_segment, DEFAULT_PAGE_SIZE};
use super::{ApiResponse, Operation, ZoomClient};
use crate::error::Error;

/// A person registering for a webinar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebinarRegistrant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl WebinarRegistrant {
    /// Build the request from a loosely typed input mapping.
    pub fn from_value(input: Value) -> Result<Self, Error> {
        from_input(input)
    }
}

impl ZoomClient {
    pub async fn register_webinar_participant(
        &self,
        webinar_id: &str,
        registrant: &WebinarRegistrant,
    ) -> Result<ApiResponse, Error> {
        let path = format!(
            "webinars/{}/registrants",
            path_segment("webinar_id", webinar_id)?
        );
        let payload = serde_json::to_value(registrant)?;
        self.send(
            Operation::RegisterWebinarParticipant,
            path,
            HttpMethod::Post,
            payload,
        )
        .await
    }

    pub async fn list_webinars(&self, user_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("users/{}/webinars", path_segment("user_id", user_id)?);
        self.send(
            Operation::ListWebinars,
            path,
            HttpMethod::Get,
            json!({ "page_size": DEFAULT_PAGE_SIZE }),
        )
        .await
    }

    /// Create a webinar for `user_id`. `payload` is sent as given.
    pub async fn create_webinar(&self, user_id: &str, payload: Value) -> Result<ApiResponse, Error> {
        let path = format!("users/{}/webinars", path_segment("user_id", user_id)?);
        self.send(Operation::CreateWebinar, path, HttpMethod::Post, payload)
            .await
    }

    /// Update a webinar. `payload` is sent as given.
    pub async fn update_webinar(
        &self,
        webinar_id: &str,
        payload: Value,
    ) -> Result<ApiResponse, Error> {
        let path = format!("webinars/{}", path_segment("webinar_id", webinar_id)?);
        self.send(Operation::UpdateWebinar, path, HttpMethod::Patch, payload)
            .await
    }

    pub async fn get_webinar_info(&self, webinar_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("webinars/{}", path_segment("webinar_id", webinar_id)?);
        self.send(Operation::GetWebinarInfo, path, HttpMethod::Get, Value::Null)
            .await
    }

    pub async fn list_webinar_registrants(&self, webinar_id: &str) -> Result<ApiResponse, Error> {
        let path = format!(
            "webinars/{}/registrants",
            path_segment("webinar_id", webinar_id)?
        );
        self.send(
            Operation::ListWebinarRegistrants,
            path,
            HttpMethod::Get,
            json!({ "page_size": DEFAULT_PAGE_SIZE }),
        )
        .await
    }

    pub async fn delete_webinar(&self, webinar_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("webinars/{}", path_segment("webinar_id", webinar_id)?);
        self.send(Operation::DeleteWebinar, path, HttpMethod::Delete, Value::Null)
            .await
    }
}
