//! Cloud recording lookups.

use chrono::{Datelike, NaiveDate, Utc};
use meeting_auth::http::HttpMethod;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::payload::{from_input, non_empty, path_segment};
use super::{ApiResponse, Operation, ZoomClient};
use crate::error::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filters for listing a host's recordings.
///
/// `from` and `to` are `YYYY-MM-DD` dates; missing or empty values default to
/// the year ending today. Any other field is sent along unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRecordingsRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListRecordingsRequest {
    /// Build the request from a loosely typed input mapping.
    pub fn from_value(input: Value) -> Result<Self, Error> {
        from_input(input)
    }
}

impl ZoomClient {
    pub async fn recordings_by_meeting(&self, meeting_id: &str) -> Result<ApiResponse, Error> {
        let path = format!(
            "meetings/{}/recordings",
            path_segment("meeting_id", meeting_id)?
        );
        self.send(Operation::RecordingsByMeeting, path, HttpMethod::Get, Value::Null)
            .await
    }

    /// List recordings of `host_id`, with the default window ending today (UTC).
    pub async fn list_recordings(
        &self,
        host_id: &str,
        request: &ListRecordingsRequest,
    ) -> Result<ApiResponse, Error> {
        self.list_recordings_on(host_id, request, Utc::now().date_naive())
            .await
    }

    /// [`ZoomClient::list_recordings`] with the default window ending on `today`.
    pub async fn list_recordings_on(
        &self,
        host_id: &str,
        request: &ListRecordingsRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse, Error> {
        let path = format!("users/{}/recordings", path_segment("host_id", host_id)?);
        let (from, to) = recording_window(request, today);

        let mut payload = request.extra.clone();
        payload.insert("from".to_string(), Value::String(from));
        payload.insert("to".to_string(), Value::String(to));

        self.send(
            Operation::ListRecordings,
            path,
            HttpMethod::Get,
            Value::Object(payload),
        )
        .await
    }
}

fn recording_window(request: &ListRecordingsRequest, today: NaiveDate) -> (String, String) {
    let default_from = one_year_before(today);

    let from = non_empty(request.from.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| default_from.format(DATE_FORMAT).to_string());
    let to = non_empty(request.to.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| today.format(DATE_FORMAT).to_string());

    (from, to)
}

/// Same calendar day one year earlier. A leap day rolls forward to 1 March.
fn one_year_before(today: NaiveDate) -> NaiveDate {
    let year = today.year() - 1;
    today
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(today)
}
