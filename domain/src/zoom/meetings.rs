//! Meeting lifecycle operations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::*;
use meeting_auth::http::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::payload::{
    from_input, is_empty_payload, loose_i64, loose_string, non_empty, non_zero,
    nullable_string, path_segment, string_list, truthy, DEFAULT_PAGE_SIZE,
};
use super::{ApiResponse, FailureReason, Operation, ZoomClient};
use crate::error::{Error, ValidationErrorKind};

/// Meeting type for a meeting scheduled at a fixed time.
const SCHEDULED_MEETING: i64 = 2;
const DEFAULT_DURATION_MINUTES: i64 = 60;
const UPDATED_DURATION_MINUTES: i64 = 45;
const NO_AUTO_RECORDING: &str = "none";

/// Layout of `start_time` sent when creating a meeting (UTC, no offset).
const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date-times carrying a numeric offset after a space.
const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S %:z", "%Y-%m-%d %H:%M:%S %z"];

const NAIVE_DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Input for scheduling a meeting.
///
/// Field names follow the form mapping the request is usually built from; use
/// [`CreateMeetingRequest::from_value`] to convert such a mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMeetingRequest {
    /// Host the meeting is created for.
    #[serde(rename = "userId", deserialize_with = "loose_string")]
    pub user_id: String,
    #[serde(rename = "meetingTopic")]
    pub topic: String,
    /// Calendar date-time of the start; naive values are taken as UTC.
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub timezone: String,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "loose_i64")]
    pub meeting_type: Option<i64>,
    #[serde(default)]
    pub password: Option<String>,
    /// Minutes.
    #[serde(default, deserialize_with = "loose_i64")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "truthy")]
    pub meeting_authentication: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub join_before_host: bool,
    #[serde(default, rename = "option_host_video", deserialize_with = "truthy")]
    pub host_video: bool,
    #[serde(default, rename = "option_participants_video", deserialize_with = "truthy")]
    pub participant_video: bool,
    #[serde(default, rename = "option_mute_participants", deserialize_with = "truthy")]
    pub mute_upon_entry: bool,
    /// `local`, `cloud` or `none`.
    #[serde(default, rename = "option_auto_recording")]
    pub auto_recording: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub alternative_host_ids: Vec<String>,
}

/// Input for updating a scheduled meeting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMeetingRequest {
    #[serde(deserialize_with = "loose_string")]
    pub meeting_id: String,
    pub topic: String,
    /// Sent as given with a `Z` suffix, so it must already be a UTC
    /// `YYYY-MM-DDTHH:MM:SS` value.
    pub start_date: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, rename = "option_host_video", deserialize_with = "truthy")]
    pub host_video: bool,
    #[serde(default, rename = "option_participants_video", deserialize_with = "truthy")]
    pub participant_video: bool,
}

impl CreateMeetingRequest {
    /// Build the request from a loosely typed input mapping.
    pub fn from_value(input: Value) -> Result<Self, Error> {
        from_input(input)
    }
}

impl UpdateMeetingRequest {
    pub fn from_value(input: Value) -> Result<Self, Error> {
        from_input(input)
    }
}

#[derive(Debug, Serialize)]
struct MeetingPayload<'a> {
    topic: &'a str,
    agenda: &'a str,
    #[serde(rename = "type")]
    meeting_type: i64,
    start_time: String,
    timezone: &'a str,
    password: &'a str,
    duration: i64,
    settings: MeetingSettings<'a>,
}

#[derive(Debug, Serialize)]
struct MeetingSettings<'a> {
    meeting_authentication: bool,
    join_before_host: bool,
    host_video: bool,
    participant_video: bool,
    mute_upon_entry: bool,
    auto_recording: &'a str,
    alternative_hosts: String,
}

impl ZoomClient {
    pub async fn list_meetings(&self, host_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("users/{}/meetings", path_segment("host_id", host_id)?);
        self.send(
            Operation::ListMeetings,
            path,
            HttpMethod::Get,
            json!({ "page_size": DEFAULT_PAGE_SIZE }),
        )
        .await
    }

    /// Schedule a meeting for `request.user_id`.
    ///
    /// If the payload hooks reduce the payload to nothing the meeting is not
    /// created and [`FailureReason::Cancelled`] is returned.
    pub async fn create_meeting(&self, request: &CreateMeetingRequest) -> Result<ApiResponse, Error> {
        let path = format!("users/{}/meetings", path_segment("user_id", &request.user_id)?);
        let start_time = parse_start_time(&request.start_date)?
            .format(START_TIME_FORMAT)
            .to_string();

        let payload = serde_json::to_value(MeetingPayload {
            topic: &request.topic,
            agenda: non_empty(request.agenda.as_deref()).unwrap_or_default(),
            meeting_type: non_zero(request.meeting_type).unwrap_or(SCHEDULED_MEETING),
            start_time,
            timezone: &request.timezone,
            password: non_empty(request.password.as_deref()).unwrap_or_default(),
            duration: non_zero(request.duration).unwrap_or(DEFAULT_DURATION_MINUTES),
            settings: MeetingSettings {
                meeting_authentication: request.meeting_authentication,
                join_before_host: request.join_before_host,
                host_video: request.host_video,
                participant_video: request.participant_video,
                mute_upon_entry: request.mute_upon_entry,
                auto_recording: non_empty(request.auto_recording.as_deref())
                    .unwrap_or(NO_AUTO_RECORDING),
                alternative_hosts: request.alternative_host_ids.join(","),
            },
        })?;

        let payload = self.hooks.apply(Operation::CreateMeeting, payload);
        if is_empty_payload(&payload) {
            info!("Meeting creation for {} cancelled by payload hook", request.user_id);
            return Ok(ApiResponse::Failure(FailureReason::Cancelled));
        }

        self.dispatch(&path, HttpMethod::Post, payload).await
    }

    /// Update a scheduled meeting.
    ///
    /// Only the topic, start, password and video flags come from `request`;
    /// the remaining fields are reset to fixed values (45 minute duration,
    /// UTC timezone, authentication and join-before-host on, no recording).
    pub async fn update_meeting(&self, request: &UpdateMeetingRequest) -> Result<ApiResponse, Error> {
        let path = format!("meetings/{}", path_segment("meeting_id", &request.meeting_id)?);

        let payload = serde_json::to_value(MeetingPayload {
            topic: &request.topic,
            agenda: "",
            meeting_type: SCHEDULED_MEETING,
            start_time: format!("{}Z", request.start_date),
            timezone: "UTC",
            password: non_empty(request.password.as_deref()).unwrap_or_default(),
            duration: UPDATED_DURATION_MINUTES,
            settings: MeetingSettings {
                meeting_authentication: true,
                join_before_host: true,
                host_video: request.host_video,
                participant_video: request.participant_video,
                mute_upon_entry: false,
                auto_recording: NO_AUTO_RECORDING,
                alternative_hosts: String::new(),
            },
        })?;

        self.send(Operation::UpdateMeeting, path, HttpMethod::Patch, payload)
            .await
    }

    pub async fn get_meeting_info(&self, meeting_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("meetings/{}", path_segment("meeting_id", meeting_id)?);
        self.send(Operation::GetMeetingInfo, path, HttpMethod::Get, Value::Null)
            .await
    }

    /// List the ended instances of a (recurring) meeting.
    pub async fn get_past_meeting_instances(&self, meeting_id: &str) -> Result<ApiResponse, Error> {
        let path = format!(
            "past_meetings/{}/instances",
            path_segment("meeting_id", meeting_id)?
        );
        self.send(Operation::GetPastMeetingInstances, path, HttpMethod::Get, Value::Null)
            .await
    }

    pub async fn delete_meeting(&self, meeting_id: &str) -> Result<ApiResponse, Error> {
        let path = format!("meetings/{}", path_segment("meeting_id", meeting_id)?);
        self.send(Operation::DeleteMeeting, path, HttpMethod::Delete, Value::Null)
            .await
    }
}

/// Parse a meeting start given as RFC 3339, as a date-time with a numeric
/// offset, or as a naive date/date-time (UTC). Fractional seconds and 12-hour
/// clock times are accepted.
fn parse_start_time(input: &str) -> Result<DateTime<Utc>, Error> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(input, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .ok_or_else(|| {
            warn!("Unparseable meeting start date: {:?}", input);
            Error::validation(ValidationErrorKind::InvalidDate(input.to_string()))
        })
}
