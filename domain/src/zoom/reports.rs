//! Account usage reports.

use meeting_auth::http::HttpMethod;
use serde_json::json;

use super::payload::DEFAULT_PAGE_SIZE;
use super::{ApiResponse, Operation, ZoomClient};
use crate::error::Error;

impl ZoomClient {
    /// Daily usage for one month.
    pub async fn get_daily_report(&self, month: u32, year: i32) -> Result<ApiResponse, Error> {
        self.send(
            Operation::GetDailyReport,
            "report/daily".to_string(),
            HttpMethod::Get,
            json!({ "year": year, "month": month }),
        )
        .await
    }

    /// Active and inactive host report between two `YYYY-MM-DD` dates.
    pub async fn get_account_report(&self, from: &str, to: &str) -> Result<ApiResponse, Error> {
        self.send(
            Operation::GetAccountReport,
            "report/users".to_string(),
            HttpMethod::Get,
            json!({ "from": from, "to": to, "page_size": DEFAULT_PAGE_SIZE }),
        )
        .await
    }
}
