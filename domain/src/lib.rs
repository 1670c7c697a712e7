//! Domain layer for the video meeting API client.
//!
//! [`zoom::ZoomClient`] owns the account credentials, builds one request per
//! domain operation (users, meetings, webinars, registrants, recordings,
//! reports) and sends it through the shared dispatcher, which signs a fresh
//! access token for every call and normalizes the response into an
//! [`zoom::ApiResponse`].

pub mod error;
pub mod zoom;

pub use error::Error;
pub use zoom::{ApiResponse, FailureReason, HookRegistry, Operation, ZoomClient};
