//! # meeting-auth
//!
//! Authentication and HTTP plumbing for the video meeting API client:
//! - Account credentials (key/secret pair) and the credential store seam
//! - Signed, time-limited access tokens (JWT) derived from the credentials
//! - HTTP client building and the transport the dispatcher sends requests through
//!
//! ## Architecture
//!
//! This crate provides the foundation that `domain` builds upon:
//! - `domain::zoom::ZoomClient` signs a fresh token per request with [`jwt::sign`]
//! - requests are executed through a [`http::Transport`], by default [`http::ReqwestTransport`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     credentials::Credentials,
//!     http::{HttpClientBuilder, ReqwestTransport},
//!     jwt,
//! };
//! ```

pub mod credentials;
pub mod error;
pub mod http;
pub mod jwt;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
