//! HTTP client building and request transport.

mod client;
mod request;
mod transport;

pub use client::{HttpClientBuilder, HttpClientConfig};
pub use request::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
