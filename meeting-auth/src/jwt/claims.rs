//! Claims carried by the API access token.

use serde::{Deserialize, Serialize};

/// Represents the claims for an API access token.
///
/// The receiving service identifies the account by `iss` (the API key) and
/// rejects the token once `exp` (unix seconds) has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub iss: String,
    pub exp: i64,
}
