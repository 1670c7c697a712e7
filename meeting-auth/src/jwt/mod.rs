//! Signed, time-limited access tokens.
//!
//! Every outbound API request carries a freshly signed JWT so the expiry always
//! reflects the time the request was made. Tokens are never cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use meeting_auth::{credentials::Credentials, jwt};
//! use secrecy::SecretString;
//!
//! let credentials = Credentials::new("api_key", SecretString::new("api_secret".to_string()));
//! let token = jwt::sign(&credentials)?;
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{signing_error, Error, SigningErrorKind};

pub use claims::AccessClaims;

mod claims;

/// Lifetime of a signed token, in seconds.
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Sign an access token for `credentials` valid for [`TOKEN_TTL_SECONDS`] from now.
pub fn sign(credentials: &Credentials) -> Result<String, Error> {
    sign_at(credentials, Utc::now())
}

/// Sign an access token as if issued at `issued_at`.
///
/// Uses HS256 with the account secret as the key. Fails with
/// [`SigningErrorKind::EmptySecret`] before touching the signer when the secret is empty.
pub fn sign_at(credentials: &Credentials, issued_at: DateTime<Utc>) -> Result<String, Error> {
    if credentials.has_empty_secret() {
        return Err(signing_error(
            SigningErrorKind::EmptySecret,
            "API secret is empty; can not sign access token",
        ));
    }

    let claims = AccessClaims {
        iss: credentials.key().to_string(),
        exp: issued_at.timestamp() + TOKEN_TTL_SECONDS,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(credentials.secret().expose_secret().as_bytes()),
    )?;

    debug!("Signed access token for issuer {} (exp {})", claims.iss, claims.exp);

    Ok(token)
}
