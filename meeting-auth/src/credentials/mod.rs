//! Account credentials and credential storage.

mod storage;

pub use storage::{CredentialStore, StaticCredentialStore};

use secrecy::{ExposeSecret, SecretString};

/// API key/secret pair identifying the account.
///
/// The secret is held as a [`SecretString`] so it never shows up in `Debug`
/// output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    key: String,
    secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and secret.
    pub fn new(key: impl Into<String>, secret: SecretString) -> Self {
        Self {
            key: key.into(),
            secret,
        }
    }

    /// The account API key, used as the token issuer.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The account API secret, used as the token signing key.
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// True when the secret is empty and can not sign tokens.
    pub fn has_empty_secret(&self) -> bool {
        self.secret.expose_secret().is_empty()
    }
}
