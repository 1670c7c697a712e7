//! Credential storage trait for the account key/secret pair.

use async_trait::async_trait;

use super::Credentials;
use crate::error::Error;

/// Trait for loading account credentials from wherever the host application
/// keeps them (options table, keyring, environment, ...).
///
/// This crate only reads credentials; persisting them is the host's concern.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the current credentials, or `None` when none are configured.
    async fn load(&self) -> Result<Option<Credentials>, Error>;
}

/// Credential store backed by a value held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    credentials: Option<Credentials>,
}

impl StaticCredentialStore {
    /// Create a store holding the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    /// Create a store with no credentials configured.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, Error> {
        Ok(self.credentials.clone())
    }
}
