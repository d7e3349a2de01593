#![deny(missing_docs)]
//! Credential providers for the void client.
//!
//! The client never reads tokens from ambient process state. It holds an
//! `Arc<dyn CredentialProvider>` and asks it for a [`BearerToken`] before each
//! exchange. A provider answering `Ok(None)` means "no credential"; the
//! request then goes out without an `Authorization` header.
//!
//! Implementations:
//! - [`NoCredentials`]: never yields a token.
//! - [`StaticCredentials`]: a fixed token, for dev/test.
//! - [`EnvCredentials`]: reads an environment variable at request time.
//! - [`FileCredentials`]: reads a token file at request time.
//! - [`CredentialChain`]: first provider yielding a token wins.

mod providers;

pub use providers::{EnvCredentials, FileCredentials, NoCredentials, StaticCredentials};

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors from credential providers.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential exists but is unusable (not UTF-8, malformed).
    #[error("invalid credential: {0}")]
    Invalid(String),

    /// The backing store could not be read.
    #[error("backend error: {0}")]
    BackendError(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// An opaque bearer token. Cannot be logged, serialized, or cloned.
/// Memory is zeroed on drop.
pub struct BearerToken {
    inner: Zeroizing<String>,
}

impl BearerToken {
    /// Wrap a token string. The string is moved, not copied.
    pub fn new(token: String) -> Self {
        Self {
            inner: Zeroizing::new(token),
        }
    }

    /// Scoped exposure. The token is only visible inside the closure.
    pub fn with_secret<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.inner)
    }

    /// Returns true if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// Supplies the bearer token attached to outbound requests.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Return the current token, or `None` when no credential is stored.
    async fn bearer_token(&self) -> Result<Option<BearerToken>, AuthError>;
}

/// Tries providers in order until one yields a token.
///
/// Providers that fail are skipped. If none yields a token, the chain answers
/// `Ok(None)` when at least one provider answered cleanly, and otherwise
/// returns the last error.
pub struct CredentialChain {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl CredentialChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn with_provider(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Add a provider to the end of the chain (mutable).
    pub fn add(&mut self, provider: Arc<dyn CredentialProvider>) {
        self.providers.push(provider);
    }
}

impl Default for CredentialChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for CredentialChain {
    async fn bearer_token(&self) -> Result<Option<BearerToken>, AuthError> {
        let mut answered = self.providers.is_empty();
        let mut last_err = None;
        for provider in &self.providers {
            match provider.bearer_token().await {
                Ok(Some(token)) => return Ok(Some(token)),
                Ok(None) => answered = true,
                Err(e) => {
                    tracing::warn!(error = %e, "credential provider failed, trying next");
                    last_err = Some(e);
                }
            }
        }
        match last_err {
            Some(e) if !answered => Err(e),
            _ => Ok(None),
        }
    }
}
