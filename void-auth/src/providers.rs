//! Built-in credential providers.

use crate::{AuthError, BearerToken, CredentialProvider};
use async_trait::async_trait;
use std::path::PathBuf;

/// A provider that never yields a token. Requests go out unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

#[async_trait]
impl CredentialProvider for NoCredentials {
    async fn bearer_token(&self) -> Result<Option<BearerToken>, AuthError> {
        Ok(None)
    }
}

/// A provider that always returns the same token. Dev/test only.
pub struct StaticCredentials {
    token: String,
}

impl StaticCredentials {
    /// Create with a fixed token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn bearer_token(&self) -> Result<Option<BearerToken>, AuthError> {
        Ok(Some(BearerToken::new(self.token.clone())))
    }
}

/// Reads the token from an environment variable on every request.
///
/// An unset or blank variable means no credential.
pub struct EnvCredentials {
    var_name: String,
}

impl EnvCredentials {
    /// Default variable name.
    pub const DEFAULT_VAR: &'static str = "VOID_ACCESS_TOKEN";

    /// Read from the given variable.
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentials {
    async fn bearer_token(&self) -> Result<Option<BearerToken>, AuthError> {
        match std::env::var(&self.var_name) {
            Ok(val) if val.trim().is_empty() => Ok(None),
            Ok(val) => Ok(Some(BearerToken::new(val.trim().to_string()))),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(AuthError::Invalid(format!(
                "env var {} is not valid unicode",
                self.var_name
            ))),
        }
    }
}

/// Reads the token from a file on every request, so a login flow can rotate
/// it underneath a running client.
///
/// A missing or blank file means no credential. Surrounding whitespace is
/// trimmed.
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    /// Create with the path to the token file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialProvider for FileCredentials {
    async fn bearer_token(&self) -> Result<Option<BearerToken>, AuthError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                return Err(AuthError::Invalid(format!("token file is not UTF-8: {e}")));
            }
            Err(e) => {
                return Err(AuthError::BackendError(format!(
                    "failed to read token file: {e}"
                )));
            }
        };
        let token = contents.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(BearerToken::new(token.to_string())))
    }
}
