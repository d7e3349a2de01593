#![deny(missing_docs)]
//! Persistence for client-side session identifiers.
//!
//! The persona chain keeps per-session memory on the backend, keyed by an id
//! the client generates on first use and then reuses for every later turn.
//! This crate defines the [`SessionStore`] trait holding those ids, an
//! in-memory and a filesystem backend, and [`resolve_session_id`] which
//! returns the stored id or creates one.

mod fs;
mod memory;

pub use fs::FsSessionStore;
pub use memory::MemorySessionStore;

use async_trait::async_trait;
use thiserror::Error;
use void_types::SessionId;

/// Key under which the persona conversation id is stored.
pub const PERSONA_SESSION_KEY: &str = "persona_session_id";

/// Errors from session stores.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored value could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key-value storage for session identifiers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Return the persisted persona session id, generating and storing a new one
/// on first use.
pub async fn resolve_session_id(store: &dyn SessionStore) -> Result<SessionId, SessionError> {
    if let Some(existing) = store.get(PERSONA_SESSION_KEY).await? {
        if !existing.is_empty() {
            return Ok(SessionId::new(existing));
        }
    }
    let id = SessionId::generate();
    store.put(PERSONA_SESSION_KEY, id.as_str()).await?;
    tracing::debug!(session_id = %id, "generated persona session id");
    Ok(id)
}

/// Forget the persisted persona session id so the next turn starts a fresh
/// conversation.
pub async fn reset_session_id(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.remove(PERSONA_SESSION_KEY).await
}
