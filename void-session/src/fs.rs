//! Filesystem-backed session store.

use crate::{SessionError, SessionStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Session store keeping one JSON file per key under a root directory.
///
/// Directory layout:
/// ```text
/// root/
///   <url-encoded-key>.json
/// ```
///
/// Ids survive process restarts, so a persona conversation continues across
/// runs of the same tool.
pub struct FsSessionStore {
    root: PathBuf,
}

impl FsSessionStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key_to_filename(key))
    }
}

/// Encode a key into a safe filename.
fn key_to_filename(key: &str) -> String {
    let mut encoded = String::new();
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => {
                encoded.push(char::from(byte));
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    format!("{encoded}.json")
}

#[async_trait]
impl SessionStore for FsSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => {
                let value: String = serde_json::from_str(&contents)
                    .map_err(|e| SessionError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), SessionError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        let contents = serde_json::to_string(value)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        tokio::fs::write(self.path_for(key), contents)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }
}
