#![deny(missing_docs)]
//! # void
//!
//! Umbrella crate and single import surface for the Void System streaming
//! client. Re-exports the workspace crates behind feature flags, plus a
//! `prelude` for the happy path.

#[cfg(feature = "auth")]
pub use void_auth;
#[cfg(feature = "client")]
pub use void_client;
#[cfg(feature = "session")]
pub use void_session;
pub use void_stream;
pub use void_types;

/// Happy-path imports for streaming chat.
pub mod prelude {
    pub use void_stream::consume_stream;
    pub use void_types::{
        Payload, RequestKind, SessionId, StreamError, StreamOutcome, StreamRequest,
    };

    #[cfg(feature = "auth")]
    pub use void_auth::{
        AuthError, BearerToken, CredentialChain, CredentialProvider, EnvCredentials,
        FileCredentials, NoCredentials, StaticCredentials,
    };

    #[cfg(feature = "session")]
    pub use void_session::{
        FsSessionStore, MemorySessionStore, SessionError, SessionStore, resolve_session_id,
    };

    #[cfg(feature = "client")]
    pub use void_client::{ClientConfig, StreamHandle, VoidClient};
}
