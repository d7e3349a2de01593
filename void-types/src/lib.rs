#![deny(missing_docs)]
//! Shared types for the void streaming client.
//!
//! Defines the outbound [`StreamRequest`] variants, the inbound [`Payload`]
//! carried by each `data: ` frame, the [`SessionId`] used to correlate persona
//! turns, and the [`StreamError`] taxonomy surfaced to callers.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
