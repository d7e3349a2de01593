#![deny(missing_docs)]
//! Incremental consumption of newline-delimited SSE chat streams.
//!
//! The backend answers a streaming chat request with a chunked body of
//! `data: <json>` lines. This crate turns any `Stream` of byte chunks into an
//! ordered series of `(content, finished)` callbacks:
//!
//! 1. [`Utf8Decoder`] decodes bytes without corrupting characters split across
//!    reads.
//! 2. [`FrameSplitter`] reassembles lines split across reads.
//! 3. [`parse_event`] turns a `data: ` line into a [`void_types::Payload`].
//! 4. [`consume_stream`] runs the read loop, stopping at the first terminal
//!    payload, at end of body, on a read error, or on cancellation.
//!
//! The crate is transport-agnostic; `void-client` feeds it a reqwest body.

pub mod consumer;
pub mod decode;
pub mod frame;

pub use consumer::consume_stream;
pub use decode::Utf8Decoder;
pub use frame::{EVENT_PREFIX, FrameSplitter, parse_event};
