#![deny(missing_docs)]
//! HTTP client for the Void System streaming chat endpoint.
//!
//! [`VoidClient`] opens a `POST` against the backend, reads the chunked
//! `data: <json>` response through [`void_stream::consume_stream`] on a
//! spawned tokio task, and hands each payload to a caller callback. Every
//! exchange returns a [`StreamHandle`] that cancels it.
//!
//! ```no_run
//! use void_client::VoidClient;
//!
//! # async fn demo() {
//! let client = VoidClient::new().base_url("http://localhost:8000");
//! let handle = client.stream_qa(
//!     "What is a mentor?",
//!     |content, finished| {
//!         print!("{content}");
//!         if finished {
//!             println!();
//!         }
//!     },
//!     |err| eprintln!("stream failed: {err}"),
//! );
//! handle.join().await;
//! # }
//! ```

mod client;
pub mod config;
mod error;
mod handle;

pub use client::VoidClient;
pub use config::{ClientConfig, ENV_BASE_URL, ENV_CONNECT_TIMEOUT_MS, ENV_STREAM_PATH};
pub use handle::StreamHandle;
