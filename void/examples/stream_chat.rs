//! Stream one chat turn from a Void backend and print it as it arrives.
//!
//! Reads `VOID_BASE_URL` (default `http://localhost:8000`) and an optional
//! bearer token from `VOID_ACCESS_TOKEN` or `.void/token`. Persona turns keep
//! their session id under `.void/sessions`.
//!
//!   cargo run -p void --example stream_chat -- persona "I feel stuck at work"
//!   cargo run -p void --example stream_chat -- advisor "career change"
//!   cargo run -p void --example stream_chat -- qa "What is a mentor?"

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use void::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let kind = args.next().unwrap_or_else(|| "qa".to_string());
    let text = args.collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        eprintln!("usage: stream_chat <persona|advisor|qa> <text>");
        std::process::exit(2);
    }

    let credentials = CredentialChain::new()
        .with_provider(Arc::new(EnvCredentials::default()))
        .with_provider(Arc::new(FileCredentials::new(".void/token")));
    let client = VoidClient::from_env()?.credentials(Arc::new(credentials));

    let on_message = |content: &str, finished: bool| {
        print!("{content}");
        if finished {
            println!();
        }
        let _ = std::io::stdout().flush();
    };
    let on_error = |err: StreamError| eprintln!("\nstream failed: {err}");

    let handle = match kind.as_str() {
        "persona" => {
            let store = FsSessionStore::new(Path::new(".void/sessions"));
            client
                .stream_persona_with_store(text, &store, on_message, on_error)
                .await?
        }
        "advisor" => client.stream_advisor(text, on_message, on_error),
        "qa" => client.stream_qa(text, on_message, on_error),
        other => {
            eprintln!("unknown kind {other:?}, expected persona, advisor or qa");
            std::process::exit(2);
        }
    };

    handle.cancel_after(Duration::from_secs(120));
    match handle.join().await {
        Some(StreamOutcome::Exhausted) => eprintln!("\n(stream ended without a final message)"),
        Some(StreamOutcome::Cancelled) => eprintln!("\n(timed out)"),
        _ => {}
    }
    Ok(())
}
