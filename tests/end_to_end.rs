//! Workspace-level end-to-end tests: credentials, sessions and the client
//! wired together through the umbrella crate.

use std::sync::{Arc, Mutex};

use void::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn persona_turn_with_file_token_and_file_sessions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stream-chat"))
        .and(header("authorization", "Bearer file-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(
                    "event: message\r\n\
                     data: {\"content\":\"I hear you\",\"finished\":false}\r\n\r\n\
                     event: message\r\n\
                     data: {\"content\":\".\",\"finished\":true}\r\n\r\n",
                ),
        )
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token");
    std::fs::write(&token_path, "file-token\n").unwrap();
    let credentials = CredentialChain::new()
        .with_provider(Arc::new(NoCredentials))
        .with_provider(Arc::new(FileCredentials::new(&token_path)));
    let client = VoidClient::new()
        .base_url(server.uri())
        .credentials(Arc::new(credentials));
    let store = FsSessionStore::new(&dir.path().join("sessions"));

    for _ in 0..2 {
        let transcript = Arc::new(Mutex::new(String::new()));
        let sink = transcript.clone();
        let handle = client
            .stream_persona_with_store(
                "I feel stuck",
                &store,
                move |content, _| sink.lock().unwrap().push_str(content),
                |e| panic!("persona turn failed: {e}"),
            )
            .await
            .unwrap();
        assert_eq!(handle.join().await, Some(StreamOutcome::Finished));
        assert_eq!(*transcript.lock().unwrap(), "I hear you.");
    }

    let requests = server.received_requests().await.unwrap();
    let sessions: Vec<String> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            assert_eq!(body["type"], "persona");
            body["session_id"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(sessions[0], sessions[1]);
    assert_eq!(sessions[0].len(), "user-".len() + 9);
}

#[tokio::test]
async fn concurrent_exchanges_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("data: {\"content\":\"answer\",\"finished\":true}\n"),
        )
        .mount(&server)
        .await;

    let client = VoidClient::new().base_url(server.uri());
    let counts: Vec<Arc<Mutex<usize>>> = (0..4).map(|_| Arc::default()).collect();
    let handles: Vec<StreamHandle> = counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let count = count.clone();
            client.stream_qa(
                format!("question {i}"),
                move |_, _| *count.lock().unwrap() += 1,
                |e| panic!("exchange failed: {e}"),
            )
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().await, Some(StreamOutcome::Finished));
    }
    for count in counts {
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
