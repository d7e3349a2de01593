//! The umbrella prelude is enough to drive the read loop directly.

use void::prelude::*;

#[tokio::test]
async fn prelude_exposes_the_read_loop() {
    let chunks: Vec<Result<&[u8], std::io::Error>> = vec![
        Ok(b"data: {\"content\":\"a\"}\n".as_slice()),
        Ok(b"data: {\"content\":\"b\",\"finished\":true}\n".as_slice()),
    ];
    let mut seen = Vec::new();
    let outcome = consume_stream(
        futures::stream::iter(chunks),
        &Default::default(),
        |content, finished| seen.push((content.to_string(), finished)),
    )
    .await
    .unwrap();

    assert_eq!(outcome, StreamOutcome::Finished);
    assert_eq!(seen, vec![("a".to_string(), false), ("b".to_string(), true)]);
}
