//! The per-exchange read loop.

use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use void_types::{StreamError, StreamOutcome};

use crate::decode::Utf8Decoder;
use crate::frame::{FrameSplitter, parse_event};

/// Drive a response body to completion, delivering each payload to
/// `on_message(content, finished)` in the order its frame completed.
///
/// The loop ends, and `body` is dropped, when:
/// - a payload with `finished = true` is delivered ([`StreamOutcome::Finished`]);
///   frames buffered behind it are discarded,
/// - the body is exhausted ([`StreamOutcome::Exhausted`]); the decoder and the
///   carry-over buffer are flushed first,
/// - `cancel` fires ([`StreamOutcome::Cancelled`]); no callback runs after that,
/// - a read fails, which is returned as [`StreamError::Read`].
///
/// Frames whose JSON does not parse are logged and skipped. Zero-length chunks
/// are ignored.
pub async fn consume_stream<S, B, E, M>(
    body: S,
    cancel: &CancellationToken,
    on_message: M,
) -> Result<StreamOutcome, StreamError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
    M: FnMut(&str, bool),
{
    let mut consumer = StreamConsumer::new(on_message);
    let result = consumer.run(body, cancel).await;
    tracing::debug!(
        outcome = ?result.as_ref().ok(),
        delivered = consumer.delivered,
        skipped = consumer.skipped,
        "stream reader released"
    );
    result
}

/// Read-loop state for one exchange.
struct StreamConsumer<M> {
    on_message: M,
    decoder: Utf8Decoder,
    frames: FrameSplitter,
    /// Payloads handed to `on_message`.
    delivered: usize,
    /// `data: ` frames dropped because their JSON did not parse.
    skipped: usize,
}

impl<M> StreamConsumer<M>
where
    M: FnMut(&str, bool),
{
    fn new(on_message: M) -> Self {
        Self {
            on_message,
            decoder: Utf8Decoder::new(),
            frames: FrameSplitter::new(),
            delivered: 0,
            skipped: 0,
        }
    }

    async fn run<S, B, E>(
        &mut self,
        body: S,
        cancel: &CancellationToken,
    ) -> Result<StreamOutcome, StreamError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut body = std::pin::pin!(body);
        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(StreamOutcome::Cancelled),
                next = body.next() => next,
            };

            let exhausted = next.is_none();
            let frames = match next {
                Some(Ok(chunk)) => {
                    let bytes = chunk.as_ref();
                    if bytes.is_empty() {
                        continue;
                    }
                    let text = self.decoder.decode(bytes);
                    self.frames.push(&text)
                }
                Some(Err(e)) => return Err(StreamError::Read(Box::new(e))),
                None => {
                    let text = self.decoder.finish();
                    self.frames.finish(&text)
                }
            };

            if let Some(outcome) = self.dispatch(&frames, cancel) {
                return Ok(outcome);
            }
            if exhausted {
                return Ok(StreamOutcome::Exhausted);
            }
        }
    }

    /// Deliver the payloads of `frames` in order. Returns an outcome when the
    /// exchange ends inside this batch.
    fn dispatch(
        &mut self,
        frames: &[String],
        cancel: &CancellationToken,
    ) -> Option<StreamOutcome> {
        for frame in frames {
            let payload = match parse_event(frame) {
                None => continue,
                Some(Ok(payload)) => payload,
                Some(Err(e)) => {
                    self.skipped += 1;
                    tracing::warn!(error = %e, frame = %frame, "skipping malformed stream frame");
                    continue;
                }
            };
            if cancel.is_cancelled() {
                return Some(StreamOutcome::Cancelled);
            }
            (self.on_message)(&payload.content, payload.finished);
            self.delivered += 1;
            if payload.finished {
                return Some(StreamOutcome::Finished);
            }
        }
        None
    }
}
