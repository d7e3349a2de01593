//! Frame reassembly and event parsing.
//!
//! The backend writes one event per line:
//!
//! ```text
//! event: message
//! data: {"content":"Hel","finished":false}
//!
//! data: {"content":"","finished":true}
//! ```
//!
//! Lines may end in `\r\n`. Only `data: ` lines carry payloads; everything else
//! is ignored.

use void_types::Payload;

/// Prefix marking a frame that carries a JSON payload.
pub const EVENT_PREFIX: &str = "data: ";

/// Splits decoded text into newline-terminated frames.
///
/// Text after the last newline is an incomplete frame; it is carried over and
/// prepended to the next push.
#[derive(Debug, Default)]
pub struct FrameSplitter {
    carry: String,
}

impl FrameSplitter {
    /// Create a splitter with an empty carry-over buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` and return every frame completed by a newline, in order.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.carry.push_str(text);
        let Some(last_newline) = self.carry.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.carry.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.carry, rest);
        complete[..last_newline]
            .split('\n')
            .map(str::to_owned)
            .collect()
    }

    /// Append the final `text` at end of stream and return all remaining
    /// frames, including an unterminated last one.
    pub fn finish(&mut self, text: &str) -> Vec<String> {
        self.carry.push_str(text);
        let rest = std::mem::take(&mut self.carry);
        if rest.is_empty() {
            return Vec::new();
        }
        rest.split('\n').map(str::to_owned).collect()
    }

    /// The incomplete frame currently held back.
    pub fn carry(&self) -> &str {
        &self.carry
    }
}

/// Parse one frame.
///
/// Returns `None` for frames that carry no event (blank lines, `event:` or
/// comment lines), otherwise the JSON decoding result of the text after
/// [`EVENT_PREFIX`].
pub fn parse_event(frame: &str) -> Option<Result<Payload, serde_json::Error>> {
    let frame = frame.trim_end_matches('\r');
    if frame.trim().is_empty() {
        return None;
    }
    let body = frame.strip_prefix(EVENT_PREFIX)?;
    Some(serde_json::from_str(body))
}
