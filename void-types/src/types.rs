//! Wire types for the streaming chat endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which backend chain a streaming request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Conversational persona with per-session memory.
    Persona,
    /// Study-task advisor for a topic.
    Advisor,
    /// Retrieval-augmented question answering over uploaded documents.
    Qa,
}

impl RequestKind {
    /// The discriminator sent in the request body's `type` field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Persona => "persona",
            Self::Advisor => "advisor",
            Self::Qa => "qa",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a streaming chat request.
///
/// Serializes as `{ "type": <kind>, ...fields }`:
///
/// ```
/// use void_types::StreamRequest;
///
/// let body = serde_json::to_value(StreamRequest::qa("what is RAG?")).unwrap();
/// assert_eq!(body, serde_json::json!({ "type": "qa", "question": "what is RAG?" }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamRequest {
    /// Persona chat turn.
    Persona {
        /// User input.
        text: String,
        /// Conversation correlation id. Omitted from the body when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<SessionId>,
    },
    /// Task suggestions for a learning topic.
    Advisor {
        /// Learning topic.
        topic: String,
    },
    /// Knowledge-base question.
    Qa {
        /// The question to answer.
        question: String,
    },
}

impl StreamRequest {
    /// Persona request.
    pub fn persona(text: impl Into<String>, session_id: Option<SessionId>) -> Self {
        Self::Persona {
            text: text.into(),
            session_id,
        }
    }

    /// Advisor request.
    pub fn advisor(topic: impl Into<String>) -> Self {
        Self::Advisor {
            topic: topic.into(),
        }
    }

    /// Document Q&A request.
    pub fn qa(question: impl Into<String>) -> Self {
        Self::Qa {
            question: question.into(),
        }
    }

    /// The variant tag of this request.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Persona { .. } => RequestKind::Persona,
            Self::Advisor { .. } => RequestKind::Advisor,
            Self::Qa { .. } => RequestKind::Qa,
        }
    }
}

/// The JSON object carried by one `data: ` frame.
///
/// Missing fields take their defaults: an absent `content` is the empty
/// string, an absent `finished` is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Text fragment to append to the running output.
    #[serde(default)]
    pub content: String,
    /// Whether this is the terminal fragment of the exchange.
    #[serde(default)]
    pub finished: bool,
}

impl Payload {
    /// Non-terminal fragment.
    pub fn fragment(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finished: false,
        }
    }

    /// Terminal fragment.
    pub fn last(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finished: true,
        }
    }
}

/// Opaque identifier correlating the turns of a persona conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

/// Length of the random suffix in a generated [`SessionId`].
const SESSION_SUFFIX_LEN: u32 = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl SessionId {
    /// Create a session id from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id of the form `user-` followed by nine lowercase
    /// base-36 characters.
    #[must_use]
    pub fn generate() -> Self {
        let mut n = uuid::Uuid::new_v4().as_u128() % 36u128.pow(SESSION_SUFFIX_LEN);
        let mut suffix = [b'0'; SESSION_SUFFIX_LEN as usize];
        for slot in suffix.iter_mut().rev() {
            *slot = BASE36[(n % 36) as usize];
            n /= 36;
        }
        let suffix: String = suffix.iter().map(|&b| char::from(b)).collect();
        Self(format!("user-{suffix}"))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How a streaming exchange ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// A payload with `finished = true` was delivered.
    Finished,
    /// The body ended before any terminal payload.
    Exhausted,
    /// The caller cancelled the exchange.
    Cancelled,
}
