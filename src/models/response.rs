//! Response envelope shared by every marketplace endpoint
//!
//! Every action endpoint answers with `{ messages, result, success }`. A
//! `success: false` envelope is a business-level outcome, not a transport
//! failure: it arrives with a 2xx status and is handed to the caller as-is.

use serde::{Deserialize, Serialize};

/// Severity of a server message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnumLevel {
    Info,
    Warn,
    Error,
    Critical,
}

/// A single message attached to a server response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    /// Message code, e.g. `BasicMessageCode.NotFound`
    pub code: String,
    pub level: EnumLevel,
    #[serde(default)]
    pub description: Option<String>,
}

/// Universal response envelope
///
/// `result` is `None` when the server sends `null` or omits the payload,
/// which is what failed operations and `void` endpoints do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerResponse<R> {
    /// Array of server messages
    #[serde(default)]
    pub messages: Vec<ServerMessage>,
    /// Response payload
    pub result: Option<R>,
    /// True if no message with level higher than warning is present.
    /// An operation may be successful and still contain messages with
    /// level [`EnumLevel::Info`] or [`EnumLevel::Warn`].
    pub success: bool,
}

impl<R> ServerResponse<R> {
    /// Build a successful envelope around a payload
    pub fn ok(result: R) -> Self {
        Self {
            messages: Vec::new(),
            result: Some(result),
            success: true,
        }
    }

    /// Build a failed envelope carrying the given messages
    pub fn failure(messages: Vec<ServerMessage>) -> Self {
        Self {
            messages,
            result: None,
            success: false,
        }
    }

    /// Messages at or above the given severity
    pub fn messages_at_least(&self, level: EnumLevel) -> impl Iterator<Item = &ServerMessage> {
        self.messages.iter().filter(move |m| m.level >= level)
    }

    /// Transform the payload, keeping messages and the success flag
    pub fn map<T, F>(self, f: F) -> ServerResponse<T>
    where
        F: FnOnce(R) -> T,
    {
        ServerResponse {
            messages: self.messages,
            result: self.result.map(f),
            success: self.success,
        }
    }

    /// Convert the envelope into a `Result`.
    ///
    /// The resource clients never call this: a `success: false` envelope is
    /// returned to the caller untouched. It exists for callers that prefer
    /// to treat business failures as errors.
    pub fn into_result(self) -> Result<Option<R>, Vec<ServerMessage>> {
        if self.success {
            Ok(self.result)
        } else {
            Err(self.messages)
        }
    }
}
