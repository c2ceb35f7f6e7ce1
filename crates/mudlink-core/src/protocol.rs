#![forbid(unsafe_code)]

//! JSON wire schema between the game server and the client.
//!
//! Every frame in either direction is one UTF-8 JSON text frame.
//!
//! Inbound frames are tagged by `type`:
//!
//! ```json
//! {"type": "notice", "content": "<p>Hello</p>"}
//! {"type": "input-prompt", "content": "<input name='a'>", "can-go-back": true}
//! ```
//!
//! Outbound frames are tagged by `action`:
//!
//! ```json
//! {"action": "rewind"}
//! {"action": "send-input", "data": {"a": true, "b": "x"}}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProtocolError;

/// Message type names the dispatcher understands.
pub const KNOWN_MESSAGE_TYPES: &[&str] = &["notice", "input-prompt"];

/// A decoded server message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// Narrative or system text to append to the transcript.
    Notice { content: String },
    /// A form the user must answer.
    InputPrompt {
        content: String,
        #[serde(rename = "can-go-back", default, deserialize_with = "null_as_false")]
        can_go_back: bool,
    },
}

/// Servers may send `"can-go-back": null`; treat it like an absent flag.
fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Decode one inbound text frame.
///
/// Frames whose `type` is not one of [`KNOWN_MESSAGE_TYPES`] are reported as
/// [`ProtocolError::UnknownMessageType`] so the caller can tell them apart
/// from broken JSON.
pub fn decode_inbound(frame: &str) -> Result<InboundMessage, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(frame).map_err(ProtocolError::Malformed)?;
    match value.get("type").and_then(serde_json::Value::as_str) {
        Some(kind) if !KNOWN_MESSAGE_TYPES.contains(&kind) => {
            return Err(ProtocolError::UnknownMessageType(kind.to_owned()));
        }
        _ => {}
    }
    serde_json::from_value(value).map_err(ProtocolError::Malformed)
}

/// One collected form value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Bool(bool),
    Text(String),
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Field name → value map sent with `send-input`.
pub type InputValues = BTreeMap<String, InputValue>;

/// A client → server action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum OutboundAction {
    /// Step back to the previous prompt.
    Rewind,
    /// Answer the active prompt.
    SendInput { data: InputValues },
}

impl OutboundAction {
    /// Encode as a text frame.
    pub fn to_frame(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}
