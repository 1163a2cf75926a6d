// ABOUTME: In-panel message protocol: JSON envelopes with a `type` tag and optional `value`.
// ABOUTME: Decodes inbound panel messages into a closed enum and encodes outbound ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message sent from the panel script to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelMessage {
    /// The user picked a code block in the panel; insert it at the caret.
    CodeSelected(String),
    /// The user submitted a prompt from the panel text box.
    Prompt(String),
    /// Anything else. Carries the `type` tag when one was present.
    Unrecognized { kind: Option<String> },
}

/// Raw wire shape shared by every panel message.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    value: Option<Value>,
}

impl PanelMessage {
    /// Decode a JSON envelope. Never fails: malformed input becomes `Unrecognized`.
    ///
    /// A missing or non-string `value` is read as the empty string.
    pub fn from_value(raw: &Value) -> Self {
        let envelope = match Envelope::deserialize(raw) {
            Ok(envelope) => envelope,
            Err(_) => return PanelMessage::Unrecognized { kind: None },
        };

        let value = envelope
            .value
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match envelope.kind.as_deref() {
            Some("codeSelected") => PanelMessage::CodeSelected(value),
            Some("prompt") => PanelMessage::Prompt(value),
            _ => PanelMessage::Unrecognized {
                kind: envelope.kind,
            },
        }
    }
}

/// Message posted from the controller into the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Render a chat response in the panel's response area.
    AddResponse(String),
}
