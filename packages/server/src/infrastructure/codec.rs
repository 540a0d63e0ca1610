//! Envelope codec
//!
//! Translates between WebSocket text frames and domain envelopes.
//!
//! Inbound frames are classified by `kind` (or the legacy `type` field):
//!
//! | kind                       | result                      |
//! |----------------------------|-----------------------------|
//! | absent, `message`          | `InboundEnvelope::Message`  |
//! | `typing`, `notification`   | `InboundEnvelope::Typing`   |
//! | anything else              | `CodecError::UnknownKind`   |

use thiserror::Error;

use crate::domain::{Color, Envelope, InboundEnvelope, MessageContent};

use super::dto::websocket::{InboundFrame, OutboundFrame};

#[derive(Debug, Error)]
pub enum CodecError {
    /// Frame is not valid JSON or has fields of the wrong type
    #[error("malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Frame parsed but its kind is not one the relay understands
    #[error("unknown frame kind '{0}'")]
    UnknownKind(String),

    #[error("failed to serialize envelope: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Decode an inbound text frame
pub fn decode(text: &str) -> Result<InboundEnvelope, CodecError> {
    let frame: InboundFrame = serde_json::from_str(text).map_err(CodecError::Malformed)?;

    let color = frame
        .color()
        .and_then(|color| Color::new(color.to_string()).ok());

    match frame.kind.as_deref() {
        None | Some("message") => Ok(InboundEnvelope::Message {
            content: MessageContent::new(frame.content),
            color,
        }),
        Some("typing") | Some("notification") => Ok(InboundEnvelope::Typing {
            is_typing: frame.is_typing,
            color,
        }),
        Some(other) => Err(CodecError::UnknownKind(other.to_string())),
    }
}

/// Encode an envelope as an outbound text frame
pub fn encode(envelope: &Envelope) -> Result<String, CodecError> {
    serde_json::to_string(&OutboundFrame::from(envelope)).map_err(CodecError::Serialize)
}
