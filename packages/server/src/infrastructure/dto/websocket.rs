//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Frame sent by a client
///
/// Only `kind`, `content`, `isTyping` and `from.color` are read; any
/// identity in `from` is ignored by the server. `type` is accepted in place
/// of `kind`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundFrame {
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub from: Option<serde_json::Value>,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "isTyping")]
    pub is_typing: bool,
}

impl InboundFrame {
    /// `from.color` when `from` is an object carrying a string color
    pub fn color(&self) -> Option<&str> {
        self.from
            .as_ref()
            .and_then(|from| from.get("color"))
            .and_then(serde_json::Value::as_str)
    }
}

/// Sender identity on an outbound chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDto {
    #[serde(default)]
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub color: String,
}

/// Frame sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutboundFrame {
    Message {
        from: AuthorDto,
        content: String,
        #[serde(rename = "sentAt")]
        sent_at: String,
    },
    Typing {
        from: String,
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
}
