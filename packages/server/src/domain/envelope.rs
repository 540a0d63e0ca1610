//! Envelopes
//!
//! `Envelope` is what the fan-out delivers: every field is server
//! authoritative (sender identity, room, timestamp). `InboundEnvelope` is the
//! untrusted content a client may contribute before the server stamps it.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use super::{
    entity::{Author, ClientRecord},
    value_object::{Color, MessageContent, Nickname, RoomName},
};

/// Fan-out lane an envelope travels on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Chat,
    Typing,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Chat => f.write_str("chat"),
            Lane::Typing => f.write_str("typing"),
        }
    }
}

/// Chat message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from: Author,
    pub room: RoomName,
    pub content: MessageContent,
    pub sent_at: DateTime<FixedOffset>,
}

impl ChatMessage {
    /// Server-authored announcement
    pub fn announcement(
        room: RoomName,
        content: impl Into<MessageContent>,
        sent_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            from: Author::system(),
            room,
            content: content.into(),
            sent_at,
        }
    }

    /// "<nickname> connected" for the record's room
    pub fn joined(record: &ClientRecord, sent_at: DateTime<FixedOffset>) -> Self {
        Self::announcement(
            record.room.clone(),
            format!("{} connected", record.nickname),
            sent_at,
        )
    }

    /// "<nickname> disconnected" for the record's room
    pub fn left(record: &ClientRecord, sent_at: DateTime<FixedOffset>) -> Self {
        Self::announcement(
            record.room.clone(),
            format!("{} disconnected", record.nickname),
            sent_at,
        )
    }
}

/// Typing state change of one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingNotice {
    pub from: Nickname,
    pub room: RoomName,
    pub is_typing: bool,
}

impl TypingNotice {
    pub fn new(record: &ClientRecord, is_typing: bool) -> Self {
        Self {
            from: record.nickname.clone(),
            room: record.room.clone(),
            is_typing,
        }
    }
}

/// Unit of fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Message(ChatMessage),
    Typing(TypingNotice),
}

impl Envelope {
    /// Room whose members receive this envelope
    pub fn room(&self) -> &RoomName {
        match self {
            Envelope::Message(message) => &message.room,
            Envelope::Typing(notice) => &notice.room,
        }
    }

    pub fn lane(&self) -> Lane {
        match self {
            Envelope::Message(_) => Lane::Chat,
            Envelope::Typing(_) => Lane::Typing,
        }
    }
}

impl From<ChatMessage> for Envelope {
    fn from(message: ChatMessage) -> Self {
        Envelope::Message(message)
    }
}

impl From<TypingNotice> for Envelope {
    fn from(notice: TypingNotice) -> Self {
        Envelope::Typing(notice)
    }
}

/// Decoded inbound frame, before the server stamps identity and time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEnvelope {
    Message {
        content: MessageContent,
        color: Option<Color>,
    },
    Typing {
        is_typing: bool,
        color: Option<Color>,
    },
}

impl InboundEnvelope {
    /// Color the client advertised in `from.color`, if any
    pub fn color(&self) -> Option<&Color> {
        match self {
            InboundEnvelope::Message { color, .. } | InboundEnvelope::Typing { color, .. } => {
                color.as_ref()
            }
        }
    }

    pub fn lane(&self) -> Lane {
        match self {
            InboundEnvelope::Message { .. } => Lane::Chat,
            InboundEnvelope::Typing { .. } => Lane::Typing,
        }
    }

    /// Stamp sender identity, room and time taken from the registry record
    pub fn stamp(self, sender: &ClientRecord, sent_at: DateTime<FixedOffset>) -> Envelope {
        match self {
            InboundEnvelope::Message { content, .. } => Envelope::Message(ChatMessage {
                from: Author::from(sender),
                room: sender.room.clone(),
                content,
                sent_at,
            }),
            InboundEnvelope::Typing { is_typing, .. } => {
                Envelope::Typing(TypingNotice::new(sender, is_typing))
            }
        }
    }
}
