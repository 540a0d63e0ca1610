//! Entities
//!
//! `ClientRecord` is the registry's view of one connected peer. `Author` is
//! the identity stamped on outbound chat messages.

use super::value_object::{ClientId, Color, Nickname, RoomName};

/// Identity and session state of one connected client
///
/// `id`, `nickname` and `room` are fixed for the connection's lifetime.
/// `color` starts unset and is adopted from the first inbound frame that
/// carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub id: ClientId,
    pub nickname: Nickname,
    pub color: Option<Color>,
    pub room: RoomName,
}

impl ClientRecord {
    /// Create a record for a freshly handshaken connection
    pub fn new(nickname: Nickname, room: RoomName) -> Self {
        Self {
            id: ClientId::generate(),
            nickname,
            color: None,
            room,
        }
    }

    /// Set the color unless one was already adopted
    ///
    /// Returns `true` when the record changed.
    pub fn adopt_color(&mut self, color: Color) -> bool {
        if self.color.is_some() {
            return false;
        }
        self.color = Some(color);
        true
    }
}

/// Sender identity attached to a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// `None` for server announcements
    pub id: Option<ClientId>,
    pub nickname: Nickname,
    pub color: Option<Color>,
}

impl Author {
    /// The server itself
    pub fn system() -> Self {
        Self {
            id: None,
            nickname: Nickname::system(),
            color: Some(Color::system()),
        }
    }

    pub fn is_system(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&ClientRecord> for Author {
    fn from(record: &ClientRecord) -> Self {
        Self {
            id: Some(record.id),
            nickname: record.nickname.clone(),
            color: record.color.clone(),
        }
    }
}

/// Room name and number of connected members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: RoomName,
    pub members: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::SYSTEM_COLOR;

    fn record(nickname: &str) -> ClientRecord {
        ClientRecord::new(
            Nickname::new(nickname.to_string()).unwrap(),
            RoomName::default(),
        )
    }

    #[test]
    fn test_new_record_has_no_color() {
        let alice = record("alice");
        assert!(alice.color.is_none());
        assert_eq!(alice.room.as_str(), "general");
    }

    #[test]
    fn test_adopt_color_is_forward_only() {
        // テスト項目: 色は最初の一度だけ設定され、以降は変わらない
        // given (前提条件):
        let mut alice = record("alice");

        // when (操作):
        let first = alice.adopt_color(Color::new("#111111".to_string()).unwrap());
        let second = alice.adopt_color(Color::new("#222222".to_string()).unwrap());

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(alice.color.unwrap().as_str(), "#111111");
    }

    #[test]
    fn test_system_author() {
        let author = Author::system();
        assert!(author.is_system());
        assert_eq!(author.nickname.as_str(), "SERVER");
        assert_eq!(author.color.unwrap().as_str(), SYSTEM_COLOR);
    }

    #[test]
    fn test_author_from_record() {
        let alice = record("alice");
        let author = Author::from(&alice);
        assert_eq!(author.id, Some(alice.id));
        assert_eq!(author.nickname, alice.nickname);
        assert!(!author.is_system());
    }
}
