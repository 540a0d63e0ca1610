//! Conversion logic between DTOs and domain entities.

use roomcast_shared::time::format_sent_at;

use crate::domain::{Author, ClientRecord, Envelope, RoomSummary};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Author> for dto::AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.map(|id| id.to_string()).unwrap_or_default(),
            nickname: author.nickname.as_str().to_string(),
            color: author
                .color
                .as_ref()
                .map(|color| color.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<&Envelope> for dto::OutboundFrame {
    fn from(envelope: &Envelope) -> Self {
        match envelope {
            Envelope::Message(message) => Self::Message {
                from: (&message.from).into(),
                content: message.content.as_str().to_string(),
                sent_at: format_sent_at(&message.sent_at),
            },
            Envelope::Typing(notice) => Self::Typing {
                from: notice.from.as_str().to_string(),
                is_typing: notice.is_typing,
            },
        }
    }
}

impl From<&ClientRecord> for http::ClientDto {
    fn from(record: &ClientRecord) -> Self {
        Self {
            id: record.id.to_string(),
            nickname: record.nickname.as_str().to_string(),
            color: record
                .color
                .as_ref()
                .map(|color| color.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<RoomSummary> for http::RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            room: summary.room.into_string(),
            members: summary.members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, Color, Nickname, RoomName, TypingNotice};
    use roomcast_shared::time::{Clock, FixedClock};

    fn alice() -> ClientRecord {
        let mut record = ClientRecord::new(
            Nickname::new("alice".to_string()).unwrap(),
            RoomName::default(),
        );
        record.color = Some(Color::new("#abcdef".to_string()).unwrap());
        record
    }

    #[test]
    fn test_system_author_to_dto() {
        // テスト項目: サーバー名義の送信者は id が空文字になる
        let dto: dto::AuthorDto = (&Author::system()).into();
        assert_eq!(dto.id, "");
        assert_eq!(dto.nickname, "SERVER");
        assert_eq!(dto.color, "#64BFFF");
    }

    #[test]
    fn test_chat_message_to_dto() {
        // テスト項目: チャットメッセージの DTO には整形済みの sentAt が入る
        // given (前提条件): 2023-01-01 00:00:00 UTC
        let record = alice();
        let sent_at = FixedClock::from_unix_millis(1_672_531_200_000).now();
        let envelope = Envelope::Message(ChatMessage {
            from: Author::from(&record),
            room: record.room.clone(),
            content: "hi".into(),
            sent_at,
        });

        // when (操作):
        let frame: dto::OutboundFrame = (&envelope).into();

        // then (期待する結果):
        assert_eq!(
            frame,
            dto::OutboundFrame::Message {
                from: dto::AuthorDto {
                    id: record.id.to_string(),
                    nickname: "alice".to_string(),
                    color: "#abcdef".to_string(),
                },
                content: "hi".to_string(),
                sent_at: "01-01-2023 00:00:00".to_string(),
            }
        );
    }

    #[test]
    fn test_typing_notice_to_dto() {
        let envelope = Envelope::Typing(TypingNotice::new(&alice(), false));
        let frame: dto::OutboundFrame = (&envelope).into();
        assert_eq!(
            frame,
            dto::OutboundFrame::Typing {
                from: "alice".to_string(),
                is_typing: false,
            }
        );
    }

    #[test]
    fn test_client_record_to_dto() {
        let mut record = alice();
        record.color = None;
        let dto: http::ClientDto = (&record).into();
        assert_eq!(dto.id, record.id.to_string());
        assert_eq!(dto.nickname, "alice");
        assert_eq!(dto.color, "");
    }
}
