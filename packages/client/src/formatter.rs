//! Message formatting utilities for client display.

use roomcast_server::{domain::SYSTEM_NICKNAME, infrastructure::dto::websocket::OutboundFrame};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a frame received from the server
    ///
    /// # Arguments
    ///
    /// * `frame` - The decoded server frame
    /// * `me` - The current client's nickname (to mark own messages and hide own typing)
    ///
    /// # Returns
    ///
    /// `None` when nothing should be printed
    pub fn format_frame(frame: &OutboundFrame, me: &str) -> Option<String> {
        match frame {
            OutboundFrame::Message {
                from,
                content,
                sent_at,
            } if from.id.is_empty() && from.nickname == SYSTEM_NICKNAME => {
                Some(Self::format_announcement(content, sent_at))
            }
            OutboundFrame::Message {
                from,
                content,
                sent_at,
            } => Some(Self::format_chat_message(
                &from.nickname,
                from.nickname == me,
                content,
                sent_at,
            )),
            OutboundFrame::Typing { from, is_typing } if *is_typing && from != me => {
                Some(Self::format_typing(from))
            }
            OutboundFrame::Typing { .. } => None,
        }
    }

    /// Format a server announcement (join / leave)
    pub fn format_announcement(content: &str, sent_at: &str) -> String {
        format!("\n* {} ({})\n", content, sent_at)
    }

    /// Format a chat message
    pub fn format_chat_message(nickname: &str, is_me: bool, content: &str, sent_at: &str) -> String {
        let me_suffix = if is_me { " (me)" } else { "" };
        format!("\n[{}] {}{}: {}\n", sent_at, nickname, me_suffix, content)
    }

    /// Format a typing indicator
    pub fn format_typing(nickname: &str) -> String {
        format!("\n{} is typing...\n", nickname)
    }

    /// Format a frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }
}
