//! Domain errors

use thiserror::Error;

use super::{envelope::Lane, value_object::ClientId};

/// Validation errors raised by value object constructors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("nickname must not be empty")]
    EmptyNickname,

    #[error("nickname '{0}' is reserved")]
    ReservedNickname(String),

    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("color must not be empty")]
    EmptyColor,
}

/// Registry mutation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same connection was registered twice
    #[error("client '{0}' is already registered")]
    DuplicateClient(ClientId),

    /// Another live client in the room already uses this nickname
    #[error("nickname '{nickname}' is already in use in room '{room}'")]
    NicknameTaken { nickname: String, room: String },
}

/// Errors returned when an envelope cannot be queued for fan-out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("{0} fan-out lane is closed")]
    LaneClosed(Lane),
}
