//! Value objects
//!
//! Validated wrappers around the primitive values exchanged with clients.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Nickname used for server-authored announcements.
pub const SYSTEM_NICKNAME: &str = "SERVER";

/// Display color of server announcements.
pub const SYSTEM_COLOR: &str = "#64BFFF";

/// Room assigned when a client does not ask for one.
pub const DEFAULT_ROOM: &str = "general";

/// Server-assigned client identifier (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a new random client ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name declared by a client at connect time
///
/// Must contain at least one non-whitespace character and must not be the
/// system nickname (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyNickname);
        }
        if trimmed.eq_ignore_ascii_case(SYSTEM_NICKNAME) {
            return Err(ValueObjectError::ReservedNickname(value));
        }
        Ok(Self(value))
    }

    /// Nickname of the server itself
    pub(crate) fn system() -> Self {
        Self(SYSTEM_NICKNAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a room (delivery scope)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyRoomName);
        }
        Ok(Self(value))
    }

    /// Room from an optional connect parameter; absent or blank means the default room
    pub fn or_default(value: Option<String>) -> Self {
        value
            .and_then(|value| Self::new(value).ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for RoomName {
    fn default() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display color chosen by a client (opaque to the server, usually `#RRGGBB`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyColor);
        }
        Ok(Self(value))
    }

    /// Color of server announcements
    pub(crate) fn system() -> Self {
        Self(SYSTEM_COLOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Color {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Text body of a chat message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for MessageContent {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for MessageContent {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}
