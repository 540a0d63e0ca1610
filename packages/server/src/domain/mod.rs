//! Domain layer
//!
//! Value objects, entities and envelopes of the chat relay, together with
//! the ports (`ClientRegistry`, `EnvelopePublisher`) that the use-case layer
//! depends on. Concrete implementations live in the infrastructure layer.

pub mod entity;
pub mod envelope;
pub mod error;
pub mod publisher;
pub mod registry;
pub mod value_object;

pub use entity::{Author, ClientRecord, RoomSummary};
pub use envelope::{ChatMessage, Envelope, InboundEnvelope, Lane, TypingNotice};
pub use error::{PublishError, RegistryError, ValueObjectError};
pub use publisher::EnvelopePublisher;
pub use registry::{ClientRegistry, PusherChannel, RoomVisitor};
pub use value_object::{
    ClientId, Color, DEFAULT_ROOM, MessageContent, Nickname, RoomName, SYSTEM_NICKNAME,
};
