//! Infrastructure layer
//!
//! Concrete implementations of the domain ports plus the wire codec.

pub mod codec;
pub mod dto;
pub mod fanout;
pub mod registry;
