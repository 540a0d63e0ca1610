//! Utilities shared by the Roomcast server and client binaries.

pub mod logger;
pub mod time;
