mod http;
mod websocket;

pub use http::{clients, get_rooms, health_check};
pub use websocket::websocket_handler;
