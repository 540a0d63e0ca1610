//! Terminal client for the Roomcast chat relay.

pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
pub use session::ClientOptions;
