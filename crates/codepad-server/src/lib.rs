//! HTTP API for the Codepad backend.
//!
//! Every route is independent: it either forwards a templated prompt to the
//! inference gateway, touches the project store, or builds a zip export.

pub mod error;
mod handlers;
pub mod protocol;
pub mod server;

pub use error::{ApiError, ServerError};
pub use server::{AppState, CodepadServer};
