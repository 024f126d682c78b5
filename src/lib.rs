//! Reverse proxy for the Google Generative Language API.
//!
//! Accepts client requests, resolves an API credential from a prioritized
//! set of sources, forwards the request to the fixed upstream origin, and
//! relays the response (including long-lived `text/event-stream` responses)
//! back to the client with permissive CORS headers added.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod relay;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
