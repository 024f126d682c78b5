//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, preflight + availability short-circuits)
//!     → request.rs (request ID generation/propagation)
//!     → [auth resolves the credential]
//!     → [relay forwards and classifies]
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRelayRequestId, X_REQUEST_ID};
pub use server::HttpServer;
