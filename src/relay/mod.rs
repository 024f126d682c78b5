//! Forwarding relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request parts + resolved credential
//!     → path.rs (slash normalization)
//!     → headers.rs (outbound forwarding policy)
//!     → forward.rs (target URL, dispatch, response classification)
//!     → headers.rs (response relay policy: CORS overlay, framing strip)
//!     → streamed or buffered response to the caller
//! ```
//!
//! # Design Decisions
//! - Upstream status codes are relayed verbatim, including non-2xx
//! - `text/event-stream` bodies are forwarded chunk-by-chunk in arrival
//!   order; JSON bodies are buffered once so error payloads can be logged
//! - The relay holds no per-request state; one `Relay` serves all requests

pub mod forward;
pub mod headers;
pub mod path;

pub use forward::{Relay, RelayBuildError, ResponseKind};
