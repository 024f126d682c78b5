//! Request identity.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Propagate the ID onto the response for correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible so every log event can carry it
//! - Inbound `x-request-id` values are kept, not overwritten

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Name of the correlation header attached to every request and response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 request ID for requests that arrive without one.
#[derive(Clone, Copy, Default)]
pub struct MakeRelayRequestId;

impl MakeRequestId for MakeRelayRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
