//! Credential resolution subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (headers + query)
//!     → resolver.rs (prioritized source scan)
//!     → ResolvedCredential (token + which source supplied it)
//!     → relay (applied as the upstream `key` query parameter)
//! ```
//!
//! # Design Decisions
//! - First matching source wins; later sources are never consulted
//! - The default credential is injected configuration, not a global
//! - Tokens never appear in Debug output or log events

pub mod resolver;

pub use resolver::{Credential, CredentialResolver, CredentialSource, ResolvedCredential};
