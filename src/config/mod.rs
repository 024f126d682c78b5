//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → apply_env (default credential from GEMINI_API_KEY)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to the server and relay
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so an empty config file is valid
//! - Validation separates syntactic (serde) from semantic checks
//! - The default credential is usually environment-fed, never logged

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::CredentialConfig;
pub use schema::ListenerConfig;
pub use schema::RelayConfig;
pub use schema::RelayPolicyConfig;
pub use schema::UpstreamConfig;
