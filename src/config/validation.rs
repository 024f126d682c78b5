//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address and upstream origin actually parse
//! - Enforce the startup-credential requirement when enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidOrigin(String),
    UnsupportedOriginScheme(String),
    ZeroConnectTimeout,
    MissingStartupCredential,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address is not a socket address: {}", addr)
            }
            ValidationError::InvalidOrigin(origin) => {
                write!(f, "upstream.origin is not an absolute URL: {}", origin)
            }
            ValidationError::UnsupportedOriginScheme(scheme) => {
                write!(f, "upstream.origin scheme must be http or https, got: {}", scheme)
            }
            ValidationError::ZeroConnectTimeout => {
                write!(f, "upstream.connect_timeout_secs must be greater than zero")
            }
            ValidationError::MissingStartupCredential => write!(
                f,
                "credentials.require_at_startup is set but no default credential \
                 was provided (config file or {})",
                RelayConfig::DEFAULT_KEY_ENV
            ),
        }
    }
}

/// Semantic checks over a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.origin) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::UnsupportedOriginScheme(
            url.scheme().to_string(),
        )),
        Err(_) => errors.push(ValidationError::InvalidOrigin(
            config.upstream.origin.clone(),
        )),
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }

    if config.credentials.require_at_startup && config.credentials.default_key.is_none() {
        errors.push(ValidationError::MissingStartupCredential);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
