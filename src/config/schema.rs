//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream origin and dispatch policy.
    pub upstream: UpstreamConfig,

    /// Credential sources and validation.
    pub credentials: CredentialConfig,

    /// Relay behavior toggles.
    pub relay: RelayPolicyConfig,
}

impl RelayConfig {
    /// Environment variable supplying the process-wide default credential.
    pub const DEFAULT_KEY_ENV: &'static str = "GEMINI_API_KEY";

    /// Fill the default credential from the environment when the config
    /// file left it unset.
    pub fn apply_env(&mut self) {
        if self.credentials.default_key.is_none() {
            if let Ok(key) = std::env::var(Self::DEFAULT_KEY_ENV) {
                if !key.is_empty() {
                    self.credentials.default_key = Some(key);
                }
            }
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Upstream origin and dispatch policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Fixed origin all requests are forwarded to. The caller-supplied path
    /// (normalized) selects the resource under this origin.
    pub origin: String,

    /// Upstream connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Force `Accept-Encoding: identity` upstream so responses are never
    /// compressed in a way the relay would have to re-frame mid-stream.
    pub force_identity_encoding: bool,

    /// Path substrings marking streaming generation endpoints. Responses
    /// from matching paths are relayed incrementally even before the
    /// Content-Type is consulted.
    pub stream_path_markers: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "https://generativelanguage.googleapis.com".to_string(),
            connect_timeout_secs: 10,
            force_identity_encoding: true,
            stream_path_markers: vec!["streamGenerateContent".to_string()],
        }
    }
}

/// Credential sources and validation.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CredentialConfig {
    /// Process-wide fallback credential, the lowest-priority source.
    /// Usually supplied via `GEMINI_API_KEY` rather than the config file.
    pub default_key: Option<String>,

    /// Validate resolved credentials against the Google API key format
    /// (`AIza` followed by 35 URL-safe characters) before dispatch.
    pub strict_format: bool,

    /// Refuse to start without a default credential configured. Off by
    /// default: per-request sources can supply the credential instead.
    pub require_at_startup: bool,
}

/// Relay behavior toggles.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayPolicyConfig {
    /// Include raw transport error text in 500 responses. Diagnostics only;
    /// keep off when untrusted callers can reach the relay.
    pub expose_upstream_errors: bool,
}
