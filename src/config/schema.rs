//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the router and the
//! demo server. All types derive Serde traits for deserialization from
//! config files, and every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Response used when no route matches.
    pub not_found: NotFoundConfig,

    /// Access logging for routes and the not-found handler.
    pub access_log: AccessLogConfig,

    /// Reject patterns with empty or repeated capture names at registration.
    pub strict_patterns: bool,

    /// Listener settings for the hosting server.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Fallback response settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotFoundConfig {
    /// HTTP status code (must be 4xx or 5xx).
    pub status: u16,

    /// Plain-text response body.
    pub body: String,
}

impl Default for NotFoundConfig {
    fn default() -> Self {
        Self {
            status: 404,
            body: crate::http::handler::NOT_FOUND_BODY.to_string(),
        }
    }
}

/// Access log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessLogConfig {
    /// Wrap every route registered through the config-built router.
    pub enabled: bool,
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
