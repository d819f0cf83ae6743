//! Layered error definitions
//!
//! Categorized by source: config / payload / sink / teardown

use thiserror::Error;

use crate::Channel;

/// Unified error type
#[derive(Debug, Error)]
pub enum ViewError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Payload Errors =====
    /// Payload size/metadata mismatch; the payload is dropped, the channel's
    /// previous frame stays in the store
    #[error("format error on channel '{channel}': {message}")]
    Format { channel: Channel, message: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== Teardown Errors =====
    /// Sensor detach/stop failure; reported only, never invalidates the store
    #[error("teardown error on channel '{channel}': {message}")]
    Teardown { channel: Channel, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ViewError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create payload format error
    pub fn format(channel: Channel, message: impl Into<String>) -> Self {
        Self::Format {
            channel,
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create teardown error
    pub fn teardown(channel: Channel, message: impl Into<String>) -> Self {
        Self::Teardown {
            channel,
            message: message.into(),
        }
    }
}
