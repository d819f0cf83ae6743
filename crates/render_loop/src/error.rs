//! Render loop error types

use thiserror::Error;

/// Render-loop-specific errors
#[derive(Debug, Error)]
pub enum RenderLoopError {
    /// Sink creation error
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// No layouts configured for cycling
    #[error("render loop needs at least one layout")]
    NoLayouts,

    /// Contract-level error
    #[error("view error: {0}")]
    Contract(#[from] contracts::ViewError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderLoopError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
