//! Error types for the decoration engine.

use thiserror::Error;

/// Errors raised while painting or reshaping a frame.
///
/// Geometry, layout and hit-testing never fail; only requests that reach the
/// windowing system can.
#[derive(Debug, Error)]
pub enum DecorError {
    /// A server-side surface could not be allocated. The affected paint step is
    /// skipped and retried on the next repaint.
    #[error("could not allocate {what}")]
    Allocation { what: &'static str },

    /// A request to the windowing system failed.
    #[error("backend request failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The decoration config could not be parsed.
    #[error("invalid decoration config: {0}")]
    Config(String),
}

impl DecorError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }

    /// Whether this error only affects the current paint step.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::Allocation { .. })
    }
}

pub type Result<T> = std::result::Result<T, DecorError>;
