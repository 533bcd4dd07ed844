/// Convenience result type used across barmill.
pub type BarmillResult<T> = Result<T, BarmillError>;

/// Failure reported by a symbology encoding engine.
///
/// Engines build this value themselves; the render pipeline forwards it untouched through
/// [`BarmillError::Encoding`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EncodingError {
    message: String,
}

impl EncodingError {
    /// Build an engine error from its textual description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The engine's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Top-level error taxonomy used by the rendering entry points.
#[derive(thiserror::Error, Debug)]
pub enum BarmillError {
    /// A required option (`bcid` or `text`) was absent or empty.
    #[error("missing field: bar code {0} not specified")]
    MissingField(&'static str),

    /// The canvas entry point could not resolve a drawable surface from its arguments.
    #[error("invalid surface reference: {0}")]
    InvalidSurfaceReference(String),

    /// The encoding engine rejected the symbology, payload, or parameters.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Invalid drawing state or sink input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BarmillError {
    /// Build a [`BarmillError::MissingField`] value.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Build a [`BarmillError::InvalidSurfaceReference`] value.
    pub fn invalid_surface(msg: impl Into<String>) -> Self {
        Self::InvalidSurfaceReference(msg.into())
    }

    /// Build a [`BarmillError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return the engine error if this failure came from the encoding engine.
    pub fn as_encoding(&self) -> Option<&EncodingError> {
        match self {
            Self::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
