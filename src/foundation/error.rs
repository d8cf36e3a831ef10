/// Convenience result type used across Hoshizora.
pub type HoshizoraResult<T> = Result<T, HoshizoraError>;

/// Top-level error taxonomy used by the compositing pipeline.
#[derive(thiserror::Error, Debug)]
pub enum HoshizoraError {
    /// Invalid configuration, geometry or buffer shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// An input layer could not be loaded as an 8-bit grayscale image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The output raster could not be created, written or finalized.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HoshizoraError {
    /// Build a [`HoshizoraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HoshizoraError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`HoshizoraError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
