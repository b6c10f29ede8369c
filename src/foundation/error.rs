/// Convenience result type used across the public API.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error type for rendering, configuration, and prompt building.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid user input (empty template name, unfilled variables, bad aspect label).
    #[error("validation error: {0}")]
    Validation(String),

    /// The caption font could not be read or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Output image could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration file is malformed or out of range.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped foreign error with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CardError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CardError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CardError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
