/// Convenience result type used across flagreel.
pub type FlagreelResult<T> = Result<T, FlagreelError>;

/// Top-level error taxonomy used by generator, compositor and sink APIs.
#[derive(thiserror::Error, Debug)]
pub enum FlagreelError {
    /// A locale code that is empty once separators are stripped.
    #[error("invalid locale code: {0}")]
    InvalidCode(String),

    /// Nothing is left to render after filtering.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A drawing-surface or rasterization step failed.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame sink failed to open, accept a frame, or finalize.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlagreelError {
    /// Build a [`FlagreelError::InvalidCode`] value.
    pub fn invalid_code(msg: impl Into<String>) -> Self {
        Self::InvalidCode(msg.into())
    }

    /// Build a [`FlagreelError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`FlagreelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FlagreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlagreelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
