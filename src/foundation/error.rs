/// Convenience result type used across dotwalk.
pub type DotwalkResult<T> = Result<T, DotwalkError>;

/// Error taxonomy for the hosting surfaces (layout, palettes, rasterizer, sinks).
///
/// The animation core itself has no failure path: completions for discarded dots are dropped,
/// never reported.
#[derive(thiserror::Error, Debug)]
pub enum DotwalkError {
    /// Invalid canvas, layout, timing or show-file data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown palette name or malformed color value.
    #[error("palette error: {0}")]
    Palette(String),

    /// Rasterizer failures such as surface size limits.
    #[error("render error: {0}")]
    Render(String),

    /// Failures while writing frames to PNG files or `ffmpeg`.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing show files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotwalkError {
    /// Build a [`DotwalkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotwalkError::Palette`] value.
    pub fn palette(msg: impl Into<String>) -> Self {
        Self::Palette(msg.into())
    }

    /// Build a [`DotwalkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DotwalkError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`DotwalkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DotwalkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
