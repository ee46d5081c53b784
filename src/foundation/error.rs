/// Crate-wide result alias.
pub type HoloprismResult<T> = Result<T, HoloprismError>;

/// Error kinds raised by the hologram pipeline.
///
/// The compositor itself never surfaces these to its caller (it degrades to a
/// black canvas instead); they appear at the decode, service, and slot
/// boundaries.
#[derive(thiserror::Error, Debug)]
pub enum HoloprismError {
    /// Malformed input: zero-dimension image, mask/source size mismatch.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// An intermediate raster transform failed.
    #[error("transform error: {0}")]
    Transform(String),

    /// An upstream collaborator (inpaint/matte service) failed.
    #[error("service error: {0}")]
    Service(String),

    /// Slot manifest (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Transparent passthrough for wrapped errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HoloprismError {
    /// Build a [`HoloprismError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HoloprismError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`HoloprismError::Transform`].
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Build a [`HoloprismError::Service`].
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Build a [`HoloprismError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
