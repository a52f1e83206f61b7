/// Convenience result type used across roundmask.
pub type MaskResult<T> = Result<T, MaskError>;

/// Top-level error taxonomy used by the masking APIs.
///
/// Evaluating a fragment never fails; errors come from validating configuration, resolving
/// descriptors by index, and the raster/CLI tooling around the evaluator.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Invalid user-provided masking configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A descriptor index that does not resolve to a stored record.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Errors while evaluating or rasterizing masked output.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskError {
    /// Build a [`MaskError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`MaskError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MaskError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MaskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
