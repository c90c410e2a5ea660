//! Error types and result aliases for the facesim pipeline.

/// Main error type for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// I/O errors (missing or unreadable image/model files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding errors (file is not a decodable image)
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Inference engine errors (malformed model file, runtime failures)
    #[error("Inference error: {0}")]
    Inference(#[from] ort::Error),

    /// Tensor shape problems (model input not 4-D, wrong channel count)
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ort::Error<ort::session::builder::SessionBuilder>> for AppError {
    fn from(err: ort::Error<ort::session::builder::SessionBuilder>) -> Self {
        AppError::Inference(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
