use thiserror::Error;

/// Camera subsystem errors.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("device acquisition failed: {0}")]
    DeviceAcquisition(String),

    #[error("camera reports invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("snapshot encoding failed: {0}")]
    Encoding(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CameraError>;
