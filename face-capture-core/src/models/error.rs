use thiserror::Error;

/// Errors that can occur during a face capture session.
///
/// Per-frame conditions (no face, low light) are not errors; they surface as
/// [`StatusMessage`](super::status::StatusMessage) values instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera device not available")]
    DeviceNotAvailable,

    #[error("camera stream failed to start: {0}")]
    StreamStartFailed(String),

    #[error("face detection failed: {0}")]
    DetectionFailed(String),

    #[error("face detection models not loaded")]
    ModelsNotLoaded,

    #[error("model load failed: {0}")]
    ModelLoadFailed(String),

    #[error("no frame available for capture")]
    FrameUnavailable,

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),
}

impl CaptureError {
    /// Whether this error means the camera could not be obtained or started.
    ///
    /// These are fatal to the current attempt only; the user may reopen the
    /// capture modal to retry.
    pub fn is_media_access(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::DeviceNotAvailable | Self::StreamStartFailed(_)
        )
    }
}
