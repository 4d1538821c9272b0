use std::sync::Arc;

use async_trait::async_trait;

use crate::models::config::MediaConstraints;
use crate::models::error::CaptureError;
use crate::models::frame::Frame;

/// Interface for platform camera access.
///
/// `acquire` may prompt the user for camera permission. It fails with
/// [`CaptureError::PermissionDenied`] or [`CaptureError::DeviceNotAvailable`];
/// callers do not retry.
#[async_trait]
pub trait CameraProvider: Send + Sync {
    async fn acquire(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<Box<dyn CameraStream>, CaptureError>;
}

/// A live camera stream. Owned by exactly one capture session.
#[async_trait]
pub trait CameraStream: Send {
    /// Begin playback so frames become readable. May fail after the device
    /// was already opened; the stream must still be stopped in that case.
    async fn start(&mut self) -> Result<(), CaptureError>;

    /// The most recent frame, or `None` if nothing has been decoded yet.
    fn current_frame(&mut self) -> Option<Frame>;

    /// Stop every underlying track.
    fn stop(&mut self);

    /// Human-readable device label, for logs.
    fn label(&self) -> String;
}

#[async_trait]
impl<T: CameraProvider + ?Sized> CameraProvider for Arc<T> {
    async fn acquire(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<Box<dyn CameraStream>, CaptureError> {
        (**self).acquire(constraints).await
    }
}
