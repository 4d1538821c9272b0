use std::sync::Arc;

use async_trait::async_trait;

use crate::models::detection::DetectionResult;
use crate::models::error::CaptureError;
use crate::models::frame::Frame;

/// Pluggable face detection backend (face detector + landmark model).
///
/// Latency is unbounded; the frame loop awaits each call without a timeout.
/// `Ok(None)`, a result with `found == false`, and `Err(_)` all mean
/// "no face this frame" to the caller.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    async fn detect(&self, frame: &Frame) -> Result<Option<DetectionResult>, CaptureError>;
}

#[async_trait]
impl<T: FaceDetector + ?Sized> FaceDetector for Arc<T> {
    async fn detect(&self, frame: &Frame) -> Result<Option<DetectionResult>, CaptureError> {
        (**self).detect(frame).await
    }
}
