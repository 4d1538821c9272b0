use crate::models::config::MediaConstraints;
use crate::models::error::CaptureError;
use crate::models::frame::Frame;
use crate::traits::camera_provider::{CameraProvider, CameraStream};

/// Acquires and releases the camera stream for capture sessions.
pub struct MediaSessionManager<C: CameraProvider> {
    provider: C,
    constraints: MediaConstraints,
}

impl<C: CameraProvider> MediaSessionManager<C> {
    pub fn new(provider: C, constraints: MediaConstraints) -> Self {
        Self {
            provider,
            constraints,
        }
    }

    pub fn constraints(&self) -> &MediaConstraints {
        &self.constraints
    }

    /// Open the camera and start playback.
    ///
    /// If playback fails after the device was opened, the partially set up
    /// stream is released before the error is returned.
    pub async fn acquire(&self) -> Result<StreamHandle, CaptureError> {
        let stream = self
            .provider
            .acquire(&self.constraints)
            .await
            .inspect_err(|e| log::warn!("camera acquisition failed: {}", e))?;

        let mut handle = StreamHandle::new(stream);
        log::info!("acquired camera stream {} ({})", handle.id(), handle.label());

        if let Some(stream) = handle.stream.as_mut() {
            if let Err(e) = stream.start().await {
                log::warn!("camera stream {} failed to start: {}", handle.id(), e);
                handle.release();
                return Err(e);
            }
        }
        Ok(handle)
    }

    /// Stop all tracks of `handle`. Idempotent.
    pub fn release(&self, handle: &mut StreamHandle) {
        handle.release();
    }
}

/// Exclusive ownership of a live camera stream.
///
/// The stream is stopped exactly once: by the first [`release`](Self::release)
/// call, or on drop if it was never released explicitly.
pub struct StreamHandle {
    id: uuid::Uuid,
    label: String,
    stream: Option<Box<dyn CameraStream>>,
}

impl StreamHandle {
    pub fn new(stream: Box<dyn CameraStream>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            label: stream.label(),
            stream: Some(stream),
        }
    }

    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_released(&self) -> bool {
        self.stream.is_none()
    }

    /// The frame currently shown by the stream. `None` once released.
    pub fn current_frame(&mut self) -> Option<Frame> {
        self.stream.as_mut().and_then(|s| s.current_frame())
    }

    /// Returns `true` if this call stopped the stream, `false` if it was
    /// already released.
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(mut stream) => {
                stream.stop();
                log::info!("released camera stream {}", self.id);
                true
            }
            None => false,
        }
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("released", &self.is_released())
            .finish()
    }
}
