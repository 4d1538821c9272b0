use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use face_capture_core::{
    BoundingBox, CaptureError, DetectionResult, FaceDetector, Frame, ModelArtifact, ModelLoader,
};

/// Stand-in for the face model: reports a face when the centre of the frame
/// is clearly brighter than its corner.
pub struct DemoDetector {
    latency: Duration,
}

impl DemoDetector {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn sample(frame: &Frame, x: u32, y: u32) -> u8 {
        let offset = ((y * frame.width() + x) * 4) as usize;
        frame.pixels().get(offset + 1).copied().unwrap_or(0)
    }
}

#[async_trait]
impl FaceDetector for DemoDetector {
    async fn detect(&self, frame: &Frame) -> Result<Option<DetectionResult>, CaptureError> {
        tokio::time::sleep(self.latency).await;

        if frame.is_empty() {
            return Ok(None);
        }
        let (w, h) = (frame.width(), frame.height());
        let centre = Self::sample(frame, w / 2, h / 2);
        let corner = Self::sample(frame, 0, 0);
        if centre.saturating_sub(corner) < 30 {
            return Ok(None);
        }

        let (w, h) = (w as f32, h as f32);
        Ok(Some(DetectionResult::face(
            BoundingBox {
                x: w * 0.3,
                y: h / 6.0,
                width: w * 0.4,
                height: h * 2.0 / 3.0,
            },
            Vec::new(),
            0.8,
        )))
    }
}

/// Pretends to fetch each model artifact.
pub struct DemoModelLoader;

#[async_trait]
impl ModelLoader for DemoModelLoader {
    async fn load(&self, artifact: ModelArtifact, location: &Path) -> Result<(), CaptureError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        log::debug!("loaded {} from {}", artifact.name(), location.display());
        Ok(())
    }
}
