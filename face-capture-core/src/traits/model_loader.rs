use std::path::Path;

use async_trait::async_trait;

use crate::models::error::CaptureError;

/// Inference artifacts the capture UI depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelArtifact {
    /// Fast single-face detector.
    TinyFaceDetector,
    /// 68-point facial landmark predictor.
    FaceLandmark68,
}

impl ModelArtifact {
    pub const ALL: [ModelArtifact; 2] = [ModelArtifact::TinyFaceDetector, ModelArtifact::FaceLandmark68];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TinyFaceDetector => "tiny_face_detector",
            Self::FaceLandmark68 => "face_landmark_68",
        }
    }
}

/// Loads one model artifact from the models location.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, artifact: ModelArtifact, location: &Path) -> Result<(), CaptureError>;
}
