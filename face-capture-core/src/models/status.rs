use std::fmt;

/// User-facing status line shown under the camera preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusMessage {
    Cleared,
    LoadingModels,
    ModelLoadFailed,
    CameraError,
    NoFace,
    LowLight,
    FaceReady,
    CaptureFailed,
}

impl StatusMessage {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Cleared => "",
            Self::LoadingModels => "Loading face detection models...",
            Self::ModelLoadFailed => "Failed to load face detection models",
            Self::CameraError => "Error accessing camera",
            Self::NoFace => "No face detected. Please show your face clearly.",
            Self::LowLight => "Face detected but lighting too low.",
            Self::FaceReady => "Face detected and clear. Capturing...",
            Self::CaptureFailed => "Capture failed. Please try again.",
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
