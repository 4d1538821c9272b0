//! # face-capture-core
//!
//! Live face-capture gating for selfie verification.
//!
//! Opens a camera stream, analyses frames one at a time for a detectable,
//! well-lit face, and takes exactly one capture after a fixed debounce,
//! releasing the camera on every exit path. Camera access, face detection,
//! and model loading are external collaborators behind traits, so hosts can
//! plug in platform backends and tests can substitute deterministic stubs.
//!
//! ## Architecture
//!
//! ```text
//! face-capture-core (this crate)
//! ├── traits/       ← CameraProvider, CameraStream, FaceDetector, FramePacer, ImageEncoder,
//! │                   CaptureDelegate, ModelLoader
//! ├── models/       ← CaptureError, CaptureState, CaptureConfiguration, Frame, DetectionResult,
//! │                   CapturedImage, StatusMessage
//! ├── processing/   ← luminance (LivenessEvaluator), JPEG encoding
//! └── session/      ← MediaSessionManager, FrameAnalysisLoop, CaptureCoordinator, ModelRegistry
//! ```
//!
//! All work runs on one cooperative control flow; a current-thread tokio
//! runtime is sufficient.

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::captured_image::{CaptureMetadata, CapturedImage};
pub use models::config::{CaptureConfiguration, FacingMode, MediaConstraints};
pub use models::detection::{BoundingBox, DetectionResult, Point};
pub use models::error::CaptureError;
pub use models::frame::Frame;
pub use models::state::CaptureState;
pub use models::status::StatusMessage;
pub use processing::jpeg::JpegFrameEncoder;
pub use processing::luminance::{luminance, LivenessEvaluator, LivenessScore};
pub use session::coordinator::{CaptureCoordinator, CaptureOutcome};
pub use session::frame_loop::{FrameAnalysisLoop, FrameVerdict, LoopControl, LoopExit};
pub use session::media::{MediaSessionManager, StreamHandle};
pub use session::model_registry::{capture_enabled, ModelRegistry, ModelsState};
pub use session::monitor::{SessionDiagnostics, SessionMonitor};
pub use session::pacer::RefreshPacer;
pub use traits::camera_provider::{CameraProvider, CameraStream};
pub use traits::capture_delegate::CaptureDelegate;
pub use traits::face_detector::FaceDetector;
pub use traits::frame_pacer::FramePacer;
pub use traits::image_encoder::ImageEncoder;
pub use traits::model_loader::{ModelArtifact, ModelLoader};
pub use tokio_util::sync::CancellationToken;
