use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::models::captured_image::CapturedImage;
use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::state::CaptureState;
use crate::models::status::StatusMessage;
use crate::processing::jpeg::JpegFrameEncoder;
use crate::processing::luminance::LivenessEvaluator;
use crate::session::frame_loop::{FrameAnalysisLoop, FrameVerdict, LoopControl, LoopExit};
use crate::session::media::{MediaSessionManager, StreamHandle};
use crate::session::model_registry::ModelRegistry;
use crate::session::monitor::{CaptureSession, SessionMonitor, SessionWriter};
use crate::session::pacer::RefreshPacer;
use crate::traits::camera_provider::CameraProvider;
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::face_detector::FaceDetector;
use crate::traits::frame_pacer::FramePacer;
use crate::traits::image_encoder::ImageEncoder;

/// How a capture session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The selfie was taken; ownership passes to the caller.
    Completed(CapturedImage),
    Cancelled,
    Failed(CaptureError),
}

impl CaptureOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn into_image(self) -> Option<CapturedImage> {
        match self {
            Self::Completed(image) => Some(image),
            _ => None,
        }
    }
}

/// Drives one capture session at a time from camera acquisition to a
/// single debounced capture.
///
/// ```text
/// [CameraProvider] → StreamHandle → [FrameAnalysisLoop] → verdict
///                                        │  FaceDetector, LivenessEvaluator
///                                        ↓
///                          condition met → debounce → capture → release
/// ```
///
/// `run_session` takes `&mut self`, so a second session cannot start while
/// one is running. Every exit path (completion, cancellation, failure, or
/// the session future being dropped) releases the camera stream exactly once.
pub struct CaptureCoordinator<C: CameraProvider, D: FaceDetector> {
    media: MediaSessionManager<C>,
    detector: D,
    encoder: Box<dyn ImageEncoder>,
    evaluator: LivenessEvaluator,
    config: CaptureConfiguration,
    models: Option<ModelRegistry>,
    session: Arc<Mutex<CaptureSession>>,
    delegate: Option<Arc<dyn CaptureDelegate>>,
}

impl<C: CameraProvider, D: FaceDetector> CaptureCoordinator<C, D> {
    pub fn new(camera: C, detector: D, config: CaptureConfiguration) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;

        if config.brightness_threshold < 10.0 {
            log::warn!(
                "brightness threshold {} accepts almost any frame as well lit",
                config.brightness_threshold
            );
        }

        Ok(Self {
            media: MediaSessionManager::new(camera, config.media_constraints()),
            detector,
            encoder: Box::new(JpegFrameEncoder::new(config.jpeg_quality)),
            evaluator: LivenessEvaluator::new(config.brightness_threshold),
            config,
            models: None,
            session: Arc::new(Mutex::new(CaptureSession::new())),
            delegate: None,
        })
    }

    pub fn with_encoder(mut self, encoder: Box<dyn ImageEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Refuse to start sessions until `models` reports loaded.
    pub fn with_model_registry(mut self, models: ModelRegistry) -> Self {
        self.models = Some(models);
        self
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn CaptureDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn config(&self) -> &CaptureConfiguration {
        &self.config
    }

    pub fn monitor(&self) -> SessionMonitor {
        SessionMonitor::new(Arc::clone(&self.session))
    }

    pub fn state(&self) -> CaptureState {
        self.session.lock().state.clone()
    }

    /// Run one session, pacing frames at the configured refresh rate.
    pub async fn run_session(&mut self, cancel: CancellationToken) -> CaptureOutcome {
        let mut pacer = RefreshPacer::new(self.config.frame_interval());
        self.run_session_with_pacer(cancel, &mut pacer).await
    }

    pub async fn run_session_with_pacer(
        &mut self,
        cancel: CancellationToken,
        pacer: &mut dyn FramePacer,
    ) -> CaptureOutcome {
        if let Some(ref models) = self.models {
            if !models.is_loaded() {
                log::warn!("capture requested before face detection models loaded");
                return CaptureOutcome::Failed(CaptureError::ModelsNotLoaded);
            }
        }

        let writer = SessionWriter::new(Arc::clone(&self.session), self.delegate.clone());
        let session_id = writer.reset();
        let mut scope = SessionScope::new(writer.clone());
        log::info!("capture session {} opened", session_id);

        match self.drive(&writer, &mut scope, &cancel, pacer).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("capture session {} failed: {}", session_id, e);
                writer.report_error(&e);
                scope.teardown(CaptureState::Error(e.clone()));
                writer.set_status(if e.is_media_access() {
                    StatusMessage::CameraError
                } else {
                    StatusMessage::CaptureFailed
                });
                CaptureOutcome::Failed(e)
            }
        }
    }

    async fn drive(
        &self,
        writer: &SessionWriter,
        scope: &mut SessionScope,
        cancel: &CancellationToken,
        pacer: &mut dyn FramePacer,
    ) -> Result<CaptureOutcome, CaptureError> {
        writer.transition(CaptureState::Starting)?;
        writer.set_status(StatusMessage::Cleared);

        // An unfinished acquire owns no stream yet; one that completes is
        // released by the scope.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(scope.cancel()),
            acquired = self.media.acquire() => scope.attach(acquired?),
        }
        if cancel.is_cancelled() {
            return Ok(scope.cancel());
        }
        writer.transition(CaptureState::Active)?;

        let analysis = FrameAnalysisLoop::new(
            &self.detector,
            self.evaluator,
            self.monitor(),
            cancel.clone(),
        );
        let stream = scope.stream_mut().ok_or(CaptureError::FrameUnavailable)?;
        let exit = analysis
            .run(stream, pacer, |verdict| handle_verdict(writer, verdict))
            .await;
        match exit {
            LoopExit::Stopped => {}
            LoopExit::Cancelled | LoopExit::Halted => return Ok(scope.cancel()),
            LoopExit::Failed(e) => return Err(e),
        }

        // Single-shot debounce: dropped, and so invalidated, on cancellation.
        let entered = self.monitor().condition_met_at().unwrap_or_else(Instant::now);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(scope.cancel()),
            _ = sleep_until(entered + self.config.debounce()) => {}
        }
        if cancel.is_cancelled() {
            return Ok(scope.cancel());
        }

        writer.transition(CaptureState::Capturing)?;
        let frame = scope
            .stream_mut()
            .and_then(|s| s.current_frame())
            .ok_or(CaptureError::FrameUnavailable)?;
        let image = CapturedImage::new(self.encoder.encode(&frame)?, frame.width(), frame.height());

        scope.teardown(CaptureState::Completed);
        writer.set_status(StatusMessage::Cleared);

        let metadata = image.metadata();
        log::info!(
            "captured selfie {}x{} ({} bytes, sha256 {})",
            metadata.width,
            metadata.height,
            metadata.size_bytes,
            metadata.checksum
        );
        if let Some(delegate) = writer.delegate() {
            delegate.on_capture_finished(&metadata);
        }
        Ok(CaptureOutcome::Completed(image))
    }
}

fn handle_verdict(writer: &SessionWriter, verdict: FrameVerdict) -> Result<LoopControl, CaptureError> {
    writer.transition(CaptureState::Detecting)?;
    writer.record(|d| d.frames_analyzed += 1);

    match verdict {
        FrameVerdict::NoFace => {
            writer.set_status(StatusMessage::NoFace);
            Ok(LoopControl::Continue)
        }
        FrameVerdict::DetectorFailed(e) => {
            writer.record(|d| d.detection_failures += 1);
            writer.report_error(&e);
            writer.set_status(StatusMessage::NoFace);
            Ok(LoopControl::Continue)
        }
        FrameVerdict::LowLight(score) => {
            writer.record(|d| {
                d.faces_found += 1;
                d.low_light_frames += 1;
            });
            log::debug!("face found but luminance {:.2} is under threshold", score.value());
            writer.set_status(StatusMessage::LowLight);
            Ok(LoopControl::Continue)
        }
        FrameVerdict::Ready(score) => {
            writer.record(|d| d.faces_found += 1);
            writer.transition(CaptureState::ConditionMet)?;
            log::info!("face found with luminance {:.2}, capture armed", score.value());
            writer.set_status(StatusMessage::FaceReady);
            Ok(LoopControl::Stop)
        }
    }
}

/// Scoped owner of the session's camera stream.
///
/// [`teardown`](Self::teardown) is the single exit routine: it releases the
/// stream and moves the session to its final state, once. Dropping an open
/// scope tears down as cancelled.
struct SessionScope {
    writer: SessionWriter,
    stream: Option<StreamHandle>,
    closed: bool,
}

impl SessionScope {
    fn new(writer: SessionWriter) -> Self {
        Self {
            writer,
            stream: None,
            closed: false,
        }
    }

    fn attach(&mut self, stream: StreamHandle) {
        self.stream = Some(stream);
    }

    fn stream_mut(&mut self) -> Option<&mut StreamHandle> {
        self.stream.as_mut()
    }

    fn teardown(&mut self, final_state: CaptureState) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
        if let Err(e) = self.writer.transition(final_state) {
            log::error!("capture session teardown: {}", e);
        }
    }

    fn cancel(&mut self) -> CaptureOutcome {
        log::info!("capture session cancelled");
        self.teardown(CaptureState::Cancelled);
        self.writer.set_status(StatusMessage::Cleared);
        CaptureOutcome::Cancelled
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        if !self.closed {
            log::info!("capture session dropped while {}", self.writer.state().name());
            self.cancel();
        }
    }
}
