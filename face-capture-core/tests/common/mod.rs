//! Deterministic collaborators for capture session tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use face_capture_core::{
    BoundingBox, CameraProvider, CameraStream, CaptureDelegate, CaptureError, CaptureMetadata,
    CaptureState, DetectionResult, FaceDetector, Frame, ImageEncoder, MediaConstraints, Point,
    StatusMessage,
};

/// How the stub camera answers `acquire`.
#[derive(Clone)]
pub enum CameraBehavior {
    Grant,
    Deny,
    Unavailable,
    FailStart,
}

/// Counts acquisitions and stops across every stream the camera hands out.
#[derive(Default)]
pub struct CameraLog {
    pub acquires: AtomicUsize,
    pub stops: AtomicUsize,
    pub stopped_at: Mutex<Vec<Instant>>,
    pub last_constraints: Mutex<Option<MediaConstraints>>,
}

impl CameraLog {
    pub fn acquires(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

pub struct StubCamera {
    pub behavior: CameraBehavior,
    pub frame: Frame,
    pub log: Arc<CameraLog>,
    /// How long the permission prompt stays open before `acquire` answers.
    pub prompt_delay: Duration,
}

impl StubCamera {
    /// A camera showing a uniform grey frame with the given luminance.
    pub fn granting(level: u8) -> (Self, Arc<CameraLog>) {
        Self::with_behavior(CameraBehavior::Grant, level)
    }

    pub fn with_behavior(behavior: CameraBehavior, level: u8) -> (Self, Arc<CameraLog>) {
        let log = Arc::new(CameraLog::default());
        let camera = Self {
            behavior,
            frame: Frame::solid(64, 48, [level, level, level]),
            log: Arc::clone(&log),
            prompt_delay: Duration::ZERO,
        };
        (camera, log)
    }

    pub fn with_prompt_delay(mut self, delay: Duration) -> Self {
        self.prompt_delay = delay;
        self
    }
}

#[async_trait]
impl CameraProvider for StubCamera {
    async fn acquire(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<Box<dyn CameraStream>, CaptureError> {
        self.log.acquires.fetch_add(1, Ordering::SeqCst);
        *self.log.last_constraints.lock() = Some(constraints.clone());
        if !self.prompt_delay.is_zero() {
            tokio::time::sleep(self.prompt_delay).await;
        }
        match self.behavior {
            CameraBehavior::Deny => Err(CaptureError::PermissionDenied),
            CameraBehavior::Unavailable => Err(CaptureError::DeviceNotAvailable),
            CameraBehavior::Grant | CameraBehavior::FailStart => Ok(Box::new(StubStream {
                frame: self.frame.clone(),
                fail_start: matches!(self.behavior, CameraBehavior::FailStart),
                log: Arc::clone(&self.log),
            })),
        }
    }
}

struct StubStream {
    frame: Frame,
    fail_start: bool,
    log: Arc<CameraLog>,
}

#[async_trait]
impl CameraStream for StubStream {
    async fn start(&mut self) -> Result<(), CaptureError> {
        if self.fail_start {
            return Err(CaptureError::StreamStartFailed("playback rejected".into()));
        }
        Ok(())
    }

    fn current_frame(&mut self) -> Option<Frame> {
        Some(self.frame.clone())
    }

    fn stop(&mut self) {
        self.log.stops.fetch_add(1, Ordering::SeqCst);
        self.log.stopped_at.lock().push(Instant::now());
    }

    fn label(&self) -> String {
        "stub front camera".into()
    }
}

/// One scripted detector answer.
#[derive(Clone, Copy, Debug)]
pub enum Detection {
    Face,
    NotFound,
    Miss,
    Fail,
}

/// Detector that replays a script, then repeats `fallback` forever.
pub struct ScriptedDetector {
    script: Mutex<VecDeque<Detection>>,
    fallback: Detection,
    latency: Duration,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
    pub spans: Mutex<Vec<(Instant, Instant)>>,
}

impl ScriptedDetector {
    pub fn always(answer: Detection) -> Arc<Self> {
        Self::scripted(Vec::new(), answer, Duration::ZERO)
    }

    pub fn scripted(script: Vec<Detection>, fallback: Detection, latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            latency,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            spans: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FaceDetector for ScriptedDetector {
    async fn detect(&self, frame: &Frame) -> Result<Option<DetectionResult>, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        let started = Instant::now();

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.spans.lock().push((started, Instant::now()));

        let answer = self.script.lock().pop_front().unwrap_or(self.fallback);
        match answer {
            Detection::Face => Ok(Some(face_in(frame))),
            Detection::NotFound => Ok(Some(DetectionResult {
                found: false,
                ..face_in(frame)
            })),
            Detection::Miss => Ok(None),
            Detection::Fail => Err(CaptureError::DetectionFailed("model returned NaN".into())),
        }
    }
}

fn face_in(frame: &Frame) -> DetectionResult {
    let w = frame.width() as f32;
    let h = frame.height() as f32;
    DetectionResult::face(
        BoundingBox {
            x: w * 0.25,
            y: h * 0.2,
            width: w * 0.5,
            height: h * 0.6,
        },
        vec![
            Point { x: w * 0.4, y: h * 0.4 },
            Point { x: w * 0.6, y: h * 0.4 },
        ],
        0.93,
    )
}

/// Records every delegate callback.
#[derive(Default)]
pub struct RecordingDelegate {
    pub states: Mutex<Vec<CaptureState>>,
    pub statuses: Mutex<Vec<StatusMessage>>,
    pub errors: Mutex<Vec<CaptureError>>,
    pub finished: Mutex<Vec<CaptureMetadata>>,
}

impl RecordingDelegate {
    pub fn states(&self) -> Vec<CaptureState> {
        self.states.lock().clone()
    }

    pub fn count_status(&self, status: StatusMessage) -> usize {
        self.statuses.lock().iter().filter(|s| **s == status).count()
    }
}

impl CaptureDelegate for RecordingDelegate {
    fn on_state_changed(&self, state: &CaptureState) {
        self.states.lock().push(state.clone());
    }

    fn on_status(&self, status: StatusMessage) {
        self.statuses.lock().push(status);
    }

    fn on_error(&self, error: &CaptureError) {
        self.errors.lock().push(error.clone());
    }

    fn on_capture_finished(&self, metadata: &CaptureMetadata) {
        self.finished.lock().push(metadata.clone());
    }
}

pub struct FailingEncoder;

impl ImageEncoder for FailingEncoder {
    fn encode(&self, _frame: &Frame) -> Result<Vec<u8>, CaptureError> {
        Err(CaptureError::EncodingFailed("encoder unavailable".into()))
    }
}

/// Sleep in small steps until `condition` holds.
pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    while !condition() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}
