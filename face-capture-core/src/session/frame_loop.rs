use tokio_util::sync::CancellationToken;

use crate::models::error::CaptureError;
use crate::models::frame::Frame;
use crate::processing::luminance::{LivenessEvaluator, LivenessScore};
use crate::session::media::StreamHandle;
use crate::session::monitor::SessionMonitor;
use crate::traits::face_detector::FaceDetector;
use crate::traits::frame_pacer::FramePacer;

/// What one analysed frame showed.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameVerdict {
    NoFace,
    /// The detector failed; treated as no face for this frame.
    DetectorFailed(CaptureError),
    LowLight(LivenessScore),
    Ready(LivenessScore),
}

/// Returned by the verdict handler to keep the loop going or end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Why the loop returned.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopExit {
    /// The verdict handler asked to stop.
    Stopped,
    /// The cancellation token fired.
    Cancelled,
    /// The session left the live states, or capture began.
    Halted,
    /// The verdict handler failed.
    Failed(CaptureError),
}

/// Cooperative per-frame scheduler.
///
/// Each iteration checks for cancellation, reads the stream's current frame,
/// awaits exactly one detection call, scores the frame if a face was found,
/// hands the verdict to the caller, then waits for the next display refresh.
/// Detection calls never overlap: the next iteration cannot begin until the
/// previous call has resolved.
pub struct FrameAnalysisLoop<'a, D: FaceDetector + ?Sized> {
    detector: &'a D,
    evaluator: LivenessEvaluator,
    monitor: SessionMonitor,
    cancel: CancellationToken,
}

impl<'a, D: FaceDetector + ?Sized> FrameAnalysisLoop<'a, D> {
    pub fn new(
        detector: &'a D,
        evaluator: LivenessEvaluator,
        monitor: SessionMonitor,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            detector,
            evaluator,
            monitor,
            cancel,
        }
    }

    pub async fn run<F>(
        &self,
        stream: &mut StreamHandle,
        pacer: &mut dyn FramePacer,
        mut on_verdict: F,
    ) -> LoopExit
    where
        F: FnMut(FrameVerdict) -> Result<LoopControl, CaptureError>,
    {
        loop {
            if self.cancel.is_cancelled() {
                return LoopExit::Cancelled;
            }
            if !self.monitor.state().is_live() || self.monitor.is_capturing() {
                return LoopExit::Halted;
            }

            match stream.current_frame() {
                Some(frame) => {
                    let verdict = self.analyze(&frame).await;

                    // The call was allowed to finish; its result is dropped if
                    // the session moved on while it was in flight.
                    if self.cancel.is_cancelled() {
                        log::debug!("discarding detection result after cancellation");
                        return LoopExit::Cancelled;
                    }
                    if !self.monitor.state().is_live() {
                        return LoopExit::Halted;
                    }

                    match on_verdict(verdict) {
                        Ok(LoopControl::Continue) => {}
                        Ok(LoopControl::Stop) => return LoopExit::Stopped,
                        Err(e) => return LoopExit::Failed(e),
                    }
                }
                None => log::trace!("stream {} has no frame yet", stream.id()),
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return LoopExit::Cancelled,
                _ = pacer.next_frame() => {}
            }
        }
    }

    /// Detect, then score brightness only if a face was found.
    pub async fn analyze(&self, frame: &Frame) -> FrameVerdict {
        match self.detector.detect(frame).await {
            Ok(Some(detection)) if detection.found => {
                let score = self.evaluator.evaluate(frame);
                if self.evaluator.is_well_lit(score) {
                    FrameVerdict::Ready(score)
                } else {
                    FrameVerdict::LowLight(score)
                }
            }
            Ok(_) => FrameVerdict::NoFace,
            Err(e) => {
                log::warn!("face detection failed, treating frame as empty: {}", e);
                FrameVerdict::DetectorFailed(e)
            }
        }
    }
}
