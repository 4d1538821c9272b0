//! Frame brightness scoring for the liveness gate.
//!
//! Luminance uses the Rec. 709 coefficients on the raw 8-bit channel values
//! (no gamma linearisation), averaged over every pixel in the frame.

use crate::models::frame::{Frame, BYTES_PER_PIXEL};

const LUMA_RED: f64 = 0.2126;
const LUMA_GREEN: f64 = 0.7152;
const LUMA_BLUE: f64 = 0.0722;

/// Average perceptual luminance of a frame, in 0.0–255.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LivenessScore(f64);

impl LivenessScore {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Scores frames and decides whether they are lit well enough to capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivenessEvaluator {
    brightness_threshold: f64,
}

impl LivenessEvaluator {
    pub fn new(brightness_threshold: f64) -> Self {
        Self {
            brightness_threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.brightness_threshold
    }

    pub fn evaluate(&self, frame: &Frame) -> LivenessScore {
        luminance(frame)
    }

    pub fn is_well_lit(&self, score: LivenessScore) -> bool {
        score.value() >= self.brightness_threshold
    }
}

/// Average luminance over the frame's pixels. An empty frame scores 0.
pub fn luminance(frame: &Frame) -> LivenessScore {
    let pixel_count = frame.pixel_count();
    if pixel_count == 0 {
        return LivenessScore(0.0);
    }

    let sum: f64 = frame
        .pixels()
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|px| LUMA_RED * px[0] as f64 + LUMA_GREEN * px[1] as f64 + LUMA_BLUE * px[2] as f64)
        .sum();

    LivenessScore((sum / pixel_count as f64).clamp(0.0, 255.0))
}
