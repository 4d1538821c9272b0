/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle locating a face in the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// Output of one face-detection call. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub found: bool,
    pub bounding_box: BoundingBox,
    /// Facial key points (68 for the landmark model the demo assumes).
    pub landmarks: Vec<Point>,
    /// Detector confidence in 0.0–1.0.
    pub score: f32,
}

impl DetectionResult {
    pub fn face(bounding_box: BoundingBox, landmarks: Vec<Point>, score: f32) -> Self {
        Self {
            found: true,
            bounding_box,
            landmarks,
            score,
        }
    }
}
