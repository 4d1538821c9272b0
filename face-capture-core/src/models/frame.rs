use super::error::CaptureError;

/// Bytes per pixel in a [`Frame`] buffer (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

/// A single video frame as delivered by the camera stream.
///
/// Pixels are tightly packed RGBA8, row-major, with no padding between rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            log::warn!(
                "frame buffer has {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            );
            return Err(CaptureError::FrameUnavailable);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with one opaque colour.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for _ in 0..count {
            pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / BYTES_PER_PIXEL
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
