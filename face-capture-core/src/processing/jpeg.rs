use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::models::error::CaptureError;
use crate::models::frame::{Frame, BYTES_PER_PIXEL};
use crate::traits::image_encoder::ImageEncoder;

/// Default encoder: baseline JPEG via the `image` crate, alpha dropped.
#[derive(Debug, Clone, Copy)]
pub struct JpegFrameEncoder {
    quality: u8,
}

impl JpegFrameEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for JpegFrameEncoder {
    fn default() -> Self {
        Self::new(92)
    }
}

impl ImageEncoder for JpegFrameEncoder {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>, CaptureError> {
        if frame.is_empty() {
            return Err(CaptureError::EncodingFailed("frame has no pixels".into()));
        }

        let rgb: Vec<u8> = frame
            .pixels()
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let image = RgbImage::from_raw(frame.width(), frame.height(), rgb)
            .ok_or_else(|| CaptureError::EncodingFailed("frame dimensions do not match buffer".into()))?;

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.quality)
            .encode_image(&image)
            .map_err(|e| CaptureError::EncodingFailed(format!("jpeg encoding failed: {}", e)))?;
        Ok(out)
    }
}
