use crate::models::error::CaptureError;
use crate::models::frame::Frame;

/// Encodes the captured frame into the bytes handed to the caller.
pub trait ImageEncoder: Send + Sync {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>, CaptureError>;
}
