use crate::models::captured_image::CaptureMetadata;
use crate::models::error::CaptureError;
use crate::models::state::CaptureState;
use crate::models::status::StatusMessage;

/// Event delegate for capture session notifications.
///
/// Called inline from the session's control flow; implementations must not
/// block.
pub trait CaptureDelegate: Send + Sync {
    /// Called after every state transition.
    fn on_state_changed(&self, state: &CaptureState);

    /// Called whenever the user-facing status line changes or is re-asserted.
    fn on_status(&self, status: StatusMessage);

    /// Called when a collaborator fails. The session has already degraded
    /// the failure to a status message.
    fn on_error(&self, error: &CaptureError);

    /// Called once the selfie has been captured and handed off.
    fn on_capture_finished(&self, metadata: &CaptureMetadata);
}
