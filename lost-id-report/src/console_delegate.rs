use parking_lot::Mutex;

use face_capture_core::{CaptureDelegate, CaptureError, CaptureMetadata, CaptureState, StatusMessage};

/// CaptureDelegate that writes session events to the log, announcing each
/// status line only when it changes.
#[derive(Default)]
pub struct ConsoleDelegate {
    last_status: Mutex<Option<StatusMessage>>,
}

impl CaptureDelegate for ConsoleDelegate {
    fn on_state_changed(&self, state: &CaptureState) {
        log::info!("capture state: {}", state.name());
    }

    fn on_status(&self, status: StatusMessage) {
        let mut last = self.last_status.lock();
        if *last != Some(status) {
            if status != StatusMessage::Cleared {
                log::info!("{}", status);
            }
            *last = Some(status);
        }
    }

    fn on_error(&self, error: &CaptureError) {
        log::warn!("capture error: {}", error);
    }

    fn on_capture_finished(&self, metadata: &CaptureMetadata) {
        match serde_json::to_string(metadata) {
            Ok(json) => log::info!("capture finished: {}", json),
            Err(e) => log::warn!("capture finished, metadata not serializable: {}", e),
        }
    }
}
