use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::models::error::CaptureError;
use crate::models::state::CaptureState;
use crate::models::status::StatusMessage;
use crate::traits::capture_delegate::CaptureDelegate;

/// Per-session frame counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDiagnostics {
    pub frames_analyzed: u64,
    pub faces_found: u64,
    pub low_light_frames: u64,
    pub detection_failures: u64,
}

/// Mutable record of the one live capture session.
///
/// Only the coordinator writes it (through [`SessionWriter`]); everything
/// else reads through [`SessionMonitor`].
#[derive(Debug)]
pub(crate) struct CaptureSession {
    pub(crate) id: uuid::Uuid,
    pub(crate) state: CaptureState,
    pub(crate) status: StatusMessage,
    pub(crate) capturing: bool,
    pub(crate) started_at: Option<Instant>,
    pub(crate) condition_met_at: Option<Instant>,
    pub(crate) diagnostics: SessionDiagnostics,
}

impl CaptureSession {
    pub(crate) fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            state: CaptureState::Idle,
            status: StatusMessage::Cleared,
            capturing: false,
            started_at: None,
            condition_met_at: None,
            diagnostics: SessionDiagnostics::default(),
        }
    }
}

/// Read-only, cloneable view of the capture session for the host.
#[derive(Clone)]
pub struct SessionMonitor {
    session: Arc<Mutex<CaptureSession>>,
}

impl SessionMonitor {
    pub(crate) fn new(session: Arc<Mutex<CaptureSession>>) -> Self {
        Self { session }
    }

    pub fn session_id(&self) -> uuid::Uuid {
        self.session.lock().id
    }

    pub fn state(&self) -> CaptureState {
        self.session.lock().state.clone()
    }

    pub fn status(&self) -> StatusMessage {
        self.session.lock().status
    }

    pub fn is_capturing(&self) -> bool {
        self.session.lock().capturing
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.session.lock().started_at
    }

    /// When the capture condition was last met, if it has been.
    pub fn condition_met_at(&self) -> Option<Instant> {
        self.session.lock().condition_met_at
    }

    pub fn diagnostics(&self) -> SessionDiagnostics {
        self.session.lock().diagnostics.clone()
    }
}

/// Write access to the session, plus delegate notification.
///
/// The lock is released before any delegate callback runs.
#[derive(Clone)]
pub(crate) struct SessionWriter {
    session: Arc<Mutex<CaptureSession>>,
    delegate: Option<Arc<dyn CaptureDelegate>>,
}

impl SessionWriter {
    pub(crate) fn new(
        session: Arc<Mutex<CaptureSession>>,
        delegate: Option<Arc<dyn CaptureDelegate>>,
    ) -> Self {
        Self { session, delegate }
    }

    pub(crate) fn state(&self) -> CaptureState {
        self.session.lock().state.clone()
    }

    /// Replace the record with a fresh idle session.
    pub(crate) fn reset(&self) -> uuid::Uuid {
        let mut s = self.session.lock();
        *s = CaptureSession::new();
        s.id
    }

    pub(crate) fn transition(&self, next: CaptureState) -> Result<(), CaptureError> {
        {
            let mut s = self.session.lock();

            // Steady detecting state: nothing to announce.
            if s.state == next && next == CaptureState::Detecting {
                return Ok(());
            }
            if !s.state.can_transition_to(&next) {
                return Err(CaptureError::InvalidTransition {
                    from: s.state.name(),
                    to: next.name(),
                });
            }

            log::debug!("capture session {}: {} -> {}", s.id, s.state.name(), next.name());
            match next {
                CaptureState::Starting => s.started_at = Some(Instant::now()),
                CaptureState::ConditionMet => s.condition_met_at = Some(Instant::now()),
                CaptureState::Capturing => s.capturing = true,
                _ => {}
            }
            s.state = next.clone();
        }

        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&next);
        }
        Ok(())
    }

    pub(crate) fn set_status(&self, status: StatusMessage) {
        self.session.lock().status = status;
        if let Some(ref delegate) = self.delegate {
            delegate.on_status(status);
        }
    }

    pub(crate) fn report_error(&self, error: &CaptureError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }

    pub(crate) fn record<F: FnOnce(&mut SessionDiagnostics)>(&self, update: F) {
        update(&mut self.session.lock().diagnostics);
    }

    pub(crate) fn delegate(&self) -> Option<&Arc<dyn CaptureDelegate>> {
        self.delegate.as_ref()
    }
}
