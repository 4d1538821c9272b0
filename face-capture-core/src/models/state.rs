use super::error::CaptureError;

/// Capture session state machine.
///
/// State transitions:
/// ```text
/// idle → starting → active → detecting → condition_met → capturing → completed
///           ↓
///         error
///
/// any non-terminal state → cancelled | error
/// ```
///
/// `Detecting` loops on itself while no face is found or the face is under-lit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Starting,
    Active,
    Detecting,
    ConditionMet,
    Capturing,
    Completed,
    Cancelled,
    Error(CaptureError),
}

impl CaptureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Error(_))
    }

    /// States in which the frame loop is allowed to act on a frame.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Active | Self::Detecting)
    }

    /// Whether a session is between opening and a terminal state.
    pub fn is_in_progress(&self) -> bool {
        !self.is_idle() && !self.is_terminal()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Active => "active",
            Self::Detecting => "detecting",
            Self::ConditionMet => "condition_met",
            Self::Capturing => "capturing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Error(_) => "error",
        }
    }

    pub fn can_transition_to(&self, next: &CaptureState) -> bool {
        use CaptureState::*;

        if self.is_terminal() {
            return false;
        }
        match next {
            Cancelled | Error(_) => true,
            Starting => matches!(self, Idle),
            Active => matches!(self, Starting),
            Detecting => matches!(self, Active | Detecting),
            ConditionMet => matches!(self, Detecting),
            Capturing => matches!(self, ConditionMet),
            Completed => matches!(self, Capturing),
            Idle => false,
        }
    }
}
