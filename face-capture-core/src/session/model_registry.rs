use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::error::CaptureError;
use crate::models::status::StatusMessage;
use crate::session::monitor::SessionMonitor;
use crate::traits::model_loader::{ModelArtifact, ModelLoader};

/// Load state of the detection models for the whole application session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelsState {
    NotLoaded,
    Loading,
    Loaded,
    Failed(String),
}

/// Owns the `models_loaded` flag. Only [`load_all`](Self::load_all) writes it.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ModelRegistry {
    location: PathBuf,
    state: Arc<Mutex<ModelsState>>,
    load_lock: Arc<tokio::sync::Mutex<()>>,
}

impl ModelRegistry {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            state: Arc::new(Mutex::new(ModelsState::NotLoaded)),
            load_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn state(&self) -> ModelsState {
        self.state.lock().clone()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.lock(), ModelsState::Loaded)
    }

    pub fn status(&self) -> StatusMessage {
        match *self.state.lock() {
            ModelsState::Loading => StatusMessage::LoadingModels,
            ModelsState::Failed(_) => StatusMessage::ModelLoadFailed,
            ModelsState::NotLoaded | ModelsState::Loaded => StatusMessage::Cleared,
        }
    }

    /// Load every artifact concurrently. A no-op once loaded.
    ///
    /// Failure leaves the registry in [`ModelsState::Failed`], which blocks
    /// capture; calling again retries.
    pub async fn load_all(&self, loader: &dyn ModelLoader) -> Result<(), CaptureError> {
        let _guard = self.load_lock.lock().await;
        if self.is_loaded() {
            return Ok(());
        }

        *self.state.lock() = ModelsState::Loading;
        log::info!("loading face detection models from {}", self.location.display());

        let (detector, landmarks) = tokio::join!(
            loader.load(ModelArtifact::TinyFaceDetector, &self.location),
            loader.load(ModelArtifact::FaceLandmark68, &self.location),
        );

        match detector.and(landmarks) {
            Ok(()) => {
                *self.state.lock() = ModelsState::Loaded;
                log::info!("face detection models loaded");
                Ok(())
            }
            Err(e) => {
                let reason = match e {
                    CaptureError::ModelLoadFailed(reason) => reason,
                    other => other.to_string(),
                };
                log::error!("failed to load face detection models: {}", reason);
                *self.state.lock() = ModelsState::Failed(reason.clone());
                Err(CaptureError::ModelLoadFailed(reason))
            }
        }
    }
}

/// Whether the capture entry point should be enabled: models are loaded and
/// no session is between opening and a terminal state.
pub fn capture_enabled(models: &ModelRegistry, monitor: &SessionMonitor) -> bool {
    models.is_loaded() && !monitor.state().is_in_progress()
}
