use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::CaptureError;

/// Which camera the session asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    User,
    Environment,
}

/// Constraints passed to the camera provider on acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConstraints {
    pub facing_mode: FacingMode,
}

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfiguration {
    /// Minimum average luminance (0–255) for a frame to count as well lit (default: 3.0).
    pub brightness_threshold: f64,

    /// Delay between the capture condition being met and the capture itself (default: 1000).
    pub debounce_ms: u64,

    /// Display refresh rate that paces the frame loop (default: 60).
    pub refresh_rate_hz: u32,

    /// Camera to request (default: user-facing).
    pub facing_mode: FacingMode,

    /// Directory the detection models are loaded from (default: `/models`).
    pub models_location: PathBuf,

    /// JPEG quality for the captured selfie, 1–100 (default: 92).
    pub jpeg_quality: u8,
}

impl CaptureConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if !self.brightness_threshold.is_finite()
            || !(0.0..=255.0).contains(&self.brightness_threshold)
        {
            return Err(format!(
                "brightness threshold must be within 0..=255: {}",
                self.brightness_threshold
            ));
        }
        if self.refresh_rate_hz == 0 {
            return Err("refresh rate must be positive".into());
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!("unsupported jpeg quality: {}", self.jpeg_quality));
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CaptureError::ConfigurationFailed(format!("invalid config: {}", e)))?;
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.refresh_rate_hz.max(1) as f64)
    }

    pub fn media_constraints(&self) -> MediaConstraints {
        MediaConstraints {
            facing_mode: self.facing_mode,
        }
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            brightness_threshold: 3.0,
            debounce_ms: 1000,
            refresh_rate_hz: 60,
            facing_mode: FacingMode::User,
            models_location: PathBuf::from("/models"),
            jpeg_quality: 92,
        }
    }
}
