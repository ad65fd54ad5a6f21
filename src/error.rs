//! Error taxonomy for the analysis pipeline.
//!
//! Camera and model failures are fatal for a run; per-tick detection and
//! capture failures are transient and only ever skip that tick.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Camera missing or permission denied. Shown on the render surface as a
    /// terminal state; the session never starts.
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    /// The detection model failed to initialize. No ticking happens.
    #[error("detection provider failed to load: {0}")]
    ProviderLoad(String),

    /// Inference failed for a single frame.
    #[error("detection failed: {0}")]
    Detection(String),

    /// Grabbing a single frame failed.
    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error("analysis already running")]
    AlreadyRunning,

    #[error("settings error: {0}")]
    Settings(String),
}

impl AnalysisError {
    /// Transient errors skip one tick; everything else ends the run.
    pub fn is_transient(&self) -> bool {
        matches!(self, AnalysisError::Detection(_) | AnalysisError::Capture(_))
    }

    /// Text for the render surface's unavailable state, without the variant
    /// prefix the surface already shows.
    pub fn reason(&self) -> String {
        match self {
            AnalysisError::CameraUnavailable(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
