use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
    time::Duration,
};

use crate::animation::Easing;
use crate::error::AnalysisError;

/// Timing knobs for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSettings {
    pub analysis_duration_ms: u64,
    pub poll_interval_ms: u64,
    pub detection_timeout_ms: u64,
    pub transition_ms: u64,
    pub frame_interval_ms: u64,
    pub easing: Easing,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            analysis_duration_ms: 5_000,
            poll_interval_ms: 100,
            detection_timeout_ms: 2_000,
            transition_ms: 150,
            frame_interval_ms: 16,
            easing: Easing::EaseOutQuad,
        }
    }
}

impl AnalysisSettings {
    pub fn analysis_duration(&self) -> Duration {
        Duration::from_millis(self.analysis_duration_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn detection_timeout(&self) -> Duration {
        Duration::from_millis(self.detection_timeout_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Interval timers panic on a zero period.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.poll_interval_ms == 0 {
            return Err(AnalysisError::Settings(
                "pollIntervalMs must be greater than zero".into(),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(AnalysisError::Settings(
                "frameIntervalMs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<AnalysisSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let parsed: AnalysisSettings = serde_json::from_str(&contents).unwrap_or_default();
            if parsed.validate().is_ok() {
                parsed
            } else {
                AnalysisSettings::default()
            }
        } else {
            AnalysisSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn analysis(&self) -> AnalysisSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update_analysis(&self, settings: AnalysisSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = settings;
        self.persist(&guard)
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: AnalysisSettings = serde_json::from_str(&contents)?;
        data.validate()?;
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = data;
        Ok(())
    }

    fn persist(&self, data: &AnalysisSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
