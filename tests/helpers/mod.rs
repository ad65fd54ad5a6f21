//! Scripted camera and detector for driving the analysis loop in tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use fundscan_lib::{
    AnalysisError, AnalysisResult, DetectionProvider, DetectionSnapshot, Expressions,
    FrameSource, ScoreUpdate, UpdateSink, VideoFrame,
};
use image::RgbImage;

pub fn face(confidence: f64, happy: f64, neutral: f64) -> DetectionSnapshot {
    DetectionSnapshot::new(
        confidence,
        Expressions {
            happy,
            neutral,
            ..Expressions::default()
        },
    )
}

pub struct ScriptedCamera {
    pub available: bool,
    /// Captures succeed this many times, then the device is gone.
    lost_after: Option<u64>,
    captures: AtomicU64,
}

impl ScriptedCamera {
    pub fn new() -> Self {
        Self {
            available: true,
            lost_after: None,
            captures: AtomicU64::new(0),
        }
    }

    pub fn denied() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn lost_after(captures: u64) -> Self {
        Self {
            lost_after: Some(captures),
            ..Self::new()
        }
    }
}

#[async_trait]
impl FrameSource for ScriptedCamera {
    async fn open(&self) -> AnalysisResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(AnalysisError::CameraUnavailable("permission denied".into()))
        }
    }

    async fn capture(&self) -> AnalysisResult<VideoFrame> {
        let n = self.captures.fetch_add(1, Ordering::SeqCst);
        if self.lost_after.is_some_and(|limit| n >= limit) {
            return Err(AnalysisError::CameraUnavailable("device disconnected".into()));
        }
        Ok(VideoFrame::new(RgbImage::new(2, 2)))
    }
}

/// Returns the configured faces on every call, with optional failures and
/// per-call latency.
pub struct ScriptedDetector {
    faces: Mutex<Vec<DetectionSnapshot>>,
    calls: AtomicU64,
    fail_load: bool,
    fail_every_other: bool,
    latency: Box<dyn Fn(u64) -> Duration + Send + Sync>,
}

impl ScriptedDetector {
    pub fn with_faces(faces: Vec<DetectionSnapshot>) -> Self {
        Self {
            faces: Mutex::new(faces),
            calls: AtomicU64::new(0),
            fail_load: false,
            fail_every_other: false,
            latency: Box::new(|_| Duration::ZERO),
        }
    }

    pub fn empty() -> Self {
        Self::with_faces(Vec::new())
    }

    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::empty()
        }
    }

    pub fn fail_every_other(mut self) -> Self {
        self.fail_every_other = true;
        self
    }

    /// `latency(call_index)` is slept before answering.
    pub fn with_latency(mut self, latency: impl Fn(u64) -> Duration + Send + Sync + 'static) -> Self {
        self.latency = Box::new(latency);
        self
    }

    pub fn set_faces(&self, faces: Vec<DetectionSnapshot>) {
        *self.faces.lock().unwrap() = faces;
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetectionProvider for ScriptedDetector {
    async fn load(&self) -> AnalysisResult<()> {
        if self.fail_load {
            Err(AnalysisError::ProviderLoad("weights not found".into()))
        } else {
            Ok(())
        }
    }

    async fn detect(&self, _frame: &VideoFrame) -> AnalysisResult<Vec<DetectionSnapshot>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let latency = (self.latency)(call);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if self.fail_every_other && call % 2 == 1 {
            return Err(AnalysisError::Detection("inference threw".into()));
        }
        Ok(self.faces.lock().unwrap().clone())
    }
}

/// Collects every update the session emits.
#[derive(Clone, Default)]
pub struct UpdateLog {
    updates: Arc<Mutex<Vec<ScoreUpdate>>>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<ScoreUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl UpdateSink for UpdateLog {
    fn on_update(&self, update: &ScoreUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }
}
