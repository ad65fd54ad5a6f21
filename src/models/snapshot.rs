use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Per-expression probabilities reported by the detector. Values are in
/// `[0, 1]` and are not guaranteed to sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expressions {
    pub happy: f64,
    pub neutral: f64,
    pub sad: f64,
    pub angry: f64,
    pub surprised: f64,
    pub disgusted: f64,
    pub fearful: f64,
}

/// Face rectangle in frame pixels. Only used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One face detection from one poll tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSnapshot {
    pub confidence: f64,
    pub expressions: Expressions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl DetectionSnapshot {
    pub fn new(confidence: f64, expressions: Expressions) -> Self {
        Self {
            confidence,
            expressions,
            bounding_box: None,
        }
    }

    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }
}

/// The completed result of one poll tick, tagged with the tick's sequence
/// number and capture time so late completions can be recognised.
#[derive(Debug, Clone)]
pub struct DetectionBatch {
    pub sequence: u64,
    pub captured_at: Instant,
    pub detections: Vec<DetectionSnapshot>,
}

impl DetectionBatch {
    /// Only the first face is scored; any others are display-only.
    pub fn primary(&self) -> Option<&DetectionSnapshot> {
        self.detections.first()
    }
}
