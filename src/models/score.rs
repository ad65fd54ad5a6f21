use serde::{Deserialize, Serialize};

/// Fundability score, always within `0..=100`.
pub type Score = u8;

pub const SCORE_MIN: Score = 0;
pub const SCORE_MAX: Score = 100;

/// The three secondary metrics shown next to the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSet {
    pub charisma: Score,
    pub dumbness: Score,
    pub single: Score,
}

impl AttributeSet {
    pub fn new(charisma: Score, dumbness: Score, single: Score) -> Self {
        Self {
            charisma,
            dumbness,
            single,
        }
    }
}

/// Round to the nearest integer and clamp into `[lo, hi]`.
pub(crate) fn round_clamped(value: f64, lo: Score, hi: Score) -> Score {
    let rounded = value.round();
    if rounded.is_nan() {
        return lo;
    }
    rounded.clamp(lo as f64, hi as f64) as Score
}

/// Message emitted by the sampling session for every accepted tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub session_id: String,
    pub score: Score,
    pub feedback: String,
    pub is_final: bool,
    pub attributes: AttributeSet,
    /// Fraction of the analysis window elapsed, in `[0, 1]`.
    pub progress: f64,
}
