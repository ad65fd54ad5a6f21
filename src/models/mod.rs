pub mod score;
pub mod snapshot;

pub use score::{AttributeSet, Score, ScoreUpdate, SCORE_MAX, SCORE_MIN};
pub use snapshot::{BoundingBox, DetectionBatch, DetectionSnapshot, Expressions};
