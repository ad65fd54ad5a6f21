use crate::models::score::round_clamped;
use crate::models::{AttributeSet, DetectionSnapshot, Score};

pub const TARGET_SCORE_MIN: Score = 15;
pub const TARGET_SCORE_MAX: Score = 90;

/// Below this magnitude the shift is topped up by `MIN_SHIFT_NUDGE`.
const MIN_VISIBLE_SHIFT: f64 = 3.0;
const MIN_SHIFT_NUDGE: f64 = 5.0;

/// Per-attribute target bounds: (floor, ceiling).
pub const CHARISMA_BOUNDS: (Score, Score) = (10, 95);
pub const DUMBNESS_BOUNDS: (Score, Score) = (5, 90);
pub const SINGLE_BOUNDS: (Score, Score) = (15, 95);

const ATTRIBUTE_SHIFT_AMPLITUDE: f64 = 12.0;

/// Project the score the session converges to, from the initial score and the
/// snapshot that started the session.
pub fn project_target_score(initial: Score, snapshot: &DetectionSnapshot) -> Score {
    let c = snapshot.confidence;
    let mut shift = (c * 100.0 + snapshot.expressions.happy * 50.0).sin() * 15.0;

    if shift.abs() < MIN_VISIBLE_SHIFT {
        shift += if c > 0.5 {
            MIN_SHIFT_NUDGE
        } else {
            -MIN_SHIFT_NUDGE
        };
    }

    round_clamped(initial as f64 + shift, TARGET_SCORE_MIN, TARGET_SCORE_MAX)
}

/// Project the attribute values the session converges to. Each attribute has
/// its own frequency and its own bounds.
pub fn project_target_attributes(
    initial: AttributeSet,
    snapshot: &DetectionSnapshot,
) -> AttributeSet {
    let c = snapshot.confidence;
    let e = &snapshot.expressions;

    let charisma_shift = (c * 120.0 + e.happy * 40.0).sin() * ATTRIBUTE_SHIFT_AMPLITUDE;
    let dumbness_shift = (c * 90.0 + e.neutral * 60.0).sin() * ATTRIBUTE_SHIFT_AMPLITUDE;
    let single_shift = (c * 70.0 + e.sad * 80.0).sin() * ATTRIBUTE_SHIFT_AMPLITUDE;

    AttributeSet {
        charisma: shifted(initial.charisma, charisma_shift, CHARISMA_BOUNDS),
        dumbness: shifted(initial.dumbness, dumbness_shift, DUMBNESS_BOUNDS),
        single: shifted(initial.single, single_shift, SINGLE_BOUNDS),
    }
}

fn shifted(initial: Score, shift: f64, (lo, hi): (Score, Score)) -> Score {
    round_clamped(initial as f64 + shift, lo, hi)
}
