use crate::models::score::round_clamped;
use crate::models::{AttributeSet, DetectionSnapshot, Score, SCORE_MAX, SCORE_MIN};

/// Compute the raw fundability score for one snapshot.
///
/// base (confidence) + expression bonus - expression penalty + a small
/// sine perturbation, rounded and clamped to `0..=100`.
pub fn raw_score(snapshot: &DetectionSnapshot) -> Score {
    let c = snapshot.confidence;
    let e = &snapshot.expressions;

    let base = c * 50.0;
    let bonus = e.happy * 30.0 + e.neutral * 15.0 + e.surprised * 10.0;
    let penalty = e.sad * 20.0 + e.angry * 25.0;
    let perturbation = (c * 100.0 + e.happy * 50.0 + e.neutral * 25.0).sin() * 5.0;

    round_clamped(base + bonus - penalty + perturbation, SCORE_MIN, SCORE_MAX)
}

/// Compute charisma, dumbness and single for one snapshot.
pub fn raw_attributes(snapshot: &DetectionSnapshot) -> AttributeSet {
    AttributeSet {
        charisma: score_charisma(snapshot),
        dumbness: score_dumbness(snapshot),
        single: score_single(snapshot),
    }
}

/// Confidence and smiling push charisma up; sad/angry pull it down.
fn score_charisma(snapshot: &DetectionSnapshot) -> Score {
    let c = snapshot.confidence;
    let e = &snapshot.expressions;

    let weighted = c * 35.0 + e.happy * 40.0 + e.surprised * 10.0 + e.neutral * 5.0
        - e.sad * 15.0
        - e.angry * 10.0;
    let perturbation = (c * 80.0 + e.happy * 60.0).sin() * 6.0;

    round_clamped(weighted + perturbation, SCORE_MIN, SCORE_MAX)
}

/// Low confidence plus a blank or startled face reads as dumbness.
fn score_dumbness(snapshot: &DetectionSnapshot) -> Score {
    let c = snapshot.confidence;
    let e = &snapshot.expressions;

    let weighted = 10.0 + (1.0 - c) * 30.0 + e.surprised * 30.0 + e.neutral * 20.0
        + e.disgusted * 10.0
        - e.happy * 5.0;
    let perturbation = (e.neutral * 70.0 + e.surprised * 40.0).cos() * 6.0;

    round_clamped(weighted + perturbation, SCORE_MIN, SCORE_MAX)
}

fn score_single(snapshot: &DetectionSnapshot) -> Score {
    let c = snapshot.confidence;
    let e = &snapshot.expressions;

    let weighted = 20.0 + e.sad * 30.0 + e.neutral * 15.0 + e.angry * 15.0 - e.happy * 10.0
        + c * 10.0;
    let perturbation = (e.sad * 90.0 + c * 30.0 + e.angry * 20.0).sin() * 7.0;

    round_clamped(weighted + perturbation, SCORE_MIN, SCORE_MAX)
}
