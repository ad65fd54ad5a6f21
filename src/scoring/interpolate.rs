use crate::models::score::round_clamped;
use crate::models::{AttributeSet, Score, SCORE_MAX, SCORE_MIN};

/// Linear blend from `initial` to `target`. `progress` is expected in
/// `[0, 1]`; it is clamped here as well so a stray value cannot overshoot.
pub fn interpolate(initial: Score, target: Score, progress: f64) -> Score {
    let t = progress.clamp(0.0, 1.0);
    let initial = initial as f64;
    let target = target as f64;
    round_clamped(initial + (target - initial) * t, SCORE_MIN, SCORE_MAX)
}

pub fn interpolate_attributes(
    initial: AttributeSet,
    target: AttributeSet,
    progress: f64,
) -> AttributeSet {
    AttributeSet {
        charisma: interpolate(initial.charisma, target.charisma, progress),
        dumbness: interpolate(initial.dumbness, target.dumbness, progress),
        single: interpolate(initial.single, target.single, progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        for a in [0u8, 13, 50, 100] {
            for b in [0u8, 27, 64, 100] {
                assert_eq!(interpolate(a, b, 0.0), a);
                assert_eq!(interpolate(a, b, 1.0), b);
            }
        }
    }

    #[test]
    fn test_interpolate_midpoint_rounds() {
        assert_eq!(interpolate(40, 60, 0.5), 50);
        // 10 + 5 * 0.5 = 12.5 rounds up
        assert_eq!(interpolate(10, 15, 0.5), 13);
        assert_eq!(interpolate(60, 40, 0.25), 55);
    }

    #[test]
    fn test_interpolate_clamps_progress() {
        assert_eq!(interpolate(20, 80, 1.7), 80);
        assert_eq!(interpolate(20, 80, -0.3), 20);
    }

    #[test]
    fn test_interpolate_attributes_per_field() {
        let from = AttributeSet::new(0, 100, 50);
        let to = AttributeSet::new(100, 0, 50);
        assert_eq!(
            interpolate_attributes(from, to, 0.3),
            AttributeSet::new(30, 70, 50)
        );
    }
}
