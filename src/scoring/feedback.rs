use crate::models::Score;

pub const DEFAULT_FEEDBACK: &str = "Analyzing...";

/// Inclusive score band with the message shown for it.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackBand {
    pub min: Score,
    pub max: Score,
    pub message: &'static str,
}

impl FeedbackBand {
    const fn new(min: Score, max: Score, message: &'static str) -> Self {
        Self { min, max, message }
    }

    pub fn contains(&self, score: Score) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// Ordered, contiguous over `0..=100`.
pub const FEEDBACK_BANDS: [FeedbackBand; 6] = [
    FeedbackBand::new(0, 20, "Investors are politely declining."),
    FeedbackBand::new(21, 40, "Maybe a friends-and-family round."),
    FeedbackBand::new(41, 55, "Angel investors are curious."),
    FeedbackBand::new(56, 70, "Seed round looks promising!"),
    FeedbackBand::new(71, 85, "Series A energy detected!"),
    FeedbackBand::new(86, 100, "Unicorn founder vibes!"),
];

/// First band containing `score` wins.
pub fn feedback_for(score: Score) -> &'static str {
    FEEDBACK_BANDS
        .iter()
        .find(|band| band.contains(score))
        .map(|band| band.message)
        .unwrap_or(DEFAULT_FEEDBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_cover_full_range() {
        for score in 0..=100u8 {
            assert_ne!(feedback_for(score), DEFAULT_FEEDBACK, "score {score}");
        }
    }

    #[test]
    fn test_bands_are_contiguous() {
        assert_eq!(FEEDBACK_BANDS[0].min, 0);
        assert_eq!(FEEDBACK_BANDS[FEEDBACK_BANDS.len() - 1].max, 100);
        for pair in FEEDBACK_BANDS.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(feedback_for(20), "Investors are politely declining.");
        assert_eq!(feedback_for(21), "Maybe a friends-and-family round.");
        assert_eq!(feedback_for(73), "Series A energy detected!");
        assert_eq!(feedback_for(100), "Unicorn founder vibes!");
    }

    #[test]
    fn test_out_of_range_falls_back() {
        assert_eq!(feedback_for(101), DEFAULT_FEEDBACK);
    }
}
