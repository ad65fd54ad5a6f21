use serde::{Deserialize, Serialize};

/// Easing curves for display transitions.
///
/// Input is normalized progress through the transition (0.0 to 1.0), output
/// is the fraction of the distance covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// v(t) = t
    Linear,
    /// v(t) = t * (2 - t): fast start, gentle landing
    #[default]
    EaseOutQuad,
}

impl Easing {
    pub fn apply(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => ease_out_quad(t),
        }
    }
}

pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}
