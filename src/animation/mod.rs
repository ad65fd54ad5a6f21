pub mod animator;
pub mod easing;

pub use animator::{DisplayValues, PresentationAnimator, Transition};
pub use easing::{ease_out_quad, Easing};
