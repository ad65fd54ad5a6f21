pub mod feedback;
pub mod interpolate;
pub mod raw;
pub mod target;

pub use feedback::{feedback_for, DEFAULT_FEEDBACK, FEEDBACK_BANDS};
pub use interpolate::{interpolate, interpolate_attributes};
pub use raw::{raw_attributes, raw_score};
pub use target::{project_target_attributes, project_target_score};
