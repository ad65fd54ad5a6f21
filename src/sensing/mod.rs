pub mod controller;
pub mod loop_worker;
pub mod provider;
pub mod synthetic;

pub use controller::SensingController;
pub use provider::{DetectionProvider, FrameSource, VideoFrame};
pub use synthetic::{SyntheticCamera, SyntheticDetector};
