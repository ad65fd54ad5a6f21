pub mod consumer;
pub mod controller;
pub mod state;

pub use consumer::UpdateSink;
pub use controller::AnalysisController;
pub use state::{SessionState, SessionStatus, ANALYSIS_DURATION};
