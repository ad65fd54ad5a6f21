pub mod animation;
pub mod error;
pub mod models;
pub mod render;
pub mod scoring;
pub mod sensing;
pub mod session;
pub mod settings;
mod utils;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use log::{info, warn};

pub use animation::PresentationAnimator;
pub use error::{AnalysisError, AnalysisResult};
pub use models::{AttributeSet, DetectionBatch, DetectionSnapshot, Expressions, Score, ScoreUpdate};
pub use render::{LogSurface, RenderSurface};
pub use sensing::{DetectionProvider, FrameSource, SyntheticCamera, SyntheticDetector, VideoFrame};
pub use session::{AnalysisController, SessionState, SessionStatus, UpdateSink};
pub use settings::{AnalysisSettings, SettingsStore};
pub use utils::logging::init_logging;

const DEFAULT_SETTINGS_FILE: &str = "fundscan-settings.json";
const STATUS_POLL: Duration = Duration::from_millis(250);

/// Demo entry point: synthetic camera and detector feeding the session, the
/// animator rendering to the log. Returns once the score is finalized or the
/// process is interrupted.
pub async fn run() -> Result<()> {
    init_logging();
    info!("fundscan starting up...");

    let settings_path = std::env::var("FUNDSCAN_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let settings = SettingsStore::new(settings_path)?.analysis();

    let surface: Arc<dyn RenderSurface> = Arc::new(LogSurface);
    let animator = PresentationAnimator::new(surface, &settings);

    let controller = AnalysisController::new(
        settings.clone(),
        Arc::new(SyntheticCamera::new()),
        Arc::new(SyntheticDetector::new()),
        Arc::new(animator.clone()),
    );

    controller.start().await?;

    // Generous upper bound: the face may be "lost" for a while before the
    // first usable detection arrives.
    let deadline = tokio::time::Instant::now() + settings.analysis_duration() * 4;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            _ = tokio::time::sleep(STATUS_POLL) => {
                if animator.is_finalized() {
                    let state = controller.get_state().await;
                    info!("final result: {}", serde_json::to_string(&state)?);
                    break;
                }
                if tokio::time::Instant::now() >= deadline {
                    warn!("no face found before the deadline");
                    break;
                }
            }
        }
    }

    controller.stop().await
}
