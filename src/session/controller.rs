use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::sync::Mutex;

use crate::{
    error::AnalysisError,
    sensing::{loop_worker::SensingContext, DetectionProvider, FrameSource, SensingController},
    settings::AnalysisSettings,
};

use super::{SessionState, SessionStatus, UpdateSink};

/// Wires the camera, the detector and the sampling session together and
/// owns the poll loop's lifecycle.
#[derive(Clone)]
pub struct AnalysisController {
    state: Arc<Mutex<SessionState>>,
    settings: AnalysisSettings,
    source: Arc<dyn FrameSource>,
    provider: Arc<dyn DetectionProvider>,
    consumer: Arc<dyn UpdateSink>,
    sensing: Arc<Mutex<SensingController>>,
    verbose: bool,
}

impl AnalysisController {
    pub fn new(
        settings: AnalysisSettings,
        source: Arc<dyn FrameSource>,
        provider: Arc<dyn DetectionProvider>,
        consumer: Arc<dyn UpdateSink>,
    ) -> Self {
        let verbose = std::env::var("FUNDSCAN_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            state: Arc::new(Mutex::new(SessionState::new(settings.analysis_duration()))),
            settings,
            source,
            provider,
            consumer,
            sensing: Arc::new(Mutex::new(SensingController::new())),
            verbose,
        }
    }

    pub async fn get_state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.lock().await.status
    }

    pub async fn is_sensing(&self) -> bool {
        self.sensing.lock().await.is_active()
    }

    /// Open the camera, load the detector and begin polling. Camera and model
    /// failures are returned and nothing starts ticking.
    pub async fn start(&self) -> Result<()> {
        self.settings.validate()?;

        if self.sensing.lock().await.is_active() {
            return Err(AnalysisError::AlreadyRunning.into());
        }

        if let Err(err) = self.source.open().await {
            warn!("camera unavailable: {err}");
            self.consumer.on_camera_unavailable(&err.reason());
            return Err(err.into());
        }

        self.provider
            .load()
            .await
            .context("detection provider failed to initialize")?;

        self.begin_run().await
    }

    /// The video stream restarted (a new `play`): drop the current run and
    /// begin a fresh one with new initial/target values.
    pub async fn restart(&self) -> Result<()> {
        self.sensing.lock().await.stop_sensing().await?;
        self.begin_run().await
    }

    /// Stop polling and release the camera. The session keeps whatever it
    /// last emitted.
    pub async fn stop(&self) -> Result<()> {
        self.sensing.lock().await.stop_sensing().await?;
        self.source.close().await;
        info!("analysis stopped");
        Ok(())
    }

    async fn begin_run(&self) -> Result<()> {
        self.state.lock().await.reset();
        self.consumer.on_reset();

        let ctx = SensingContext {
            source: Arc::clone(&self.source),
            provider: Arc::clone(&self.provider),
            session: Arc::clone(&self.state),
            consumer: Arc::clone(&self.consumer),
            settings: self.settings.clone(),
            verbose: self.verbose,
        };

        self.sensing.lock().await.start_sensing(ctx)
    }
}
