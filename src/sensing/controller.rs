use anyhow::{Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::AnalysisError;

use super::loop_worker::{sensing_loop, SensingContext};

/// Owns the poll task. At most one loop runs at a time.
pub struct SensingController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl SensingController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start_sensing(&mut self, ctx: SensingContext) -> Result<()> {
        if self.handle.is_some() {
            return Err(AnalysisError::AlreadyRunning.into());
        }

        info!(
            "starting sensing loop (poll every {}ms)",
            ctx.settings.poll_interval_ms
        );

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(sensing_loop(ctx, cancel_token.clone()));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancel the poll timer and wait for the loop to drop its in-flight
    /// detections.
    pub async fn stop_sensing(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("sensing loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for SensingController {
    fn default() -> Self {
        Self::new()
    }
}
