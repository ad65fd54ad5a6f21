use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{DetectionBatch, DetectionSnapshot};
use crate::session::{SessionState, UpdateSink};
use crate::settings::AnalysisSettings;

use super::provider::{DetectionProvider, FrameSource};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info, log_warn};

type TickOutcome = (u64, Instant, AnalysisResult<Vec<DetectionSnapshot>>);

/// Everything the poll loop needs; moved into the spawned task.
pub struct SensingContext {
    pub source: Arc<dyn FrameSource>,
    pub provider: Arc<dyn DetectionProvider>,
    pub session: Arc<Mutex<SessionState>>,
    pub consumer: Arc<dyn UpdateSink>,
    pub settings: AnalysisSettings,
    pub verbose: bool,
}

/// Poll the camera at a fixed interval and feed completed detections to the
/// session. Inference for consecutive ticks may overlap; results are applied
/// as they complete and the session drops any that arrive out of order.
/// Transient capture errors skip a tick; any other capture error is reported
/// as camera-unavailable and ends the loop.
pub async fn sensing_loop(ctx: SensingContext, cancel_token: CancellationToken) {
    let mut ticker = time::interval(ctx.settings.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut inflight: JoinSet<TickOutcome> = JoinSet::new();
    let mut next_sequence: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                log_info!("sensing loop shutting down ({} detections in flight)", inflight.len());
                break;
            }
            _ = ticker.tick() => {
                let frame = match ctx.source.capture().await {
                    Ok(frame) => frame,
                    Err(err) if err.is_transient() => {
                        log_debug!("tick {} skipped: {err}", next_sequence);
                        continue;
                    }
                    Err(err) => {
                        // Camera lost mid-run: nothing further can be sampled.
                        log_warn!("sensing loop stopping: {err}");
                        ctx.consumer.on_camera_unavailable(&err.reason());
                        break;
                    }
                };

                let sequence = next_sequence;
                next_sequence += 1;

                let provider = Arc::clone(&ctx.provider);
                let timeout = ctx.settings.detection_timeout();
                inflight.spawn(async move {
                    let captured_at = frame.captured_at;
                    let result = match time::timeout(timeout, provider.detect(&frame)).await {
                        Ok(result) => result,
                        Err(_) => Err(AnalysisError::Detection(format!(
                            "inference timed out after {}ms",
                            timeout.as_millis()
                        ))),
                    };
                    (sequence, captured_at, result)
                });
            }
            Some(joined) = inflight.join_next() => {
                handle_outcome(&ctx, joined).await;
            }
        }
    }

    inflight.shutdown().await;
}

async fn handle_outcome(ctx: &SensingContext, joined: Result<TickOutcome, JoinError>) {
    let (sequence, captured_at, result) = match joined {
        Ok(outcome) => outcome,
        Err(err) => {
            log_error!("detection task failed to join: {err}");
            return;
        }
    };

    let detections = match result {
        Ok(detections) => detections,
        Err(err) => {
            // Transient per-tick failures never reach the consumer.
            log_debug!("tick {sequence} skipped: {err}");
            return;
        }
    };

    let batch = DetectionBatch {
        sequence,
        captured_at,
        detections,
    };

    let update = {
        let mut session = ctx.session.lock().await;
        session.apply(&batch)
    };

    let Some(update) = update else {
        if ctx.verbose {
            log_debug!(
                "tick {sequence}: no transition ({} faces)",
                batch.detections.len()
            );
        }
        return;
    };

    if update.is_final {
        log_info!(
            "session {} finalized: score={} charisma={} dumbness={} single={}",
            update.session_id,
            update.score,
            update.attributes.charisma,
            update.attributes.dumbness,
            update.attributes.single
        );
    } else if update.progress == 0.0 {
        log_info!(
            "session {} started: initial score={}",
            update.session_id,
            update.score
        );
    } else if ctx.verbose {
        log_info!(
            "tick {sequence}: score={} progress={:.2}",
            update.score,
            update.progress
        );
    }

    ctx.consumer.on_update(&update);
}
