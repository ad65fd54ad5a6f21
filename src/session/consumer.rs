use crate::models::ScoreUpdate;

/// Receives what the sampling session emits.
pub trait UpdateSink: Send + Sync {
    fn on_update(&self, update: &ScoreUpdate);

    /// The video stream restarted; any state derived from the previous run
    /// is stale.
    fn on_reset(&self) {}

    fn on_camera_unavailable(&self, _reason: &str) {}
}

impl<F> UpdateSink for F
where
    F: Fn(&ScoreUpdate) + Send + Sync,
{
    fn on_update(&self, update: &ScoreUpdate) {
        self(update)
    }
}
