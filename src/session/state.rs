use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

use crate::models::{AttributeSet, DetectionBatch, DetectionSnapshot, Score, ScoreUpdate};
use crate::scoring::{
    feedback_for, interpolate, interpolate_attributes, project_target_attributes,
    project_target_score, raw_attributes, raw_score,
};

pub const ANALYSIS_DURATION: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Running,
    Finalized,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Idle
    }
}

/// State of one analysis run. Pure: every transition is driven by
/// [`SessionState::apply`] with an explicit capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub status: SessionStatus,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub initial_score: Option<Score>,
    pub target_score: Option<Score>,
    pub initial_attributes: Option<AttributeSet>,
    pub target_attributes: Option<AttributeSet>,
    /// Last emitted values; frozen once finalized.
    pub current_score: Option<Score>,
    pub current_attributes: Option<AttributeSet>,
    pub progress: f64,
    #[serde(skip)]
    pub duration: Duration,
    /// Capture time of the first usable detection; elapsed time is measured
    /// from here, not from construction.
    #[serde(skip)]
    pub running_anchor: Option<Instant>,
    #[serde(skip)]
    pub last_sequence: Option<u64>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(ANALYSIS_DURATION)
    }
}

impl SessionState {
    pub fn new(duration: Duration) -> Self {
        Self {
            status: SessionStatus::Idle,
            session_id: None,
            started_at: None,
            initial_score: None,
            target_score: None,
            initial_attributes: None,
            target_attributes: None,
            current_score: None,
            current_attributes: None,
            progress: 0.0,
            duration,
            running_anchor: None,
            last_sequence: None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status == SessionStatus::Finalized
    }

    /// Feed one completed poll tick. Returns the update to emit, or `None`
    /// when the tick causes no transition (no face, stale result, or the
    /// session is already finalized).
    pub fn apply(&mut self, batch: &DetectionBatch) -> Option<ScoreUpdate> {
        if self.status == SessionStatus::Finalized {
            return None;
        }

        if self
            .last_sequence
            .is_some_and(|last| batch.sequence <= last)
        {
            return None;
        }
        // Faceless ticks count too, so an older batch can never start the run.
        self.last_sequence = Some(batch.sequence);

        let snapshot = batch.primary()?;

        match self.status {
            SessionStatus::Idle => Some(self.begin(batch.captured_at, snapshot)),
            SessionStatus::Running => {
                let anchor = self.running_anchor?;
                if batch.captured_at < anchor {
                    return None;
                }

                let elapsed = batch.captured_at.saturating_duration_since(anchor);
                if elapsed >= self.duration {
                    Some(self.finalize(snapshot))
                } else {
                    Some(self.advance(elapsed))
                }
            }
            SessionStatus::Finalized => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.duration);
    }

    fn begin(&mut self, now: Instant, snapshot: &DetectionSnapshot) -> ScoreUpdate {
        let initial_score = raw_score(snapshot);
        let initial_attributes = raw_attributes(snapshot);

        self.status = SessionStatus::Running;
        self.session_id = Some(Uuid::new_v4().to_string());
        self.started_at = Some(Utc::now());
        self.running_anchor = Some(now);
        self.initial_score = Some(initial_score);
        self.initial_attributes = Some(initial_attributes);
        self.target_score = Some(project_target_score(initial_score, snapshot));
        self.target_attributes = Some(project_target_attributes(initial_attributes, snapshot));

        self.record(initial_score, initial_attributes, 0.0, false)
    }

    fn advance(&mut self, elapsed: Duration) -> ScoreUpdate {
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64())
            .clamp(0.0, 1.0)
            .max(self.progress);

        let (Some(initial_score), Some(target_score)) = (self.initial_score, self.target_score)
        else {
            return self.record(0, AttributeSet::default(), progress, false);
        };
        let initial_attributes = self.initial_attributes.unwrap_or_default();
        let target_attributes = self.target_attributes.unwrap_or(initial_attributes);

        let score = interpolate(initial_score, target_score, progress);
        let attributes = interpolate_attributes(initial_attributes, target_attributes, progress);
        self.record(score, attributes, progress, false)
    }

    fn finalize(&mut self, snapshot: &DetectionSnapshot) -> ScoreUpdate {
        let score = self.target_score.unwrap_or_else(|| raw_score(snapshot));
        let attributes = self
            .target_attributes
            .unwrap_or_else(|| raw_attributes(snapshot));

        self.status = SessionStatus::Finalized;
        self.record(score, attributes, 1.0, true)
    }

    fn record(
        &mut self,
        score: Score,
        attributes: AttributeSet,
        progress: f64,
        is_final: bool,
    ) -> ScoreUpdate {
        self.current_score = Some(score);
        self.current_attributes = Some(attributes);
        self.progress = progress;

        ScoreUpdate {
            session_id: self.session_id.clone().unwrap_or_default(),
            score,
            feedback: feedback_for(score).to_string(),
            is_final,
            attributes,
            progress,
        }
    }
}
