use std::sync::{Arc, Mutex, PoisonError};

use crate::models::{AttributeSet, Score};

/// Where displayed values end up. Purely presentational.
pub trait RenderSurface: Send + Sync {
    fn render(&self, score: Score, attributes: AttributeSet, is_finalized: bool);

    /// Terminal "camera unavailable" screen.
    fn show_unavailable(&self, reason: &str);
}

/// Writes every frame to the log.
#[derive(Debug, Default)]
pub struct LogSurface;

impl RenderSurface for LogSurface {
    fn render(&self, score: Score, attributes: AttributeSet, is_finalized: bool) {
        if is_finalized {
            log::info!(
                "FINAL score={} charisma={} dumbness={} single={}",
                score,
                attributes.charisma,
                attributes.dumbness,
                attributes.single
            );
        } else {
            log::debug!(
                "score={} charisma={} dumbness={} single={}",
                score,
                attributes.charisma,
                attributes.dumbness,
                attributes.single
            );
        }
    }

    fn show_unavailable(&self, reason: &str) {
        log::error!("camera unavailable: {reason}");
    }
}

/// One call to [`RenderSurface::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedFrame {
    pub score: Score,
    pub attributes: AttributeSet,
    pub is_finalized: bool,
}

/// Keeps every rendered frame in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    frames: Arc<Mutex<Vec<RenderedFrame>>>,
    unavailable: Arc<Mutex<Option<String>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<RenderedFrame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<RenderedFrame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    pub fn unavailable_reason(&self) -> Option<String> {
        self.unavailable
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn render(&self, score: Score, attributes: AttributeSet, is_finalized: bool) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RenderedFrame {
                score,
                attributes,
                is_finalized,
            });
    }

    fn show_unavailable(&self, reason: &str) {
        *self
            .unavailable
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(reason.to_string());
    }
}
