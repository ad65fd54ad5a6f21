use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::models::score::round_clamped;
use crate::models::{AttributeSet, Score, ScoreUpdate, SCORE_MAX, SCORE_MIN};
use crate::render::RenderSurface;
use crate::session::UpdateSink;
use crate::settings::AnalysisSettings;

use super::easing::Easing;

/// What the screen currently shows, kept unrounded so chained transitions
/// start exactly where the previous one was interrupted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayValues {
    pub score: f64,
    pub charisma: f64,
    pub dumbness: f64,
    pub single: f64,
}

impl DisplayValues {
    pub fn new(score: Score, attributes: AttributeSet) -> Self {
        Self {
            score: score as f64,
            charisma: attributes.charisma as f64,
            dumbness: attributes.dumbness as f64,
            single: attributes.single as f64,
        }
    }

    pub fn lerp(from: Self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            score: mix(from.score, to.score),
            charisma: mix(from.charisma, to.charisma),
            dumbness: mix(from.dumbness, to.dumbness),
            single: mix(from.single, to.single),
        }
    }

    pub fn rounded(&self) -> (Score, AttributeSet) {
        let r = |v: f64| round_clamped(v, SCORE_MIN, SCORE_MAX);
        (
            r(self.score),
            AttributeSet {
                charisma: r(self.charisma),
                dumbness: r(self.dumbness),
                single: r(self.single),
            },
        )
    }
}

/// A single eased move between two display states.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: DisplayValues,
    pub to: DisplayValues,
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn sample(&self, elapsed: Duration) -> DisplayValues {
        if self.is_complete(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        DisplayValues::lerp(self.from, self.to, self.easing.apply(t))
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[derive(Debug, Default)]
struct AnimatorState {
    displayed: DisplayValues,
    finalized: bool,
    in_flight: Option<CancellationToken>,
}

impl AnimatorState {
    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

/// Smooths successive session updates on their way to the render surface.
///
/// Non-final updates start a short eased transition from whatever is shown
/// now; a newer update cancels it and starts over from the then-current
/// value. The final update is shown immediately and freezes the animator.
#[derive(Clone)]
pub struct PresentationAnimator {
    inner: Arc<Mutex<AnimatorState>>,
    surface: Arc<dyn RenderSurface>,
    transition: Duration,
    frame_interval: Duration,
    easing: Easing,
}

impl PresentationAnimator {
    pub fn new(surface: Arc<dyn RenderSurface>, settings: &AnalysisSettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AnimatorState::default())),
            surface,
            transition: settings.transition(),
            frame_interval: settings.frame_interval(),
            easing: settings.easing,
        }
    }

    pub fn displayed(&self) -> DisplayValues {
        self.lock().displayed
    }

    pub fn is_finalized(&self) -> bool {
        self.lock().finalized
    }

    pub fn is_animating(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    pub fn push(&self, update: &ScoreUpdate) {
        let target = DisplayValues::new(update.score, update.attributes);
        let mut state = self.lock();
        if state.finalized {
            return;
        }

        state.cancel_in_flight();

        if update.is_final {
            state.displayed = target;
            state.finalized = true;
            self.surface.render(update.score, update.attributes, true);
            return;
        }

        let transition = Transition {
            from: state.displayed,
            to: target,
            duration: self.transition,
            easing: self.easing,
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            // No scheduler to step frames on; jump straight to the value.
            state.displayed = target;
            self.surface.render(update.score, update.attributes, false);
            return;
        };

        let token = CancellationToken::new();
        state.in_flight = Some(token.clone());
        drop(state);

        runtime.spawn(run_transition(
            Arc::clone(&self.inner),
            Arc::clone(&self.surface),
            transition,
            self.frame_interval,
            token,
        ));
    }

    /// Cancel any transition and forget the previous run's values.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.cancel_in_flight();
        state.displayed = DisplayValues::default();
        state.finalized = false;
    }

    fn lock(&self) -> MutexGuard<'_, AnimatorState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UpdateSink for PresentationAnimator {
    fn on_update(&self, update: &ScoreUpdate) {
        self.push(update);
    }

    fn on_reset(&self) {
        self.reset();
    }

    fn on_camera_unavailable(&self, reason: &str) {
        self.surface.show_unavailable(reason);
    }
}

/// Step `transition` once per display frame until it lands or is cancelled.
/// Writes and renders happen under the state lock, so a cancelled transition
/// can never paint over a newer value.
async fn run_transition(
    inner: Arc<Mutex<AnimatorState>>,
    surface: Arc<dyn RenderSurface>,
    transition: Transition,
    frame_interval: Duration,
    token: CancellationToken,
) {
    let started = Instant::now();
    let mut frames = time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = frames.tick() => {
                let elapsed = started.elapsed();
                let values = transition.sample(elapsed);
                let done = transition.is_complete(elapsed);

                let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
                if token.is_cancelled() {
                    break;
                }
                state.displayed = values;
                if done {
                    state.in_flight = None;
                }
                let (score, attributes) = values.rounded();
                surface.render(score, attributes, false);

                if done {
                    break;
                }
            }
        }
    }
}
