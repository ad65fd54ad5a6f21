//! Session updates flowing through the animator to a render surface.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use fundscan_lib::render::{RecordingSurface, RenderedFrame};
use fundscan_lib::{
    AnalysisController, AnalysisSettings, AttributeSet, PresentationAnimator, SyntheticCamera,
    SyntheticDetector,
};
use helpers::{face, ScriptedCamera, ScriptedDetector};
use tokio::time::sleep;

fn pipeline(detector: Arc<ScriptedDetector>) -> (AnalysisController, PresentationAnimator, RecordingSurface) {
    let surface = RecordingSurface::new();
    let settings = AnalysisSettings::default();
    let animator = PresentationAnimator::new(Arc::new(surface.clone()), &settings);
    let controller = AnalysisController::new(
        settings,
        Arc::new(ScriptedCamera::new()),
        detector,
        Arc::new(animator.clone()),
    );
    (controller, animator, surface)
}

#[tokio::test(start_paused = true)]
async fn test_surface_ends_on_final_target() {
    let (controller, animator, surface) =
        pipeline(Arc::new(ScriptedDetector::with_faces(vec![face(0.9, 0.8, 0.1)])));

    controller.start().await.unwrap();
    sleep(Duration::from_millis(6_000)).await;

    assert!(animator.is_finalized());
    let frames = surface.frames();
    let final_frames: Vec<&RenderedFrame> = frames.iter().filter(|f| f.is_finalized).collect();
    assert_eq!(final_frames.len(), 1);
    assert_eq!(
        surface.last(),
        Some(RenderedFrame {
            score: 59,
            attributes: AttributeSet::new(79, 6, 31),
            is_finalized: true,
        })
    );
    // The display eases up from zero toward the first emitted score.
    assert_eq!(frames[0].score, 0);
    assert!(frames.iter().all(|f| f.score <= 100));

    sleep(Duration::from_millis(1_000)).await;
    assert_eq!(surface.frames().len(), frames.len());
    controller.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_restart_resets_display() {
    let detector = Arc::new(ScriptedDetector::with_faces(vec![face(0.9, 0.8, 0.1)]));
    let (controller, animator, surface) = pipeline(detector.clone());

    controller.start().await.unwrap();
    sleep(Duration::from_millis(5_550)).await;
    assert!(animator.is_finalized());

    detector.set_faces(vec![face(0.5, 0.0, 1.0)]);
    controller.restart().await.unwrap();
    assert!(!animator.is_finalized());

    sleep(Duration::from_millis(6_000)).await;
    assert!(animator.is_finalized());
    assert_eq!(
        surface.last(),
        Some(RenderedFrame {
            score: 34,
            attributes: AttributeSet::new(23, 37, 40),
            is_finalized: true,
        })
    );
    assert_eq!(surface.frames().iter().filter(|f| f.is_finalized).count(), 2);
    controller.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_synthetic_pipeline_finalizes() {
    let surface = RecordingSurface::new();
    let settings = AnalysisSettings::default();
    let animator = PresentationAnimator::new(Arc::new(surface.clone()), &settings);
    let controller = AnalysisController::new(
        settings,
        Arc::new(SyntheticCamera::new()),
        Arc::new(SyntheticDetector::new()),
        Arc::new(animator.clone()),
    );

    controller.start().await.unwrap();
    sleep(Duration::from_millis(20_000)).await;

    assert!(animator.is_finalized());
    let last = surface.last().expect("rendered frames");
    assert!(last.is_finalized);
    assert!((15..=90).contains(&last.score));
    controller.stop().await.unwrap();
}
