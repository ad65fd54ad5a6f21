use async_trait::async_trait;
use image::RgbImage;
use tokio::time::Instant;

use crate::error::AnalysisResult;
use crate::models::DetectionSnapshot;

/// One captured webcam frame.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub captured_at: Instant,
    pub image: RgbImage,
}

impl VideoFrame {
    pub fn new(image: RgbImage) -> Self {
        Self {
            captured_at: Instant::now(),
            image,
        }
    }
}

/// The camera.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Acquire the device. Fails with `CameraUnavailable` when permission is
    /// denied or no camera exists.
    async fn open(&self) -> AnalysisResult<()>;

    async fn capture(&self) -> AnalysisResult<VideoFrame>;

    async fn close(&self) {}
}

/// Face detection and expression inference.
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    /// Load model weights. A failure here is fatal for the run.
    async fn load(&self) -> AnalysisResult<()> {
        Ok(())
    }

    /// Zero or more faces, in detector order. May be slow.
    async fn detect(&self, frame: &VideoFrame) -> AnalysisResult<Vec<DetectionSnapshot>>;
}
