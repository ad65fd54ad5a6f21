//! Stand-in camera and detector that need no hardware or model weights.
//!
//! The camera paints frames whose brightness swings slowly over time; the
//! detector reads confidence and expressions back out of the pixel data, so
//! the whole pipeline can be exercised end to end.

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use tokio::time::Instant;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{BoundingBox, DetectionSnapshot, Expressions};

use super::provider::{DetectionProvider, FrameSource, VideoFrame};

const FRAME_WIDTH: u32 = 64;
const FRAME_HEIGHT: u32 = 48;
/// Radians per second of the brightness swing.
const BRIGHTNESS_RATE: f64 = 0.8;
/// Frames darker than this read as "no face".
const MIN_FACE_CONFIDENCE: f64 = 0.15;

pub struct SyntheticCamera {
    epoch: Instant,
    available: bool,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            available: true,
        }
    }

    /// A camera that refuses to open, as when permission is denied.
    pub fn unavailable() -> Self {
        Self {
            epoch: Instant::now(),
            available: false,
        }
    }

    fn paint(&self, now: Instant) -> RgbImage {
        let t = now.saturating_duration_since(self.epoch).as_secs_f64();
        let brightness = (128.0 + 110.0 * (t * BRIGHTNESS_RATE).sin()).clamp(0.0, 255.0) as u8;

        RgbImage::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |x, y| {
            Rgb([brightness, (x * 4) as u8, (y * 5) as u8])
        })
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for SyntheticCamera {
    async fn open(&self) -> AnalysisResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(AnalysisError::CameraUnavailable(
                "no camera attached".to_string(),
            ))
        }
    }

    async fn capture(&self) -> AnalysisResult<VideoFrame> {
        if !self.available {
            return Err(AnalysisError::Capture("camera is not open".to_string()));
        }
        let now = Instant::now();
        Ok(VideoFrame {
            captured_at: now,
            image: self.paint(now),
        })
    }
}

/// Derives one face per frame from mean channel intensities.
#[derive(Debug, Default)]
pub struct SyntheticDetector;

impl SyntheticDetector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DetectionProvider for SyntheticDetector {
    async fn detect(&self, frame: &VideoFrame) -> AnalysisResult<Vec<DetectionSnapshot>> {
        let image = &frame.image;
        let pixel_count = (image.width() as u64 * image.height() as u64).max(1) as f64;

        let (mut red, mut green, mut blue) = (0u64, 0u64, 0u64);
        for pixel in image.pixels() {
            red += pixel[0] as u64;
            green += pixel[1] as u64;
            blue += pixel[2] as u64;
        }
        let red = red as f64 / pixel_count / 255.0;
        let green = green as f64 / pixel_count / 255.0;
        let blue = blue as f64 / pixel_count / 255.0;

        if red < MIN_FACE_CONFIDENCE {
            return Ok(Vec::new());
        }

        let expressions = Expressions {
            happy: red,
            neutral: 1.0 - red,
            surprised: green * 0.5,
            sad: blue * 0.3,
            ..Expressions::default()
        };

        let width = image.width() as f64;
        let height = image.height() as f64;
        let face = DetectionSnapshot::new(red, expressions).with_bounding_box(BoundingBox {
            x: width * 0.25,
            y: height * 0.2,
            width: width * 0.5,
            height: height * 0.6,
        });

        Ok(vec![face])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(red: u8) -> VideoFrame {
        VideoFrame::new(RgbImage::from_pixel(8, 8, Rgb([red, 0, 0])))
    }

    #[tokio::test]
    async fn test_dark_frame_has_no_face() {
        let faces = SyntheticDetector::new().detect(&uniform(10)).await.unwrap();
        assert!(faces.is_empty());
    }

    #[tokio::test]
    async fn test_bright_frame_reads_back_confidence() {
        let faces = SyntheticDetector::new().detect(&uniform(255)).await.unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].confidence, 1.0);
        assert_eq!(faces[0].expressions.happy, 1.0);
        assert_eq!(faces[0].expressions.neutral, 0.0);
        assert!(faces[0].bounding_box.is_some());
    }

    #[tokio::test]
    async fn test_unavailable_camera_refuses_to_open() {
        let camera = SyntheticCamera::unavailable();
        assert!(matches!(
            camera.open().await,
            Err(AnalysisError::CameraUnavailable(_))
        ));
        assert!(camera.capture().await.is_err());
    }

    #[tokio::test]
    async fn test_camera_frames_have_fixed_size() {
        let camera = SyntheticCamera::new();
        camera.open().await.unwrap();
        let frame = camera.capture().await.unwrap();
        assert_eq!(frame.image.dimensions(), (FRAME_WIDTH, FRAME_HEIGHT));
    }
}
