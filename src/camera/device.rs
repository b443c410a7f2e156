use async_trait::async_trait;

use crate::camera::error::Result;
use crate::camera::types::{TrackHandle, VideoStream};

/// Device-media capability.
///
/// Implemented per environment (a native media layer in production, a
/// simulated camera in headless runs and tests). Provides video-only stream
/// acquisition and track release.
#[async_trait]
pub trait MediaDevice: Send + Sync {
    /// Request a video-only media stream from the hardware.
    ///
    /// Denial, absence or an unsupported API surface as
    /// `CameraError::DeviceAcquisition`.
    async fn request_video_stream(&self) -> Result<VideoStream>;

    /// Release the hardware resource behind a track.
    fn stop_track(&self, track: &TrackHandle);
}
