use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::camera::device::MediaDevice;
use crate::camera::error::{CameraError, Result};
use crate::camera::surface::{MetadataSignal, PreviewSurface, SnapshotSource};
use crate::camera::types::{Frame, TrackHandle, VideoDimensions, VideoStream};

const HEADLESS_STREAM_ID: &str = "headless:stream:0";
const HEADLESS_TRACK_ID: &str = "headless:video:0";

/// A blank 1x1 PNG, used as the placeholder snapshot source when no real
/// camera exists.
const BLANK_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAAAAAA6fptVAAAACklEQVQYV2P4DwABAQEAWk1v8QAAAABJRU5ErkJggg==";

/// Simulated camera for environments without real hardware.
///
/// Implements the device, preview-surface and snapshot-source capabilities
/// in one: `request_video_stream` hands out a single-track stream, attaching
/// it fires the metadata signal, and frames are a synthesized RGB gradient.
///
/// Enable via `HEADLESS_CAMERA=1` environment variable.
pub struct HeadlessCamera {
    dims: VideoDimensions,
    loaded: watch::Sender<bool>,
    stop_count: AtomicUsize,
}

impl HeadlessCamera {
    pub fn new(width: u32, height: u32) -> Self {
        let (loaded, _) = watch::channel(false);
        Self {
            dims: VideoDimensions::new(width, height),
            loaded,
            stop_count: AtomicUsize::new(0),
        }
    }

    /// Whether the headless camera is enabled via environment variable.
    pub fn is_enabled() -> bool {
        std::env::var("HEADLESS_CAMERA").is_ok_and(|v| v == "1" || v == "true")
    }

    /// Number of times a track has been stopped on this camera.
    pub fn stop_count(&self) -> usize {
        self.stop_count.load(Ordering::Relaxed)
    }

    /// Synthetic RGB gradient frame at the configured size.
    fn gradient_frame(&self) -> Frame {
        let VideoDimensions { width, height } = self.dims;
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                data.push((x % 256) as u8);
                data.push((y % 256) as u8);
                data.push(128);
            }
        }
        Frame {
            data,
            width,
            height,
        }
    }
}

#[async_trait]
impl MediaDevice for HeadlessCamera {
    async fn request_video_stream(&self) -> Result<VideoStream> {
        Ok(VideoStream::with_video_tracks(
            HEADLESS_STREAM_ID,
            vec![TrackHandle::new(HEADLESS_TRACK_ID)],
        ))
    }

    fn stop_track(&self, _track: &TrackHandle) {
        self.stop_count.fetch_add(1, Ordering::Relaxed);
    }
}

impl PreviewSurface for HeadlessCamera {
    fn attach_stream(&self, _stream: &VideoStream) -> Result<()> {
        // Metadata is available as soon as the stream attaches.
        let _ = self.loaded.send(true);
        Ok(())
    }

    fn play(&self) {}

    fn video_dimensions(&self) -> VideoDimensions {
        if *self.loaded.borrow() {
            self.dims
        } else {
            VideoDimensions::new(0, 0)
        }
    }

    fn subscribe_metadata(&self) -> MetadataSignal {
        MetadataSignal::new(self.loaded.subscribe())
    }
}

impl SnapshotSource for HeadlessCamera {
    fn source_dimensions(&self) -> VideoDimensions {
        self.dims
    }

    fn current_frame(&self) -> Result<Frame> {
        Ok(self.gradient_frame())
    }
}

/// Static image standing in for a live snapshot source.
pub struct StaticImageSource {
    frame: Frame,
}

impl StaticImageSource {
    /// Decode image bytes (PNG, JPEG, ...) into a static source.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| CameraError::Encoding(format!("static image decode failed: {e}")))?
            .to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Self {
            frame: Frame {
                data: img.into_raw(),
                width,
                height,
            },
        })
    }

    /// The blank 1x1 placeholder used when no camera is present.
    pub fn placeholder() -> Result<Self> {
        let bytes = base64::Engine::decode(
            &base64::engine::general_purpose::STANDARD,
            BLANK_PNG_BASE64,
        )
        .map_err(|e| CameraError::Encoding(format!("placeholder base64 invalid: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

impl SnapshotSource for StaticImageSource {
    fn source_dimensions(&self) -> VideoDimensions {
        VideoDimensions::new(self.frame.width, self.frame.height)
    }

    fn current_frame(&self) -> Result<Frame> {
        Ok(self.frame.clone())
    }
}
