use tokio::sync::watch;

use crate::camera::error::{CameraError, Result};
use crate::camera::types::{Frame, VideoDimensions, VideoStream};

/// Awaitable handle for a surface's metadata-loaded signal.
///
/// Subscribing registers interest synchronously; `wait` then resolves once
/// the surface reports loaded metadata, including when the signal fired
/// before `wait` was first polled.
pub struct MetadataSignal {
    rx: watch::Receiver<bool>,
}

impl MetadataSignal {
    pub fn new(rx: watch::Receiver<bool>) -> Self {
        Self { rx }
    }

    /// Create a connected sender/signal pair for surface implementations.
    pub fn channel() -> (watch::Sender<bool>, MetadataSignal) {
        let (tx, rx) = watch::channel(false);
        (tx, MetadataSignal { rx })
    }

    /// Resolve once the surface has reported loaded metadata.
    pub async fn wait(mut self) -> Result<()> {
        self.rx.wait_for(|loaded| *loaded).await.map(|_| ()).map_err(|_| {
            CameraError::DeviceAcquisition(
                "preview surface dropped before metadata loaded".to_string(),
            )
        })
    }
}

/// Live render target showing the camera feed.
pub trait PreviewSurface: Send + Sync {
    /// Attach a media stream to the surface.
    fn attach_stream(&self, stream: &VideoStream) -> Result<()>;

    /// Begin playback.
    fn play(&self);

    /// Stream-reported dimensions; 0x0 until metadata has loaded.
    fn video_dimensions(&self) -> VideoDimensions;

    /// Register for the metadata-loaded signal.
    ///
    /// Must be called before the stream request is issued; the signal can
    /// fire as soon as a stream is attached.
    fn subscribe_metadata(&self) -> MetadataSignal;
}

/// Element a still frame is captured from.
///
/// Normally the preview surface itself; substituted with a static image in
/// automated contexts without a real camera.
pub trait SnapshotSource: Send + Sync {
    /// Stream-reported dimensions for live sources, static element size for
    /// placeholder sources.
    fn source_dimensions(&self) -> VideoDimensions;

    /// Read the current frame.
    fn current_frame(&self) -> Result<Frame>;
}
