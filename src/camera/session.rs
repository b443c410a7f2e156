use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::camera::device::MediaDevice;
use crate::camera::error::{CameraError, Result};
use crate::camera::surface::{MetadataSignal, PreviewSurface, SnapshotSource};
use crate::camera::types::{SessionState, TrackHandle, VideoStream};
use crate::config::SnapshotConfig;
use crate::snapshot::encode::{encode_canvas, EncodedImage};
use crate::snapshot::geometry::{centered_crop, fit_preview, PreviewLayout};
use crate::snapshot::render::Canvas;

/// Some engines fire the metadata-loaded event before the camera is actually
/// on, reporting 0x0 at event time. Waiting this long before declaring
/// readiness avoids reading from a surface that is still warming up.
const ZERO_DIMENSIONS_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Preview and capture an image from the device's camera.
///
/// One session per take/change-avatar flow: `enable_preview` turns the
/// camera on, `get_snapshot` captures a centered square still, and
/// `disable_preview` releases the hardware on every teardown path.
///
/// At most one operation is expected in flight at a time; overlapping calls
/// on the same session are not guaranteed safe.
pub struct CameraSession {
    device: Arc<dyn MediaDevice>,
    preview: Arc<dyn PreviewSurface>,
    snapshot_source: Arc<dyn SnapshotSource>,
    config: SnapshotConfig,
    track: Mutex<Option<TrackHandle>>,
    state: Mutex<SessionState>,
    disable_requested: AtomicBool,
}

impl CameraSession {
    /// Create a session that snapshots from its own preview surface.
    pub fn new<P>(device: Arc<dyn MediaDevice>, preview: Arc<P>, config: SnapshotConfig) -> Self
    where
        P: PreviewSurface + SnapshotSource + 'static,
    {
        let snapshot_source: Arc<dyn SnapshotSource> = preview.clone();
        Self::with_snapshot_source(device, preview, snapshot_source, config)
    }

    /// Create a session that snapshots from a substituted source, e.g. a
    /// static placeholder image in automated runs without a real camera.
    pub fn with_snapshot_source(
        device: Arc<dyn MediaDevice>,
        preview: Arc<dyn PreviewSurface>,
        snapshot_source: Arc<dyn SnapshotSource>,
        config: SnapshotConfig,
    ) -> Self {
        Self {
            device,
            preview,
            snapshot_source,
            config,
            track: Mutex::new(None),
            state: Mutex::new(SessionState::Idle),
            disable_requested: AtomicBool::new(false),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    fn set_state(&self, next: SessionState) {
        let mut state = self.state.lock();
        if *state != next {
            debug!(from = ?*state, to = ?next, "camera session state change");
            *state = next;
        }
    }

    /// Enable preview: turn on the device's camera and attach its stream to
    /// the preview surface.
    ///
    /// The metadata subscription is registered before the stream request is
    /// issued, because the signal can fire as soon as the stream attaches.
    /// Resolves with the live stream once both the attachment and the
    /// readiness wait complete.
    pub async fn enable_preview(&self) -> Result<VideoStream> {
        self.set_state(SessionState::Acquiring);
        self.disable_requested.store(false, Ordering::Release);

        let signal = self.preview.subscribe_metadata();
        let joined = tokio::try_join!(
            self.wait_for_loaded_metadata(signal),
            self.acquire_stream(),
        );

        let stream = match joined {
            Ok(((), stream)) => stream,
            Err(err) => {
                self.release_track();
                self.set_state(SessionState::Failed);
                return Err(err);
            }
        };

        if self.disable_requested.swap(false, Ordering::AcqRel) {
            // Disable raced the acquisition: stop the fresh track right away.
            self.release_track();
            self.set_state(SessionState::Idle);
            return Err(CameraError::DeviceAcquisition(
                "preview disabled during acquisition".to_string(),
            ));
        }

        // The readiness wait already guarded against 0x0; re-check after the
        // join in case the surface regressed.
        let dims = self.preview.video_dimensions();
        if dims.is_zero() {
            warn!(%dims, "camera stream attached with zero-area video");
            self.release_track();
            self.set_state(SessionState::Failed);
            return Err(CameraError::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            });
        }

        self.set_state(SessionState::Streaming);
        Ok(stream)
    }

    /// Turn off the device's camera.
    ///
    /// Idempotent — calling without a held track is a no-op, so it is safe
    /// on every teardown path. When acquisition is still in flight the
    /// request is recorded and the fresh track is stopped as soon as the
    /// acquisition completes.
    pub fn disable_preview(&self) {
        if self.state() == SessionState::Acquiring {
            self.disable_requested.store(true, Ordering::Release);
            return;
        }
        self.release_track();
        self.set_state(SessionState::Idle);
    }

    /// Capture a still snapshot scaled to `width x height`.
    ///
    /// Reads the largest centered square from the snapshot source and
    /// renders it onto a fresh off-screen canvas (crop-then-scale in one
    /// blit), then encodes it per the session configuration.
    pub async fn get_snapshot(&self, width: u32, height: u32) -> Result<EncodedImage> {
        let dims = self.snapshot_source.source_dimensions();
        if dims.is_zero() {
            return Err(CameraError::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            });
        }

        let region = centered_crop(dims);
        let frame = self.snapshot_source.current_frame()?;
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || {
            let mut canvas = Canvas::new(width, height)?;
            canvas.draw_cropped(&frame, region)?;
            encode_canvas(&canvas, &config)
        })
        .await
        .map_err(|e| CameraError::Encoding(format!("encode worker failed: {e}")))?
    }

    /// Capture a square snapshot at the configured export size.
    pub async fn export_snapshot(&self) -> Result<EncodedImage> {
        let side = self.config.export_size;
        self.get_snapshot(side, side).await
    }

    /// How the live preview should be sized and centered inside the
    /// configured display viewport.
    pub fn preview_layout(&self) -> PreviewLayout {
        fit_preview(self.preview.video_dimensions(), self.config.display_size)
    }

    async fn acquire_stream(&self) -> Result<VideoStream> {
        let stream = self.device.request_video_stream().await?;
        self.preview.attach_stream(&stream)?;
        self.preview.play();

        match stream.capture_track() {
            Some(track) => *self.track.lock() = Some(track),
            // Without a handle the hardware cannot be released later.
            None => warn!(
                stream = stream.id(),
                "media stream exposes no stoppable video track"
            ),
        }

        Ok(stream)
    }

    async fn wait_for_loaded_metadata(&self, signal: MetadataSignal) -> Result<()> {
        signal.wait().await?;
        if self.preview.video_dimensions().is_zero() {
            tokio::time::sleep(ZERO_DIMENSIONS_SETTLE_DELAY).await;
        }
        Ok(())
    }

    fn release_track(&self) {
        if let Some(track) = self.track.lock().take() {
            self.device.stop_track(&track);
        }
    }
}
