// Avatar camera — device-stream lifecycle and the centered-snapshot
// pipeline behind take/change-avatar flows.

pub mod camera;
pub mod config;
pub mod snapshot;

pub use camera::device::MediaDevice;
pub use camera::error::{CameraError, Result};
pub use camera::headless::{HeadlessCamera, StaticImageSource};
pub use camera::session::CameraSession;
pub use camera::surface::{MetadataSignal, PreviewSurface, SnapshotSource};
pub use camera::types::{Frame, SessionState, TrackHandle, VideoDimensions, VideoStream};
pub use config::SnapshotConfig;
pub use snapshot::encode::EncodedImage;
