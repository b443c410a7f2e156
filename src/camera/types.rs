use serde::Serialize;
use std::fmt;

/// Video dimensions reported by a surface or snapshot source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

impl VideoDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-area dimensions signal an environment or hardware problem.
    pub fn is_zero(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for VideoDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Handle to one active hardware video track.
///
/// Held exclusively by the session while streaming; releasing it through the
/// device layer is what actually turns the camera off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TrackHandle(String);

impl TrackHandle {
    /// Create a new `TrackHandle` from a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the inner string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live media stream as handed out by the device layer.
///
/// Older device layers expose a stoppable track directly on the stream;
/// newer ones require enumerating the video tracks. Both shapes are carried
/// so the session can hold a handle for later release either way.
#[derive(Debug, Clone)]
pub struct VideoStream {
    id: String,
    direct_track: Option<TrackHandle>,
    video_tracks: Vec<TrackHandle>,
}

impl VideoStream {
    /// Stream whose track is embedded directly on the stream object.
    pub fn with_direct_track(id: impl Into<String>, track: TrackHandle) -> Self {
        Self {
            id: id.into(),
            direct_track: Some(track),
            video_tracks: Vec::new(),
        }
    }

    /// Stream whose tracks are obtained via enumeration.
    pub fn with_video_tracks(id: impl Into<String>, tracks: Vec<TrackHandle>) -> Self {
        Self {
            id: id.into(),
            direct_track: None,
            video_tracks: tracks,
        }
    }

    /// Stream exposing no stoppable track at all.
    pub fn without_tracks(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            direct_track: None,
            video_tracks: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The track to hold for later release. Prefers the direct shape, falls
    /// back to the first enumerated video track.
    pub fn capture_track(&self) -> Option<TrackHandle> {
        self.direct_track
            .clone()
            .or_else(|| self.video_tracks.first().cloned())
    }
}

/// A single raw frame read from a snapshot source (RGB24).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data (RGB).
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Lifecycle state of a camera session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Acquiring,
    Streaming,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_display_and_zero_check() {
        let dims = VideoDimensions::new(640, 480);
        assert_eq!(dims.to_string(), "640x480");
        assert!(!dims.is_zero());
        assert!(VideoDimensions::new(0, 480).is_zero());
        assert!(VideoDimensions::new(640, 0).is_zero());
    }

    #[test]
    fn track_handle_equality_and_display() {
        let a = TrackHandle::new("cam:video:0");
        let b = TrackHandle::new("cam:video:0");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "cam:video:0");
        assert_eq!(a.as_str(), "cam:video:0");
    }

    #[test]
    fn capture_track_prefers_direct_shape() {
        let stream = VideoStream {
            id: "s".to_string(),
            direct_track: Some(TrackHandle::new("direct")),
            video_tracks: vec![TrackHandle::new("enumerated")],
        };
        assert_eq!(stream.capture_track(), Some(TrackHandle::new("direct")));
    }

    #[test]
    fn capture_track_falls_back_to_enumeration() {
        let stream = VideoStream::with_video_tracks(
            "s",
            vec![TrackHandle::new("first"), TrackHandle::new("second")],
        );
        assert_eq!(stream.capture_track(), Some(TrackHandle::new("first")));
    }

    #[test]
    fn capture_track_none_when_stream_has_no_tracks() {
        let stream = VideoStream::without_tracks("s");
        assert!(stream.capture_track().is_none());
    }

    #[test]
    fn session_state_serialises_to_snake_case() {
        let json = serde_json::to_value(SessionState::Acquiring).unwrap();
        assert_eq!(json, "acquiring");
        let json = serde_json::to_value(SessionState::Streaming).unwrap();
        assert_eq!(json, "streaming");
    }
}
