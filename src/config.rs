use std::path::Path;

use serde::{Deserialize, Serialize};

/// Snapshot encoding and sizing configuration.
///
/// Handed to the session explicitly instead of living in module-level
/// constants, so embedders and tests can tune it per flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotConfig {
    /// MIME type snapshots are encoded as.
    pub mime_type: String,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Square side of the on-screen preview viewport, in pixels.
    pub display_size: u32,
    /// Square side of the exported snapshot, in pixels.
    pub export_size: u32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            jpeg_quality: 80,
            display_size: 240,
            export_size: 600,
        }
    }
}

impl SnapshotConfig {
    /// Load configuration from a JSON file, returning defaults on missing file.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_returns_default_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.json");
        let config = SnapshotConfig::load(&path).unwrap();
        assert_eq!(config, SnapshotConfig::default());
    }

    #[test]
    fn load_reads_saved_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        let config = SnapshotConfig {
            mime_type: "image/png".to_string(),
            jpeg_quality: 55,
            display_size: 120,
            export_size: 300,
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = SnapshotConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "jpegQuality": 60 }"#).unwrap();

        let loaded = SnapshotConfig::load(&path).unwrap();
        assert_eq!(loaded.jpeg_quality, 60);
        assert_eq!(loaded.mime_type, "image/jpeg");
        assert_eq!(loaded.export_size, 600);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(SnapshotConfig::load(&path).is_err());
    }

    #[test]
    fn defaults_match_profile_image_constants() {
        let config = SnapshotConfig::default();
        assert_eq!(config.mime_type, "image/jpeg");
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.display_size, 240);
        assert_eq!(config.export_size, 600);
    }
}
