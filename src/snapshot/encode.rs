use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::camera::error::{CameraError, Result};
use crate::config::SnapshotConfig;
use crate::snapshot::render::Canvas;

/// Encoded snapshot bytes plus the MIME type they were encoded as.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Encode a canvas according to the snapshot configuration.
pub fn encode_canvas(canvas: &Canvas, config: &SnapshotConfig) -> Result<EncodedImage> {
    let mut buf = Vec::new();
    match config.mime_type.as_str() {
        "image/jpeg" => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, config.jpeg_quality);
            encoder
                .write_image(
                    canvas.data(),
                    canvas.width(),
                    canvas.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| CameraError::Encoding(format!("jpeg encoding failed: {e}")))?;
        }
        "image/png" => {
            let encoder = PngEncoder::new(&mut buf);
            encoder
                .write_image(
                    canvas.data(),
                    canvas.width(),
                    canvas.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| CameraError::Encoding(format!("png encoding failed: {e}")))?;
        }
        other => {
            return Err(CameraError::Encoding(format!(
                "unsupported mime type: {other}"
            )));
        }
    }

    Ok(EncodedImage {
        data: buf,
        mime_type: config.mime_type.clone(),
    })
}
