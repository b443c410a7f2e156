use fast_image_resize as fr;

use crate::camera::error::{CameraError, Result};
use crate::camera::types::Frame;
use crate::snapshot::geometry::CropRegion;

/// Off-screen RGB drawing surface for a single snapshot.
///
/// Created fresh for every capture and dropped afterwards; never cached or
/// reused across calls.
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a canvas of the requested output size, initially black.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CameraError::Encoding(format!(
                "zero-size canvas requested: {width}x{height}"
            )));
        }
        let data = vec![0; width as usize * height as usize * 3];
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Draw the given square region of `src` scaled over the whole canvas
    /// (crop-then-scale in one blit).
    pub fn draw_cropped(&mut self, src: &Frame, region: CropRegion) -> Result<()> {
        if region.side == 0 {
            return Err(CameraError::Encoding(
                "empty crop region".to_string(),
            ));
        }
        if u64::from(region.x) + u64::from(region.side) > u64::from(src.width)
            || u64::from(region.y) + u64::from(region.side) > u64::from(src.height)
        {
            return Err(CameraError::Encoding(format!(
                "crop region {}x{}+{}+{} outside source {}x{}",
                region.side, region.side, region.x, region.y, src.width, src.height
            )));
        }
        if src.data.len() != src.width as usize * src.height as usize * 3 {
            return Err(CameraError::Encoding(format!(
                "frame buffer length {} does not match {}x{} RGB",
                src.data.len(),
                src.width,
                src.height
            )));
        }

        let side = region.side as usize;
        let stride = src.width as usize * 3;
        let mut cropped = Vec::with_capacity(side * side * 3);
        for row in region.y as usize..region.y as usize + side {
            let start = row * stride + region.x as usize * 3;
            cropped.extend_from_slice(&src.data[start..start + side * 3]);
        }

        let src_image =
            fr::images::Image::from_vec_u8(region.side, region.side, cropped, fr::PixelType::U8x3)
                .map_err(|e| CameraError::Encoding(format!("invalid crop buffer: {e}")))?;
        let mut dst_image = fr::images::Image::new(self.width, self.height, fr::PixelType::U8x3);

        let mut resizer = fr::Resizer::new();
        resizer
            .resize(&src_image, &mut dst_image, None)
            .map_err(|e| CameraError::Encoding(format!("resize failed: {e}")))?;

        self.data = dst_image.into_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame whose left `split` columns are red and the rest blue.
    fn two_tone_frame(width: u32, height: u32, split: u32) -> Frame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _y in 0..height {
            for x in 0..width {
                if x < split {
                    data.extend_from_slice(&[255, 0, 0]);
                } else {
                    data.extend_from_slice(&[0, 0, 255]);
                }
            }
        }
        Frame {
            data,
            width,
            height,
        }
    }

    #[test]
    fn zero_size_canvas_is_rejected() {
        assert!(Canvas::new(0, 96).is_err());
        assert!(Canvas::new(96, 0).is_err());
    }

    #[test]
    fn crop_outside_source_is_rejected() {
        let frame = two_tone_frame(100, 100, 50);
        let mut canvas = Canvas::new(10, 10).unwrap();
        let result = canvas.draw_cropped(
            &frame,
            CropRegion {
                x: 60,
                y: 0,
                side: 50,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn mismatched_frame_buffer_is_rejected() {
        let frame = Frame {
            data: vec![0; 10],
            width: 100,
            height: 100,
        };
        let mut canvas = Canvas::new(10, 10).unwrap();
        let result = canvas.draw_cropped(
            &frame,
            CropRegion {
                x: 0,
                y: 0,
                side: 100,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn centered_crop_of_landscape_frame_skips_the_margins() {
        // 640x480 frame, red in the left 80 columns, blue from column 80 on.
        // The centered 480x480 crop starts at x=80, so the scaled output
        // must contain no red at all.
        let frame = two_tone_frame(640, 480, 80);
        let mut canvas = Canvas::new(96, 96).unwrap();
        canvas
            .draw_cropped(
                &frame,
                CropRegion {
                    x: 80,
                    y: 0,
                    side: 480,
                },
            )
            .unwrap();

        assert_eq!(canvas.data().len(), 96 * 96 * 3);
        for px in canvas.data().chunks_exact(3) {
            assert_eq!(px, [0, 0, 255]);
        }
    }

    #[test]
    fn uncentered_crop_of_the_same_frame_keeps_red() {
        let frame = two_tone_frame(640, 480, 80);
        let mut canvas = Canvas::new(96, 96).unwrap();
        canvas
            .draw_cropped(
                &frame,
                CropRegion {
                    x: 0,
                    y: 0,
                    side: 480,
                },
            )
            .unwrap();

        let has_red = canvas.data().chunks_exact(3).any(|px| px[0] > 128);
        assert!(has_red, "crop at origin should include the red margin");
    }

    #[test]
    fn upscaling_a_single_pixel_fills_the_canvas() {
        let frame = Frame {
            data: vec![10, 20, 30],
            width: 1,
            height: 1,
        };
        let mut canvas = Canvas::new(96, 96).unwrap();
        canvas
            .draw_cropped(&frame, CropRegion { x: 0, y: 0, side: 1 })
            .unwrap();
        for px in canvas.data().chunks_exact(3) {
            assert_eq!(px, [10, 20, 30]);
        }
    }
}
