use crate::camera::types::VideoDimensions;

/// Offset that centers a `width x height` rectangle against a square
/// container of side `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub left: f64,
    pub top: f64,
}

/// Calculate the offset needed to center a rectangular image in a square
/// container.
///
/// When `max` equals the shorter side, exactly one offset is negative and
/// its absolute value doubles as the crop origin of the centered square.
pub fn centered_pos(width: f64, height: f64, max: f64) -> Offset {
    if width > height {
        Offset {
            left: (max - width) / 2.0,
            top: 0.0,
        }
    } else {
        Offset {
            left: 0.0,
            top: (max - height) / 2.0,
        }
    }
}

/// Centered square region within a source rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Largest centered square within `dims`, derived from the absolute values
/// of the centering offsets.
pub fn centered_crop(dims: VideoDimensions) -> CropRegion {
    let side = dims.width.min(dims.height);
    let pos = centered_pos(
        f64::from(dims.width),
        f64::from(dims.height),
        f64::from(side),
    );
    CropRegion {
        x: pos.left.abs() as u32,
        y: pos.top.abs() as u32,
        side,
    }
}

/// How to size and place a camera frame inside a square preview viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
}

/// Scale a camera frame so its shorter dimension fills `display_len`, then
/// center the excess of the longer dimension.
///
/// Applying the layout to an actual viewport is the embedder's concern.
pub fn fit_preview(dims: VideoDimensions, display_len: u32) -> PreviewLayout {
    if dims.is_zero() {
        return PreviewLayout {
            width: 0.0,
            height: 0.0,
            margin_left: 0.0,
            margin_top: 0.0,
        };
    }

    let vw = f64::from(dims.width);
    let vh = f64::from(dims.height);
    let len = f64::from(display_len);

    let (width, height) = if vh > vw {
        // portrait: pin the width
        (len, vh / (vw / len))
    } else {
        // landscape: pin the height
        (vw / (vh / len), len)
    };

    let pos = centered_pos(width, height, len);
    PreviewLayout {
        width,
        height,
        margin_left: pos.left,
        margin_top: pos.top,
    }
}
