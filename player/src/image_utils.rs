/// Conversions between library and OpenCV types, and track drawing
use opencv::{
    core::{self, Mat, Point, Scalar},
    imgproc,
    prelude::*,
};
use playtrack::{Color, Error, Rect, Result};

pub fn to_cv_rect(rect: Rect) -> core::Rect {
    core::Rect::new(rect.x, rect.y, rect.width, rect.height)
}

pub fn from_cv_rect(rect: core::Rect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}

/// OpenCV scalars are BGR
pub fn color_to_scalar(color: Color) -> Scalar {
    let [b, g, r] = color.to_bgr();
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}

/// Draw a track's rectangle with its name just above the top-left corner
///
/// # Arguments
/// * `frame` - BGR frame to draw on
/// * `rect` - Rectangle in frame pixels
/// * `color` - Track color
/// * `label` - Text drawn above the rectangle; skipped when empty
/// * `thickness` - Border thickness in pixels
pub fn draw_labeled_rect(
    frame: &mut Mat,
    rect: Rect,
    color: Color,
    label: &str,
    thickness: i32,
) -> Result<()> {
    let scalar = color_to_scalar(color);

    imgproc::rectangle(
        frame,
        to_cv_rect(rect),
        scalar,
        thickness,
        imgproc::LINE_8,
        0,
    )
    .map_err(|e| Error::backend(format!("Failed to draw rectangle: {}", e)))?;

    if label.is_empty() {
        return Ok(());
    }

    // keep the label inside the frame when the box touches the top edge
    let baseline_y = if rect.y > 14 { rect.y - 6 } else { rect.bottom() + 14 };
    imgproc::put_text(
        frame,
        label,
        Point::new(rect.x, baseline_y),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.5,
        scalar,
        1,
        imgproc::LINE_AA,
        false,
    )
    .map_err(|e| Error::backend(format!("Failed to draw label: {}", e)))?;

    Ok(())
}
