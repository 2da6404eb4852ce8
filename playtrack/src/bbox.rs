//! Pixel and normalized rectangles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in pixel space, top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Stored in place of a track's rectangle while the tracker has lost it.
    pub const LOST: Rect = Rect {
        x: -1,
        y: -1,
        width: -1,
        height: -1,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// False for the lost sentinel and for any degenerate rectangle
    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.y >= 0 && self.width > 0 && self.height > 0
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[x={} y={} w={} h={}]",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Rectangle expressed as fractions (0..=1) of the frame width and height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Resolve against a frame of `frame_width` x `frame_height` pixels.
    ///
    /// Each component is multiplied by the matching frame dimension and
    /// rounded to the nearest pixel.
    pub fn to_pixels(&self, frame_width: i32, frame_height: i32) -> Rect {
        let fw = frame_width as f64;
        let fh = frame_height as f64;
        Rect::new(
            (self.x * fw).round() as i32,
            (self.y * fh).round() as i32,
            (self.w * fw).round() as i32,
            (self.h * fh).round() as i32,
        )
    }

    /// All components finite, origin inside the frame, size strictly positive
    pub fn is_well_formed(&self) -> bool {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        in_unit(self.x) && in_unit(self.y) && in_unit(self.w) && in_unit(self.h)
            && self.w > 0.0
            && self.h > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_center_box() {
        let rect = NormalizedBox::new(0.5, 0.5, 0.1, 0.1).to_pixels(1000, 1000);
        assert_eq!(rect, Rect::new(500, 500, 100, 100));
    }

    #[test]
    fn test_normalized_uses_each_axis() {
        let rect = NormalizedBox::new(0.25, 0.5, 0.5, 0.25).to_pixels(1365, 768);
        assert_eq!(rect, Rect::new(341, 384, 683, 192));
    }

    #[test]
    fn test_lost_sentinel_is_invalid() {
        assert!(!Rect::LOST.is_valid());
        assert!(Rect::LOST.x < 0 && Rect::LOST.y < 0);
        assert!(Rect::LOST.width < 0 && Rect::LOST.height < 0);
        assert!(Rect::new(0, 0, 1, 1).is_valid());
        assert!(!Rect::new(10, 10, 0, 5).is_valid());
    }

    #[test]
    fn test_well_formed() {
        assert!(NormalizedBox::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!NormalizedBox::new(-0.1, 0.0, 0.5, 0.5).is_well_formed());
        assert!(!NormalizedBox::new(0.1, 0.1, 0.0, 0.5).is_well_formed());
        assert!(!NormalizedBox::new(0.1, f64::NAN, 0.5, 0.5).is_well_formed());
        assert!(!NormalizedBox::new(0.1, 0.1, 1.5, 0.5).is_well_formed());
    }
}
