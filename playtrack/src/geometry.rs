//! Display geometry: how source frames are scaled for the window

use crate::error::{Error, Result};

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSize {
    pub width: i32,
    pub height: i32,
}

impl FrameSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Largest box frames are shown in before they get scaled down
pub const DEFAULT_MAX_DISPLAY: FrameSize = FrameSize {
    width: 1024,
    height: 768,
};

/// Scale decision for the whole run, computed once at open time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    pub source: FrameSize,
    pub desired: FrameSize,
    pub factor: f64,
}

impl DisplayGeometry {
    /// Fit `source` against `max_display`.
    ///
    /// When either source dimension exceeds the box, one uniform factor is
    /// applied to both axes: the larger of the two per-axis ratios. The
    /// tighter dimension therefore lands exactly on the box and the other
    /// may overshoot it (1920x1080 in 1024x768 becomes 1365x768).
    pub fn fit(source: FrameSize, max_display: FrameSize) -> Result<Self> {
        if source.width <= 0 || source.height <= 0 {
            return Err(Error::invalid_argument(format!(
                "video reports an empty frame size ({})",
                source
            )));
        }
        if max_display.width <= 0 || max_display.height <= 0 {
            return Err(Error::invalid_argument(format!(
                "maximum display size must be positive ({})",
                max_display
            )));
        }

        if source.width <= max_display.width && source.height <= max_display.height {
            return Ok(Self {
                source,
                desired: source,
                factor: 1.0,
            });
        }

        let horizontal = max_display.width as f64 / source.width as f64;
        let vertical = max_display.height as f64 / source.height as f64;
        let factor = horizontal.max(vertical);
        let desired = FrameSize::new(
            (factor * source.width as f64).round() as i32,
            (factor * source.height as f64).round() as i32,
        );

        log::debug!(
            "Display geometry: {} -> {} (factor {:.4})",
            source,
            desired,
            factor
        );

        Ok(Self {
            source,
            desired,
            factor,
        })
    }

    pub fn needs_resize(&self) -> bool {
        self.desired != self.source
    }

    /// Zoom as a whole percentage, as shown in the window title
    pub fn percent(&self) -> i32 {
        (100.0 * self.factor).round() as i32
    }

    /// Window title embedding the source resolution and zoom
    pub fn window_title(&self, base: &str) -> String {
        format!("{} ({} @ {}%)", base, self.source, self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_full_hd_scaled_by_tighter_dimension() {
        let geometry =
            DisplayGeometry::fit(FrameSize::new(1920, 1080), DEFAULT_MAX_DISPLAY).unwrap();
        assert_abs_diff_eq!(geometry.factor, 768.0 / 1080.0, epsilon = 1e-12);
        assert_abs_diff_eq!(geometry.factor, 0.7111, epsilon = 1e-4);
        assert_eq!(geometry.desired, FrameSize::new(1365, 768));
        assert!(geometry.needs_resize());
        assert_eq!(geometry.percent(), 71);
    }

    #[test]
    fn test_small_source_untouched() {
        let geometry =
            DisplayGeometry::fit(FrameSize::new(640, 480), DEFAULT_MAX_DISPLAY).unwrap();
        assert_eq!(geometry.desired, FrameSize::new(640, 480));
        assert_eq!(geometry.factor, 1.0);
        assert!(!geometry.needs_resize());
    }

    #[test]
    fn test_exact_box_untouched() {
        let geometry =
            DisplayGeometry::fit(FrameSize::new(1024, 768), DEFAULT_MAX_DISPLAY).unwrap();
        assert!(!geometry.needs_resize());
    }

    #[test]
    fn test_one_dimension_over() {
        // Only the height exceeds, yet the width ratio (>1) wins.
        let geometry =
            DisplayGeometry::fit(FrameSize::new(800, 1000), DEFAULT_MAX_DISPLAY).unwrap();
        assert_abs_diff_eq!(geometry.factor, 1.28, epsilon = 1e-12);
        assert_eq!(geometry.desired, FrameSize::new(1024, 1280));
    }

    #[test]
    fn test_window_title() {
        let geometry =
            DisplayGeometry::fit(FrameSize::new(1920, 1080), DEFAULT_MAX_DISPLAY).unwrap();
        assert_eq!(
            geometry.window_title("CSRT Tracking"),
            "CSRT Tracking (1920 x 1080 @ 71%)"
        );
    }

    #[test]
    fn test_empty_source_rejected() {
        let result = DisplayGeometry::fit(FrameSize::new(0, 0), DEFAULT_MAX_DISPLAY);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
