//! HighGUI window sink

use crate::image_utils::draw_labeled_rect;
use opencv::{core::Mat, highgui};
use playtrack::{Color, DisplaySink, Error, Rect, Result};
use std::time::Duration;

/// Shows frames in a single auto-sized window
pub struct HighGuiDisplay {
    title: Option<String>,
    rect_thickness: i32,
}

impl HighGuiDisplay {
    pub fn new(rect_thickness: i32) -> Self {
        Self {
            title: None,
            rect_thickness,
        }
    }

    fn title(&self) -> Result<&str> {
        self.title
            .as_deref()
            .ok_or_else(|| Error::backend("display window is not open"))
    }
}

/// HighGUI delay argument: 0 blocks, anything else is at least 1 ms
fn delay_millis(timeout: Option<Duration>) -> i32 {
    match timeout {
        None => 0,
        Some(timeout) => timeout.as_millis().clamp(1, i32::MAX as u128) as i32,
    }
}

impl DisplaySink<Mat> for HighGuiDisplay {
    fn open(&mut self, title: &str) -> Result<()> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)
            .map_err(|e| Error::backend(format!("Failed to create window: {}", e)))?;
        self.title = Some(title.to_string());
        Ok(())
    }

    fn draw_track(&mut self, frame: &mut Mat, rect: Rect, color: Color, label: &str) -> Result<()> {
        draw_labeled_rect(frame, rect, color, label, self.rect_thickness)
    }

    fn show(&mut self, frame: &Mat) -> Result<()> {
        highgui::imshow(self.title()?, frame)
            .map_err(|e| Error::backend(format!("Failed to show frame: {}", e)))
    }

    fn wait_key(&mut self, timeout: Option<Duration>) -> Result<Option<i32>> {
        let key = highgui::wait_key(delay_millis(timeout))
            .map_err(|e| Error::backend(format!("Failed to wait for key: {}", e)))?;
        Ok((key >= 0).then_some(key))
    }
}

impl Drop for HighGuiDisplay {
    fn drop(&mut self) {
        if let Some(title) = self.title.take() {
            if let Err(e) = highgui::destroy_window(&title) {
                log::debug!("Failed to destroy window {}: {}", title, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_millis() {
        assert_eq!(delay_millis(None), 0);
        assert_eq!(delay_millis(Some(Duration::ZERO)), 1);
        assert_eq!(delay_millis(Some(Duration::from_micros(300))), 1);
        assert_eq!(delay_millis(Some(Duration::from_millis(33))), 33);
        assert_eq!(delay_millis(Some(Duration::from_secs(u64::MAX / 2))), i32::MAX);
    }

    #[test]
    fn test_show_before_open_is_an_error() {
        let mut display = HighGuiDisplay::new(2);
        assert!(matches!(display.show(&Mat::default()), Err(Error::Backend(_))));
    }
}
