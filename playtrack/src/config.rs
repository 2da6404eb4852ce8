//! Run configuration and the initial track list
//!
//! Initial tracks come from a JSON file such as:
//!
//! ```json
//! [
//!   { "name": "red car", "x": 0.42, "y": 0.55, "w": 0.08, "h": 0.06, "color": [255, 0, 0] },
//!   { "name": "cyclist", "x": 0.10, "y": 0.60, "w": 0.05, "h": 0.12 }
//! ]
//! ```
//!
//! Coordinates are fractions of the frame size. `color` is optional.

use crate::bbox::NormalizedBox;
use crate::color::{generate_color, Color};
use crate::error::{Error, Result};
use crate::geometry::{FrameSize, DEFAULT_MAX_DISPLAY};
use serde::Deserialize;
use std::path::Path;

/// One object to follow from the first frame
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackSpec {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub color: Option<Color>,
}

impl TrackSpec {
    pub fn new(name: impl Into<String>, normalized: NormalizedBox) -> Self {
        Self {
            name: name.into(),
            x: normalized.x,
            y: normalized.y,
            w: normalized.w,
            h: normalized.h,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn normalized(&self) -> NormalizedBox {
        NormalizedBox::new(self.x, self.y, self.w, self.h)
    }

    /// Explicit color, or one derived from the track's position in the list
    pub fn color_or_default(&self, index: usize) -> Color {
        self.color.unwrap_or_else(|| generate_color(index as u32))
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("track name must not be empty"));
        }
        if !self.normalized().is_well_formed() {
            return Err(Error::config(format!(
                "track \"{}\" has coordinates outside 0..1 or an empty size: x={} y={} w={} h={}",
                self.name, self.x, self.y, self.w, self.h
            )));
        }
        Ok(())
    }
}

/// Parse and validate a JSON track list
pub fn parse_track_specs(json: &str) -> Result<Vec<TrackSpec>> {
    let specs: Vec<TrackSpec> = serde_json::from_str(json)?;
    for spec in &specs {
        spec.validate()?;
    }
    Ok(specs)
}

/// Read and validate a JSON track list from disk
pub fn load_track_specs(path: impl AsRef<Path>) -> Result<Vec<TrackSpec>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let specs = parse_track_specs(&json)?;
    log::info!("Loaded {} track(s) from {}", specs.len(), path.display());
    Ok(specs)
}

/// Everything a playback session needs besides its collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Frames larger than this are scaled down
    pub max_display: FrameSize,
    /// Seconds a lost track may stay pending before it is given up
    pub grace_seconds: usize,
    /// Window title prefix
    pub window_title: String,
    /// Border thickness of drawn rectangles
    pub rect_thickness: i32,
    /// Objects to follow; empty means plain playback
    pub tracks: Vec<TrackSpec>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_display: DEFAULT_MAX_DISPLAY,
            grace_seconds: 3,
            window_title: "CSRT Tracking".to_string(),
            rect_thickness: 2,
            tracks: Vec::new(),
        }
    }
}

impl PlayerConfig {
    /// Grace window in frames for a source running at `fps_rounded`
    pub fn grace_frames(&self, fps_rounded: usize) -> Result<usize> {
        self.grace_seconds.checked_mul(fps_rounded).ok_or_else(|| {
            Error::invalid_argument(format!(
                "grace period of {} seconds at {} FPS is too long",
                self.grace_seconds, fps_rounded
            ))
        })
    }
}
