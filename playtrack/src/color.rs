/// Track colors
use serde::{Deserialize, Serialize};

/// RGB color of a track's rectangle and label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components in OpenCV channel order
    pub fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Generate a deterministic color from a track index.
///
/// Channels are capped at 180 so rectangles stay visible on bright video,
/// and the dominant channel is lifted to at least 100.
pub fn generate_color(index: u32) -> Color {
    let mut hash = index.wrapping_add(1).wrapping_mul(2654435761);

    let r = (hash & 0xFF) as u16;
    hash = hash.wrapping_mul(2654435761);
    let g = (hash & 0xFF) as u16;
    hash = hash.wrapping_mul(2654435761);
    let b = (hash & 0xFF) as u16;

    let max_value = 180u16;
    let min_bright = 100u16;

    let r = r.min(max_value).max(if r > g && r > b { min_bright } else { 40 });
    let g = g.min(max_value).max(if g > r && g > b { min_bright } else { 40 });
    let b = b.min(max_value).max(if b > r && b > g { min_bright } else { 40 });

    Color::new(r as u8, g as u8, b as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_color_is_deterministic() {
        for index in 0..32 {
            assert_eq!(generate_color(index), generate_color(index));
        }
        assert_ne!(generate_color(0), generate_color(1));
    }

    #[test]
    fn test_generate_color_bounds() {
        for index in 0..256 {
            let c = generate_color(index);
            for channel in [c.r, c.g, c.b] {
                assert!((40..=180).contains(&channel));
            }
        }
    }

    #[test]
    fn test_color_serde_as_triple() {
        let color: Color = serde_json::from_str("[255, 0, 16]").unwrap();
        assert_eq!(color, Color::new(255, 0, 16));
        assert_eq!(color.to_bgr(), [16, 0, 255]);
        assert_eq!(serde_json::to_string(&color).unwrap(), "[255,0,16]");
    }
}
