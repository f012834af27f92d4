//! Colour model and drawing seam between the particle engine and a canvas.
//!
//! The engine describes every frame as a handful of primitive calls on a
//! [`Painter`]. The web frontend maps these onto `CanvasRenderingContext2d`;
//! tests record them.

use crate::constants::{BRIGHT_MAX, HUE_MAX, SAT_MAX};
use glam::Vec2;

/// Colour in hue/saturation/brightness space with alpha.
///
/// Ranges: hue 0..360 (wrapped), saturation and brightness 0..100, alpha 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsba {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Hsba {
    /// Build a colour, wrapping the hue and clamping the other channels.
    pub fn new(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: saturation.clamp(0.0, SAT_MAX),
            brightness: brightness.clamp(0.0, BRIGHT_MAX),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Convert to linear 0..1 RGBA.
    pub fn to_rgba(self) -> [f32; 4] {
        let s = self.saturation / SAT_MAX;
        let v = self.brightness / BRIGHT_MAX;
        let c = v * s;
        let h = self.hue / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        [r + m, g + m, b + m, self.alpha]
    }

    /// CSS `rgba(...)` string for canvas fill and stroke styles.
    pub fn to_css(self) -> String {
        let [r, g, b, a] = self.to_rgba();
        format!(
            "rgba({},{},{},{:.3})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }
}

/// Wrap any hue into `[0, 360)`.
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    let h = hue.rem_euclid(HUE_MAX);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if h >= HUE_MAX {
        0.0
    } else {
        h
    }
}

/// Drawing operations the particle engine needs from a 2D surface.
pub trait Painter {
    /// Paint a translucent black rectangle over the whole viewport.
    fn fade(&mut self, width: f32, height: f32, alpha: f32);
    /// Fill a circle of the given diameter without outline.
    fn fill_circle(&mut self, center: Vec2, diameter: f32, color: Hsba);
    /// Stroke one straight segment of a polyline.
    fn stroke_segment(&mut self, from: Vec2, to: Vec2, weight: f32, color: Hsba);
}
