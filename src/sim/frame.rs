//! Per-tick display list
//!
//! The sim never touches a drawing surface directly. Each tick fills a
//! [`Frame`] with commands; the renderer interprets them against the
//! persistent canvas (fade first, then additive strokes).

use glam::Vec2;

/// Stroke color as hue/saturation/lightness/alpha.
///
/// Hue is in degrees and may exceed 360; it is wrapped at encoding time.
/// Saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Fully saturated, fully opaque stroke color
    pub const fn stroke(hue: f32, lightness: f32) -> Self {
        Self::new(hue, 100.0, lightness, 1.0)
    }
}

/// One drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    /// Erode existing canvas content by `alpha` (the composite fade)
    Fade { alpha: f32 },
    /// Stroke a line segment
    Line { from: Vec2, to: Vec2, color: Hsla },
    /// Stroke a circle outline
    Circle {
        center: Vec2,
        radius: f32,
        color: Hsla,
    },
}

/// Display list for one tick, in draw order
#[derive(Debug, Default)]
pub struct Frame {
    pub cmds: Vec<DrawCmd>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for the next tick, keeping the allocation.
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn fade(&mut self, alpha: f32) {
        self.cmds.push(DrawCmd::Fade { alpha });
    }

    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsla) {
        self.cmds.push(DrawCmd::Line { from, to, color });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        self.cmds.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }
}
