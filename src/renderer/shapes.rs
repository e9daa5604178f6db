//! Shape tessellation for stroked primitives
//!
//! The sim speaks in line segments and circle outlines; the GPU wants
//! triangles. Everything here works in canvas pixel coordinates; the
//! vertex shader maps to NDC.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Hsla;

/// Stroke width in pixels, matching a 1px canvas stroke
pub const STROKE_WIDTH: f32 = 1.0;

/// Segments used to approximate a circle outline
const CIRCLE_SEGMENTS: u32 = 32;

/// Convert an HSLA stroke color to linear-ish RGBA. Hue wraps modulo 360.
pub fn hsla_to_rgba(color: Hsla) -> [f32; 4] {
    let h = color.hue.rem_euclid(360.0) / 60.0;
    let s = (color.saturation / 100.0).clamp(0.0, 1.0);
    let l = (color.lightness / 100.0).clamp(0.0, 1.0);
    let a = color.alpha.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, a]
}

/// Tessellate a stroked line segment as a single quad.
///
/// A zero-length segment collapses to a degenerate quad, which rasterizes
/// to nothing, matching a canvas stroke of a zero-length path.
pub fn line(from: Vec2, to: Vec2, color: Hsla) -> [Vertex; 6] {
    let rgba = hsla_to_rgba(color);
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (STROKE_WIDTH / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    [
        Vertex::new(a.x, a.y, rgba),
        Vertex::new(b.x, b.y, rgba),
        Vertex::new(c.x, c.y, rgba),
        Vertex::new(c.x, c.y, rgba),
        Vertex::new(b.x, b.y, rgba),
        Vertex::new(d.x, d.y, rgba),
    ]
}

/// Tessellate a circle outline as a thin ring of quads.
pub fn circle_outline(center: Vec2, radius: f32, color: Hsla, out: &mut Vec<Vertex>) {
    let rgba = hsla_to_rgba(color);
    let inner_r = (radius - STROKE_WIDTH / 2.0).max(0.0);
    let outer_r = radius + STROKE_WIDTH / 2.0;

    for i in 0..CIRCLE_SEGMENTS {
        let theta1 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let theta2 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;

        let inner1 = center + Vec2::new(theta1.cos(), theta1.sin()) * inner_r;
        let outer1 = center + Vec2::new(theta1.cos(), theta1.sin()) * outer_r;
        let inner2 = center + Vec2::new(theta2.cos(), theta2.sin()) * inner_r;
        let outer2 = center + Vec2::new(theta2.cos(), theta2.sin()) * outer_r;

        out.push(Vertex::new(inner1.x, inner1.y, rgba));
        out.push(Vertex::new(outer1.x, outer1.y, rgba));
        out.push(Vertex::new(inner2.x, inner2.y, rgba));

        out.push(Vertex::new(inner2.x, inner2.y, rgba));
        out.push(Vertex::new(outer1.x, outer1.y, rgba));
        out.push(Vertex::new(outer2.x, outer2.y, rgba));
    }
}

/// Two triangles covering the whole canvas, used by the fade pass.
pub fn fade_quad(width: f32, height: f32, alpha: f32) -> [Vertex; 6] {
    let color = [0.0, 0.0, 0.0, alpha];
    [
        Vertex::new(0.0, 0.0, color),
        Vertex::new(0.0, height, color),
        Vertex::new(width, 0.0, color),
        Vertex::new(width, 0.0, color),
        Vertex::new(0.0, height, color),
        Vertex::new(width, height, color),
    ]
}
