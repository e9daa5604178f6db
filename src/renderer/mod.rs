//! WebGPU rendering module
//!
//! Interprets the sim's per-tick display list against a persistent
//! accumulation texture: a low-alpha fade pass erodes old strokes, new
//! strokes blend additively, and the result is blitted to the surface.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
