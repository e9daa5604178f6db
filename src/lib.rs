//! Skyburst - tracer-fire fireworks on a fading canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bullets, impact bursts, spawn logic)
//! - `renderer`: WebGPU rendering of the per-tick display list
//! - `settings`: Tunables, persisted to LocalStorage on the web

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Fixed animation constants
///
/// These shape the look of the effect and are not part of the runtime
/// configuration surface in [`Settings`].
pub mod consts {
    /// Number of edge launch points generated before the cache freezes
    pub const EDGE_POINT_CACHE_SIZE: usize = 10;
    /// Bottom-edge exclusion band, as fractions of canvas width.
    /// The bottom center is reserved for the manual launch origin.
    pub const BOTTOM_EXCLUSION_MIN: f32 = 0.4;
    pub const BOTTOM_EXCLUSION_MAX: f32 = 0.6;

    /// Target reticle pulse: radius cycles min -> max by step, then resets
    pub const RETICLE_RADIUS_MIN: f32 = 1.0;
    pub const RETICLE_RADIUS_MAX: f32 = 8.0;
    pub const RETICLE_RADIUS_STEP: f32 = 0.3;

    /// Bezier control point lift above the higher endpoint (pixels)
    pub const ARC_BASE_LIFT: f32 = 50.0;
    /// Additional lift per pixel of distance traveled
    pub const ARC_LIFT_PER_TRAVEL: f32 = 0.1;
    /// Constant downward nudge applied after curve evaluation (pixels/tick)
    pub const ARC_DROP_PER_TICK: f32 = 0.5;

    /// Hue at startup (degrees; green)
    pub const HUE_INITIAL: f32 = 120.0;
}
