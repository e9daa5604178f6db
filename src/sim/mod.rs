//! Deterministic simulation module
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - Tick-based only (one tick per display frame, no dt)
//! - Seeded RNG only
//! - No rendering or platform dependencies; each tick emits a display list
//!   that the renderer interprets

pub mod bullet;
pub mod frame;
pub mod impact;
pub mod state;
pub mod tick;
pub mod trail;

pub use bullet::{Bullet, BulletStep};
pub use frame::{DrawCmd, Frame, Hsla};
pub use impact::{Impact, ImpactStep};
pub use state::SimState;
pub use tick::{FrameInput, tick};
pub use trail::Trail;
