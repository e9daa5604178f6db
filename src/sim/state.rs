//! Simulation state and spawn operations
//!
//! Everything the orchestrator mutates lives here: the two entity
//! registries, the rotating hue, the launch tick counters, the bounded
//! edge-point cache, and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::impact::Impact;
use crate::consts::*;
use crate::settings::Settings;

/// Complete animation state
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Rotating global hue (degrees). Unbounded; wrapped at color encoding.
    pub hue: f32,
    /// Ticks since the last manual launch
    pub ticks_since_manual: u32,
    /// Ticks since the last automated launch
    pub ticks_since_auto: u32,
    /// Live projectiles, in spawn order
    pub bullets: Vec<Bullet>,
    /// Live explosion fragments, in spawn order
    pub impacts: Vec<Impact>,
    /// Cached automated launch origins; grows to exactly
    /// [`EDGE_POINT_CACHE_SIZE`] then freezes
    pub edge_points: Vec<Vec2>,
    rng: Pcg32,
}

impl SimState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            hue: HUE_INITIAL,
            ticks_since_manual: 0,
            ticks_since_auto: 0,
            bullets: Vec::new(),
            impacts: Vec::new(),
            edge_points: Vec::with_capacity(EDGE_POINT_CACHE_SIZE),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Launch a bullet from `start` toward `end`.
    pub fn spawn_bullet(&mut self, start: Vec2, end: Vec2, settings: &Settings) {
        let bullet = Bullet::new(start, end, settings, &mut self.rng);
        self.bullets.push(bullet);
    }

    /// Detonate a burst of `impact_count` fragments at `pos`, colored around
    /// the current global hue.
    pub fn create_impacts(&mut self, pos: Vec2, settings: &Settings) {
        for _ in 0..settings.impact_count {
            let impact = Impact::new(pos, self.hue, settings, &mut self.rng);
            self.impacts.push(impact);
        }
    }

    /// An automated-launch origin on the canvas edge.
    ///
    /// Once the cache is warm this reuses one of its points uniformly at
    /// random, clustering launches around a stable set of origins. Until
    /// then a fresh point is generated on a random edge; bottom-edge points
    /// are resampled out of the center band, which belongs to the manual
    /// launch origin.
    pub fn starting_point(&mut self, bounds: Vec2) -> Vec2 {
        if self.edge_points.len() >= EDGE_POINT_CACHE_SIZE {
            let index = self.rng.random_range(0..self.edge_points.len());
            return self.edge_points[index];
        }

        let (width, height) = (bounds.x, bounds.y);
        let point = match self.rng.random_range(0..4) {
            // Top
            0 => Vec2::new(self.rng.random_range(0.0..width), 0.0),
            // Bottom, outside the center band
            1 => {
                let x = loop {
                    let x = self.rng.random_range(0.0..width);
                    if !(x > width * BOTTOM_EXCLUSION_MIN && x < width * BOTTOM_EXCLUSION_MAX) {
                        break x;
                    }
                };
                Vec2::new(x, height)
            }
            // Left
            2 => Vec2::new(0.0, self.rng.random_range(0.0..height)),
            // Right
            _ => Vec2::new(width, self.rng.random_range(0.0..height)),
        };

        self.edge_points.push(point);
        point
    }
}
