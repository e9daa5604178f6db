//! Radial explosion fragment
//!
//! Impacts are spawned in bursts at a bullet's end point. Each one picks a
//! fixed outward angle and a randomized speed/decay at creation, then slows
//! under friction while gravity drags it down, fading until it expires.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::frame::{Frame, Hsla};
use super::trail::Trail;
use crate::settings::Settings;

/// Outcome of one impact update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStep {
    Alive,
    /// Transparency fell to or below the decay rate; remove before the next draw
    Expired,
}

/// One explosion fragment
#[derive(Debug, Clone)]
pub struct Impact {
    pub pos: Vec2,
    /// Outward travel direction, fixed at creation
    pub angle: f32,
    pub friction: f32,
    pub gravity: f32,
    /// Base hue plus/minus the configured variance, fixed at creation
    pub hue: f32,
    /// HSL lightness %, fixed at creation
    pub brightness: f32,
    /// Per-tick transparency loss, fixed at creation
    pub decay: f32,
    pub speed: f32,
    pub trail: Trail,
    /// Current alpha; monotonically non-increasing
    pub transparency: f32,
}

impl Impact {
    /// `base_hue` is the global hue at detonation time.
    pub fn new<R: Rng>(pos: Vec2, base_hue: f32, settings: &Settings, rng: &mut R) -> Self {
        Self {
            pos,
            angle: rng.random_range(0.0..TAU),
            friction: settings.impact_friction,
            gravity: settings.impact_gravity,
            hue: rng.random_range(
                base_hue - settings.impact_hue_variance..=base_hue + settings.impact_hue_variance,
            ),
            brightness: rng
                .random_range(settings.impact_brightness_min..=settings.impact_brightness_max),
            decay: rng.random_range(settings.impact_decay_min..=settings.impact_decay_max),
            speed: rng.random_range(settings.impact_speed_min..=settings.impact_speed_max),
            trail: Trail::filled(settings.impact_trail_length, pos),
            transparency: settings.impact_transparency,
        }
    }

    /// Advance one tick: friction slows the outward motion, gravity pulls the
    /// Y component down unconditionally, transparency drops by the fixed rate.
    pub fn update(&mut self) -> ImpactStep {
        self.trail.record(self.pos);

        self.speed *= self.friction;
        self.pos.x += self.angle.cos() * self.speed;
        self.pos.y += self.angle.sin() * self.speed + self.gravity;

        self.transparency -= self.decay;
        // Expiry one step early, while still faintly visible; the threshold is
        // part of the tuned burst duration
        if self.transparency <= self.decay {
            ImpactStep::Expired
        } else {
            ImpactStep::Alive
        }
    }

    /// Stroke the trail segment in this impact's own hue, with the remaining
    /// transparency as alpha.
    pub fn draw(&self, frame: &mut Frame) {
        frame.stroke_line(
            self.trail.oldest(),
            self.pos,
            Hsla::new(self.hue, 100.0, self.brightness, self.transparency),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(11)
    }

    #[test]
    fn test_transparency_decreases_linearly() {
        let settings = Settings::default();
        let mut impact = Impact::new(Vec2::ZERO, 120.0, &settings, &mut rng());
        let base = impact.transparency;
        let decay = impact.decay;

        for n in 1..=3 {
            if impact.update() == ImpactStep::Expired {
                break;
            }
            let expected = base - n as f32 * decay;
            assert!((impact.transparency - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_expiry_at_threshold_not_strictly_below() {
        let settings = Settings::default();
        let mut impact = Impact::new(Vec2::ZERO, 120.0, &settings, &mut rng());
        impact.decay = 0.25;
        // One update leaves transparency exactly at the decay rate
        impact.transparency = 0.5;
        assert_eq!(impact.update(), ImpactStep::Expired);

        // Just above the threshold it survives
        let mut impact = Impact::new(Vec2::ZERO, 120.0, &settings, &mut rng());
        impact.decay = 0.25;
        impact.transparency = 0.6;
        assert_eq!(impact.update(), ImpactStep::Alive);
    }

    #[test]
    fn test_speed_decays_geometrically() {
        let settings = Settings::default();
        let mut impact = Impact::new(Vec2::ZERO, 120.0, &settings, &mut rng());
        let initial = impact.speed;
        // Keep it alive long enough to observe the decay
        impact.transparency = 100.0;

        for n in 1..=30 {
            impact.update();
            let expected = initial * settings.impact_friction.powi(n);
            assert!((impact.speed - expected).abs() / expected < 1e-3);
            assert!(impact.speed > 0.0);
        }
    }

    #[test]
    fn test_gravity_only_affects_y() {
        let settings = Settings {
            impact_gravity: 0.7,
            ..Default::default()
        };
        let mut impact = Impact::new(Vec2::ZERO, 120.0, &settings, &mut rng());
        impact.transparency = 100.0;

        // Pin the angle so the outward motion is purely horizontal
        impact.angle = 0.0;
        let speed = impact.speed * impact.friction;
        impact.update();
        assert!((impact.pos.x - speed).abs() < 1e-5);
        assert!((impact.pos.y - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_trail_length_constant() {
        let settings = Settings::default();
        let mut impact = Impact::new(Vec2::ZERO, 120.0, &settings, &mut rng());
        let len = impact.trail.len();
        impact.transparency = 100.0;
        for _ in 0..50 {
            impact.update();
            assert_eq!(impact.trail.len(), len);
        }
    }
}
