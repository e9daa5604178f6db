//! Curved-path projectile
//!
//! A bullet flies a quadratic Bezier arc from its start point to its end
//! point, accelerating the whole way. The curve's control point sits above
//! the higher endpoint and lifts further as cumulative distance grows, so a
//! long flight steepens into a lob. Arrival detonates an impact burst (the
//! orchestrator handles removal and the burst itself).

use glam::Vec2;
use rand::Rng;

use super::frame::{Frame, Hsla};
use super::trail::Trail;
use crate::consts::*;
use crate::settings::Settings;

/// Outcome of one bullet update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletStep {
    /// Still traveling
    InFlight,
    /// Reached (and snapped to) the end point this tick
    Arrived,
}

/// One in-flight projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Current position
    pub pos: Vec2,
    pub start: Vec2,
    pub end: Vec2,
    /// Straight-line start-to-end distance, fixed at creation
    pub total_distance: f32,
    /// Cumulative distance along the curved path; only increases
    pub distance_traveled: f32,
    pub trail: Trail,
    /// Travel angle from start to end. Informational; motion follows the curve.
    pub angle: f32,
    pub speed: f32,
    pub acceleration: f32,
    /// HSL lightness %, fixed at creation
    pub brightness: f32,
    /// Animated radius of the target reticle
    pub reticle_radius: f32,
}

impl Bullet {
    pub fn new<R: Rng>(start: Vec2, end: Vec2, settings: &Settings, rng: &mut R) -> Self {
        Self {
            pos: start,
            start,
            end,
            total_distance: start.distance(end),
            distance_traveled: 0.0,
            trail: Trail::filled(settings.bullet_trail_length, start),
            angle: (end.y - start.y).atan2(end.x - start.x),
            speed: settings.bullet_speed,
            acceleration: settings.bullet_acceleration,
            brightness: rng
                .random_range(settings.bullet_brightness_min..=settings.bullet_brightness_max),
            reticle_radius: RETICLE_RADIUS_MIN,
        }
    }

    /// Advance one tick. On arrival the position snaps exactly to the end
    /// point so the final stroke leaves no gap.
    pub fn update(&mut self, settings: &Settings) -> BulletStep {
        self.trail.record(self.pos);

        // The reticle pulses on its own cycle, independent of flight time
        if settings.bullet_reticle_enabled {
            if self.reticle_radius < RETICLE_RADIUS_MAX {
                self.reticle_radius += RETICLE_RADIUS_STEP;
            } else {
                self.reticle_radius = RETICLE_RADIUS_MIN;
            }
        }

        self.speed *= self.acceleration;
        self.distance_traveled += self.speed;

        // A degenerate zero-length flight counts as already complete
        let t = if self.total_distance > 0.0 {
            (self.distance_traveled / self.total_distance).min(1.0)
        } else {
            1.0
        };

        let control = Vec2::new(
            (self.start.x + self.end.x) / 2.0,
            self.start.y.min(self.end.y)
                - (ARC_BASE_LIFT + self.distance_traveled * ARC_LIFT_PER_TRAVEL),
        );

        let u = 1.0 - t;
        self.pos = self.start * (u * u) + control * (2.0 * u * t) + self.end * (t * t);
        self.pos.y += ARC_DROP_PER_TICK;

        if self.distance_traveled >= self.total_distance {
            self.pos = self.end;
            BulletStep::Arrived
        } else {
            BulletStep::InFlight
        }
    }

    /// Stroke the trail segment, and the target reticle when enabled.
    /// Bullets take the rotating global hue.
    pub fn draw(&self, hue: f32, settings: &Settings, frame: &mut Frame) {
        let color = Hsla::stroke(hue, self.brightness);
        frame.stroke_line(self.trail.oldest(), self.pos, color);
        if settings.bullet_reticle_enabled {
            frame.stroke_circle(self.end, self.reticle_radius, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_speed_compounds_each_update() {
        let settings = Settings::default();
        let mut bullet = Bullet::new(
            Vec2::ZERO,
            Vec2::new(10_000.0, 0.0),
            &settings,
            &mut rng(),
        );

        let mut prev = bullet.speed;
        for n in 1..=20 {
            bullet.update(&settings);
            let expected = settings.bullet_speed * settings.bullet_acceleration.powi(n);
            assert!((bullet.speed - expected).abs() / expected < 1e-4);
            assert!(bullet.speed >= prev);
            prev = bullet.speed;
        }
    }

    #[test]
    fn test_zero_distance_bullet_arrives_immediately() {
        let settings = Settings::default();
        let p = Vec2::new(42.0, 17.0);
        let mut bullet = Bullet::new(p, p, &settings, &mut rng());

        assert_eq!(bullet.update(&settings), BulletStep::Arrived);
        assert_eq!(bullet.pos, p);
        assert!(bullet.pos.x.is_finite() && bullet.pos.y.is_finite());
    }

    #[test]
    fn test_arrival_snaps_to_end() {
        let settings = Settings::default();
        let end = Vec2::new(100.0, 100.0);
        let mut bullet = Bullet::new(Vec2::ZERO, end, &settings, &mut rng());

        let mut steps = 0;
        loop {
            steps += 1;
            assert!(steps < 10_000, "bullet never arrived");
            if bullet.update(&settings) == BulletStep::Arrived {
                break;
            }
        }
        assert_eq!(bullet.pos, end);
    }

    #[test]
    fn test_reticle_pulses_and_resets() {
        let settings = Settings::default();
        let mut bullet = Bullet::new(
            Vec2::ZERO,
            Vec2::new(100_000.0, 0.0),
            &settings,
            &mut rng(),
        );

        let mut seen_reset = false;
        let mut prev = bullet.reticle_radius;
        for _ in 0..100 {
            bullet.update(&settings);
            if bullet.reticle_radius < prev {
                assert_eq!(bullet.reticle_radius, RETICLE_RADIUS_MIN);
                seen_reset = true;
            }
            assert!(bullet.reticle_radius <= RETICLE_RADIUS_MAX + RETICLE_RADIUS_STEP);
            prev = bullet.reticle_radius;
        }
        assert!(seen_reset, "reticle never cycled back to its minimum");
    }

    #[test]
    fn test_reticle_frozen_when_disabled() {
        let settings = Settings {
            bullet_reticle_enabled: false,
            ..Default::default()
        };
        let mut bullet = Bullet::new(Vec2::ZERO, Vec2::new(500.0, 0.0), &settings, &mut rng());
        bullet.update(&settings);
        assert_eq!(bullet.reticle_radius, RETICLE_RADIUS_MIN);
    }

    #[test]
    fn test_draw_strokes_from_oldest_trail_point() {
        let settings = Settings::default();
        let bullet = Bullet::new(Vec2::new(3.0, 4.0), Vec2::new(80.0, 9.0), &settings, &mut rng());

        let mut frame = Frame::new();
        bullet.draw(120.0, &settings, &mut frame);

        // Fresh bullet: the trail is seeded with the start position
        assert!(matches!(
            frame.cmds[0],
            super::super::frame::DrawCmd::Line { from, to, .. }
                if from == Vec2::new(3.0, 4.0) && to == Vec2::new(3.0, 4.0)
        ));
        // Reticle circle centered on the end point
        assert!(matches!(
            frame.cmds[1],
            super::super::frame::DrawCmd::Circle { center, .. } if center == Vec2::new(80.0, 9.0)
        ));
    }

    proptest! {
        #[test]
        fn prop_trail_length_constant_and_travel_monotonic(
            sx in -2000.0f32..2000.0,
            sy in -2000.0f32..2000.0,
            ex in -2000.0f32..2000.0,
            ey in -2000.0f32..2000.0,
            seed in 0u64..1000,
        ) {
            let settings = Settings::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut bullet = Bullet::new(
                Vec2::new(sx, sy),
                Vec2::new(ex, ey),
                &settings,
                &mut rng,
            );
            let trail_len = bullet.trail.len();

            let mut traveled = 0.0;
            for _ in 0..200 {
                let step = bullet.update(&settings);
                prop_assert_eq!(bullet.trail.len(), trail_len);
                prop_assert!(bullet.distance_traveled >= traveled);
                prop_assert!(bullet.pos.x.is_finite() && bullet.pos.y.is_finite());
                traveled = bullet.distance_traveled;
                if step == BulletStep::Arrived {
                    prop_assert_eq!(bullet.pos, Vec2::new(ex, ey));
                    break;
                }
            }
        }
    }
}
