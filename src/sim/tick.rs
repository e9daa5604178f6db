//! Frame orchestrator
//!
//! One tick per display frame. Each tick advances the global hue, emits the
//! canvas fade, walks both registries in reverse drawing then updating each
//! entity (reverse order keeps in-place removal stable), and finally runs
//! the automated and manual launch checks. Deliberately not frame-rate
//! independent: a slow frame shows a larger per-tick jump, as tuned.

use glam::Vec2;
use rand::Rng;

use super::bullet::BulletStep;
use super::frame::Frame;
use super::impact::ImpactStep;
use super::state::SimState;
use crate::settings::Settings;

/// Snapshot of the external input state, read once per tick.
///
/// Written by the platform's event listeners between ticks; on a
/// multi-threaded platform the writer must hand over a coherent snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Current canvas size in pixels
    pub bounds: Vec2,
    /// Pointer position relative to the canvas origin
    pub pointer: Vec2,
    /// Primary button (or touch) held
    pub pointer_down: bool,
}

/// Advance the animation by one tick, filling `frame` with this tick's
/// display list.
pub fn tick(state: &mut SimState, input: &FrameInput, settings: &Settings, frame: &mut Frame) {
    frame.clear();

    state.hue += settings.hue_step;

    frame.fade(settings.fade_alpha);

    // Bullets: draw with pre-update state, then move; arrivals detonate
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        state.bullets[i].draw(state.hue, settings, frame);
        if state.bullets[i].update(settings) == BulletStep::Arrived {
            let end = state.bullets[i].end;
            state.bullets.remove(i);
            state.create_impacts(end, settings);
        }
    }

    // Impacts spawned above are already in the registry and get their first
    // draw/update this same tick
    let mut i = state.impacts.len();
    while i > 0 {
        i -= 1;
        state.impacts[i].draw(frame);
        if state.impacts[i].update() == ImpactStep::Expired {
            state.impacts.remove(i);
        }
    }

    launch_automated(state, input, settings);
    launch_manual(state, input, settings);
}

/// Automated launches: once enough ticks have passed (against a threshold
/// redrawn each check) and the pointer is idle, fire from a cached edge
/// point to a random target in the top half of the canvas.
fn launch_automated(state: &mut SimState, input: &FrameInput, settings: &Settings) {
    let threshold = state
        .rng()
        .random_range(settings.auto_launch_ticks_min as f32..=settings.auto_launch_ticks_max as f32);

    if state.ticks_since_auto as f32 >= threshold {
        if !input.pointer_down {
            let start = state.starting_point(input.bounds);
            let end = Vec2::new(
                state.rng().random_range(0.0..input.bounds.x),
                state.rng().random_range(0.0..input.bounds.y / 2.0),
            );
            state.spawn_bullet(start, end, settings);
            state.ticks_since_auto = 0;
        }
    } else {
        state.ticks_since_auto += 1;
    }
}

/// Manual launches: while the pointer is held, fire from the bottom center
/// toward the pointer, rate-limited to one per `manual_launch_ticks_min`.
fn launch_manual(state: &mut SimState, input: &FrameInput, settings: &Settings) {
    if state.ticks_since_manual >= settings.manual_launch_ticks_min {
        if input.pointer_down {
            let start = Vec2::new(input.bounds.x / 2.0, input.bounds.y);
            state.spawn_bullet(start, input.pointer, settings);
            state.ticks_since_manual = 0;
        }
    } else {
        state.ticks_since_manual += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EDGE_POINT_CACHE_SIZE;
    use crate::sim::frame::DrawCmd;

    fn input() -> FrameInput {
        FrameInput {
            bounds: Vec2::new(800.0, 600.0),
            pointer: Vec2::ZERO,
            pointer_down: false,
        }
    }

    /// Settings with spawning effectively disabled, for isolated runs
    fn quiet_settings() -> Settings {
        Settings {
            auto_launch_ticks_min: 1_000_000,
            auto_launch_ticks_max: 1_000_001,
            ..Default::default()
        }
    }

    #[test]
    fn test_fade_is_emitted_first_every_tick() {
        let settings = quiet_settings();
        let mut state = SimState::new(5);
        let mut frame = Frame::new();

        for _ in 0..3 {
            tick(&mut state, &input(), &settings, &mut frame);
            assert!(matches!(
                frame.cmds[0],
                DrawCmd::Fade { alpha } if alpha == settings.fade_alpha
            ));
        }
    }

    #[test]
    fn test_hue_advances_every_tick() {
        let settings = quiet_settings();
        let mut state = SimState::new(5);
        let mut frame = Frame::new();
        let start = state.hue;

        for _ in 0..10 {
            tick(&mut state, &input(), &settings, &mut frame);
        }
        assert!((state.hue - (start + 10.0 * settings.hue_step)).abs() < 1e-4);
    }

    #[test]
    fn test_bullet_drawn_before_it_moves() {
        let settings = quiet_settings();
        let mut state = SimState::new(5);
        state.spawn_bullet(Vec2::new(10.0, 20.0), Vec2::new(300.0, 30.0), &settings);
        let mut frame = Frame::new();

        tick(&mut state, &input(), &settings, &mut frame);

        // First stroke after the fade starts at the spawn point: the entity is
        // rendered before this tick's motion is applied
        assert!(matches!(
            frame.cmds[1],
            DrawCmd::Line { from, to, .. }
                if from == Vec2::new(10.0, 20.0) && to == Vec2::new(10.0, 20.0)
        ));
    }

    #[test]
    fn test_arrival_detonates_exactly_one_burst() {
        let settings = quiet_settings();
        let mut state = SimState::new(5);
        state.spawn_bullet(Vec2::ZERO, Vec2::new(100.0, 100.0), &settings);
        let mut frame = Frame::new();

        let mut ticks = 0;
        while !state.bullets.is_empty() {
            ticks += 1;
            assert!(ticks < 10_000, "bullet never arrived");
            tick(&mut state, &input(), &settings, &mut frame);
        }

        // One arrival, one burst; nothing has had time to expire
        assert_eq!(state.impacts.len(), settings.impact_count as usize);
    }

    #[test]
    fn test_burst_eventually_decays_to_empty() {
        let settings = quiet_settings();
        let mut state = SimState::new(5);
        state.create_impacts(Vec2::new(50.0, 50.0), &settings);
        let mut frame = Frame::new();

        let mut ticks = 0;
        while !state.impacts.is_empty() {
            ticks += 1;
            assert!(ticks < 1_000, "impacts never expired");
            tick(&mut state, &input(), &settings, &mut frame);
        }
    }

    #[test]
    fn test_automated_launch_fires_at_threshold() {
        let settings = Settings::default();
        let mut state = SimState::new(5);
        let mut frame = Frame::new();

        // Force the counter past any drawable threshold
        state.ticks_since_auto = settings.auto_launch_ticks_max;
        tick(&mut state, &input(), &settings, &mut frame);

        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.ticks_since_auto, 0);

        let bullet = &state.bullets[0];
        let b = input().bounds;
        let on_edge = bullet.start.x == 0.0
            || bullet.start.x == b.x
            || bullet.start.y == 0.0
            || bullet.start.y == b.y;
        assert!(on_edge, "automated start {:?} is not an edge point", bullet.start);
        assert!(state.edge_points.contains(&bullet.start));
        assert!(bullet.end.x >= 0.0 && bullet.end.x <= b.x);
        assert!(bullet.end.y >= 0.0 && bullet.end.y <= b.y / 2.0);
    }

    #[test]
    fn test_automated_launch_suppressed_while_pointer_held() {
        let settings = Settings::default();
        let mut state = SimState::new(5);
        let mut frame = Frame::new();

        state.ticks_since_auto = settings.auto_launch_ticks_max;
        let held = FrameInput {
            pointer_down: true,
            pointer: Vec2::new(400.0, 100.0),
            ..input()
        };
        // The manual path may fire; the automated one must not
        state.ticks_since_manual = 0;
        tick(&mut state, &held, &settings, &mut frame);

        assert!(state.bullets.is_empty());
        assert_eq!(state.ticks_since_auto, settings.auto_launch_ticks_max);
    }

    #[test]
    fn test_manual_launch_respects_cadence_and_targets_pointer() {
        let settings = quiet_settings();
        let mut state = SimState::new(5);
        let mut frame = Frame::new();
        let held = FrameInput {
            pointer_down: true,
            pointer: Vec2::new(250.0, 111.0),
            ..input()
        };

        // Below the minimum: no launch, counter advances
        tick(&mut state, &held, &settings, &mut frame);
        assert!(state.bullets.is_empty());

        for _ in 0..settings.manual_launch_ticks_min {
            tick(&mut state, &held, &settings, &mut frame);
        }
        assert_eq!(state.bullets.len(), 1);

        let bullet = &state.bullets[0];
        assert_eq!(bullet.start, Vec2::new(400.0, 600.0));
        assert_eq!(bullet.end, Vec2::new(250.0, 111.0));
        assert_eq!(state.ticks_since_manual, 0);
    }

    #[test]
    fn test_manual_launch_idle_when_pointer_up() {
        let settings = quiet_settings();
        let mut state = SimState::new(5);
        let mut frame = Frame::new();

        for _ in 0..50 {
            tick(&mut state, &input(), &settings, &mut frame);
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_long_run_keeps_edge_cache_bounded() {
        let settings = Settings::default();
        let mut state = SimState::new(5);
        let mut frame = Frame::new();

        for _ in 0..2_000 {
            tick(&mut state, &input(), &settings, &mut frame);
        }
        assert!(state.edge_points.len() <= EDGE_POINT_CACHE_SIZE);
    }
}
