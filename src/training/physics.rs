//! Buoyancy movement: the per-frame integrator for the astronaut.
//!
//! ## Pipeline (one call to [`step`] per frame, in this order)
//!
//! 1. [`apply_intent`]: each held direction adds `acceleration` to velocity.
//! 2. Add the ambient drift vector.
//! 3. [`apply_friction`]: multiplicative damping, every frame.
//! 4. [`clamp_speed`]: vector magnitude clamp to `max_speed`.
//! 5. Explicit Euler step: `position += velocity` (one frame = one step).
//! 6. [`PlayArea::clamp`]: keep the whole sprite box on screen.
//!
//! Coordinates are screen space: origin top-left, y grows downward.

use super::input::MoveIntent;
use crate::config::TrainingConfig;
use bevy::math::{Rect, Vec2};
use rand::Rng;

/// Visible play surface in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fallback area from config, used until a window reports its size.
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(config.play_width, config.play_height)
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamp the top-left of a square box of side `size` so the box stays
    /// fully inside the area on all four sides.
    ///
    /// Uses `min` then `max` rather than `f32::clamp` so an area smaller than
    /// the box pins it to the origin instead of panicking.
    pub fn clamp(self, position: Vec2, size: f32) -> Vec2 {
        Vec2::new(
            position.x.min(self.width - size).max(0.0),
            position.y.min(self.height - size).max(0.0),
        )
    }
}

/// The astronaut: a square sprite box with a velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Top-left corner of the sprite box.
    pub position: Vec2,
    /// Pixels per frame.
    pub velocity: Vec2,
    /// Whether any direction was held this frame.
    pub moving: bool,
    /// Side length of the sprite box.
    pub size: f32,
}

impl PlayerState {
    /// A motionless astronaut centred in `area`.
    pub fn centered(area: PlayArea, size: f32) -> Self {
        Self {
            position: area.clamp((area.size() - Vec2::splat(size)) * 0.5, size),
            velocity: Vec2::ZERO,
            moving: false,
            size,
        }
    }

    /// Centre of the sprite box; proximity checks measure from here.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size * 0.5)
    }

    /// Bounding box used for the repair-zone overlap test.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + Vec2::splat(self.size))
    }
}

/// Draw a fresh drift vector; each axis is uniform in `[-strength/2, strength/2)`.
pub fn reroll_drift<R: Rng + ?Sized>(rng: &mut R, strength: f32) -> Vec2 {
    Vec2::new(
        (rng.gen::<f32>() - 0.5) * strength,
        (rng.gen::<f32>() - 0.5) * strength,
    )
}

/// Add `acceleration` per held direction and record the moving flag.
pub fn apply_intent(player: &mut PlayerState, intent: &MoveIntent, acceleration: f32) {
    player.velocity += intent.axes() * acceleration;
    player.moving = intent.any();
}

#[inline]
pub fn apply_friction(velocity: Vec2, friction: f32) -> Vec2 {
    velocity * friction
}

/// Clamp the velocity **vector** to `max_speed`, preserving direction.
#[inline]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    velocity.clamp_length_max(max_speed)
}

/// Advance the astronaut by one frame.
pub fn step(
    player: &mut PlayerState,
    intent: &MoveIntent,
    drift: Vec2,
    config: &TrainingConfig,
    area: PlayArea,
) {
    apply_intent(player, intent, config.acceleration);
    player.velocity += drift;
    player.velocity = apply_friction(player.velocity, config.friction);
    player.velocity = clamp_speed(player.velocity, config.max_speed);
    player.position += player.velocity;
    player.position = area.clamp(player.position, player.size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn area() -> PlayArea {
        PlayArea::new(1400.0, 800.0)
    }

    #[test]
    fn centered_player_sits_in_the_middle() {
        let p = PlayerState::centered(area(), 220.0);
        assert_eq!(p.position, Vec2::new(590.0, 290.0));
        assert_eq!(p.center(), Vec2::new(700.0, 400.0));
    }

    #[test]
    fn held_key_never_exceeds_max_speed() {
        let config = TrainingConfig::default();
        let mut p = PlayerState::centered(area(), config.player_size);
        let intent = MoveIntent {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..500 {
            step(&mut p, &intent, Vec2::new(0.15, 0.15), &config, area());
            assert!(p.velocity.length() <= config.max_speed + 1e-4);
        }
    }

    #[test]
    fn diagonal_speed_is_clamped_as_a_vector() {
        let v = clamp_speed(Vec2::new(6.0, 6.0), 6.0);
        assert!((v.length() - 6.0).abs() < 1e-4);
        assert!((v.x - v.y).abs() < 1e-6, "direction preserved");
    }

    #[test]
    fn friction_damps_without_input() {
        let config = TrainingConfig::default();
        let mut p = PlayerState::centered(area(), config.player_size);
        p.velocity = Vec2::new(4.0, 0.0);
        step(&mut p, &MoveIntent::IDLE, Vec2::ZERO, &config, area());
        assert!((p.velocity.x - 3.8).abs() < 1e-5);
        assert!(!p.moving);
    }

    #[test]
    fn position_is_clamped_on_all_sides() {
        let config = TrainingConfig::default();
        let a = area();
        let mut p = PlayerState::centered(a, config.player_size);
        for intent in [
            MoveIntent { left: true, up: true, ..Default::default() },
            MoveIntent { right: true, down: true, ..Default::default() },
        ] {
            for _ in 0..400 {
                step(&mut p, &intent, Vec2::ZERO, &config, a);
                assert!(p.position.x >= 0.0 && p.position.x <= a.width - p.size);
                assert!(p.position.y >= 0.0 && p.position.y <= a.height - p.size);
            }
        }
        assert_eq!(p.position, Vec2::new(a.width - p.size, a.height - p.size));
    }

    #[test]
    fn drift_components_stay_within_half_strength() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let d = reroll_drift(&mut rng, 0.3);
            assert!(d.x >= -0.15 && d.x < 0.15);
            assert!(d.y >= -0.15 && d.y < 0.15);
        }
    }

    #[test]
    fn area_smaller_than_player_pins_to_origin() {
        let tiny = PlayArea::new(100.0, 100.0);
        assert_eq!(tiny.clamp(Vec2::new(50.0, 50.0), 220.0), Vec2::ZERO);
    }
}
