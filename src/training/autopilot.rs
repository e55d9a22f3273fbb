//! Scripted pilot for unattended runs.
//!
//! Steers toward the nearest uncollected tool, then the repair zone, with a
//! simple proportional controller: the desired velocity is the offset to the target scaled down
//! and clamped to the top speed, and a direction is held whenever the actual
//! velocity lags the desired one by more than a small dead band.

use bevy::math::Vec2;

use super::input::MoveIntent;
use super::session::TrainingSession;
use super::tick::current_target;
use crate::config::TrainingConfig;

const GAIN: f32 = 0.1;
const DEAD_BAND: f32 = 0.2;

/// Keys to hold this frame to close in on the current objective.
pub fn steer(session: &TrainingSession, config: &TrainingConfig) -> MoveIntent {
    let Some(target) = current_target(session, config) else {
        return MoveIntent::IDLE;
    };
    let delta = target - session.player.center();
    let desired = (delta * GAIN).clamp(Vec2::splat(-config.max_speed), Vec2::splat(config.max_speed));
    let lag = desired - session.player.velocity;
    MoveIntent {
        left: lag.x < -DEAD_BAND,
        right: lag.x > DEAD_BAND,
        up: lag.y < -DEAD_BAND,
        down: lag.y > DEAD_BAND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::physics::PlayArea;
    use crate::training::stage::Stage;

    #[test]
    fn idle_without_objective() {
        let config = TrainingConfig::default();
        let s = TrainingSession::new(PlayArea::from_config(&config), &config);
        assert_eq!(steer(&s, &config), MoveIntent::IDLE);
    }

    #[test]
    fn heads_for_nearest_tool() {
        let config = TrainingConfig::default();
        let mut s = TrainingSession::new(PlayArea::from_config(&config), &config);
        s.stage = Stage::Collect;
        // Nearest tool is at (800, 350): right and up of the centre.
        let intent = steer(&s, &config);
        assert!(intent.right && intent.up);
        assert!(!intent.left && !intent.down);
    }
}
