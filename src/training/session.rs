//! Mutable state of one training attempt.

use bevy::math::Vec2;

use super::oxygen::Oxygen;
use super::physics::{PlayArea, PlayerState};
use super::repair::RepairZone;
use super::stage::Stage;
use super::tools::{layout_tools, Tool};
use crate::config::TrainingConfig;

/// Everything that changes from frame to frame.
///
/// Rebuilt from scratch by [`TrainingSession::new`] on every start or
/// restart; nothing survives from a previous attempt.
#[derive(Debug, Clone)]
pub struct TrainingSession {
    pub area: PlayArea,
    pub player: PlayerState,
    pub tools: Vec<Tool>,
    pub stage: Stage,
    pub oxygen: Oxygen,
    /// Current ambient drift, rerolled on a fixed cadence.
    pub drift: Vec2,
    /// Frames run since the session started.
    pub frame: u64,
    /// Frames spent in the current stage (drives the gravity timer).
    pub stage_frames: u32,
    /// Frames since the last oxygen drain.
    pub oxygen_timer: u32,
    /// Frames left before another tool may be collected.
    pub collection_cooldown: u32,
    /// Set once on reaching the repair zone; switches the backdrop art.
    pub ship_repaired: bool,
    /// Frames left until victory after the repair; `None` until armed.
    pub repair_countdown: Option<u32>,
    /// Frames the instruction banner stays visible.
    pub banner_frames: u32,
}

impl TrainingSession {
    pub fn new(area: PlayArea, config: &TrainingConfig) -> Self {
        Self {
            area,
            player: PlayerState::centered(area, config.player_size),
            tools: layout_tools(area, config.tool_padding),
            stage: Stage::Gravity,
            oxygen: Oxygen::full(),
            drift: Vec2::ZERO,
            frame: 0,
            stage_frames: 0,
            oxygen_timer: 0,
            collection_cooldown: 0,
            ship_repaired: false,
            repair_countdown: None,
            banner_frames: config.instruction_frames,
        }
    }

    /// Repair zone for the current area.
    pub fn repair_zone(&self, config: &TrainingConfig) -> RepairZone {
        RepairZone::for_area(self.area, config)
    }

    /// Move to the stage after this one, resetting the stage timer and
    /// showing the new instruction banner.  Returns the `(from, to)` pair, or
    /// `None` if the stage is absorbing.
    pub fn advance(&mut self, config: &TrainingConfig) -> Option<(Stage, Stage)> {
        let from = self.stage;
        let to = from.next()?;
        self.enter(to, config);
        Some((from, to))
    }

    /// Fail the session after oxygen depletion.
    pub fn fail(&mut self, config: &TrainingConfig) -> Option<(Stage, Stage)> {
        let from = self.stage;
        let to = from.on_depletion()?;
        self.enter(to, config);
        Some((from, to))
    }

    fn enter(&mut self, stage: Stage, config: &TrainingConfig) {
        self.stage = stage;
        self.stage_frames = 0;
        self.banner_frames = if stage.instruction().is_some() {
            config.instruction_frames
        } else {
            0
        };
    }

    /// Follow a resized window: keep the astronaut on screen and re-anchor
    /// the tools that have not been picked up yet.
    pub fn resize(&mut self, area: PlayArea, config: &TrainingConfig) {
        if area == self.area {
            return;
        }
        self.area = area;
        self.player.position = area.clamp(self.player.position, self.player.size);
        for (tool, fresh) in self
            .tools
            .iter_mut()
            .zip(layout_tools(area, config.tool_padding))
        {
            if !tool.collected {
                tool.position = fresh.position;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_clean() {
        let config = TrainingConfig::default();
        let s = TrainingSession::new(PlayArea::from_config(&config), &config);
        assert_eq!(s.stage, Stage::Gravity);
        assert_eq!(s.oxygen, Oxygen::full());
        assert!(s.tools.iter().all(|t| !t.collected));
        assert_eq!(s.banner_frames, config.instruction_frames);
        assert!(!s.ship_repaired);
        assert_eq!(s.repair_countdown, None);
    }

    #[test]
    fn advance_stops_at_victory() {
        let config = TrainingConfig::default();
        let mut s = TrainingSession::new(PlayArea::from_config(&config), &config);
        assert_eq!(s.advance(&config), Some((Stage::Gravity, Stage::Collect)));
        assert_eq!(s.advance(&config), Some((Stage::Collect, Stage::Repair)));
        assert_eq!(s.advance(&config), Some((Stage::Repair, Stage::Victory)));
        assert_eq!(s.banner_frames, 0);
        assert_eq!(s.advance(&config), None);
        assert_eq!(s.fail(&config), None);
    }

    #[test]
    fn gravity_stage_cannot_fail() {
        let config = TrainingConfig::default();
        let mut s = TrainingSession::new(PlayArea::from_config(&config), &config);
        assert_eq!(s.fail(&config), None);
        assert_eq!(s.stage, Stage::Gravity);
    }

    #[test]
    fn resize_keeps_player_on_screen_and_collected_tools_in_place() {
        let config = TrainingConfig::default();
        let mut s = TrainingSession::new(PlayArea::from_config(&config), &config);
        s.player.position = Vec2::new(1100.0, 500.0);
        s.tools[0].collected = true;
        let kept = s.tools[0].position;

        s.resize(PlayArea::new(1000.0, 600.0), &config);
        assert_eq!(s.player.position, Vec2::new(780.0, 380.0));
        assert_eq!(s.tools[0].position, kept);
        for t in s.tools.iter().filter(|t| !t.collected) {
            assert!(t.position.x <= 900.0 && t.position.y <= 500.0, "{t:?}");
        }
    }
}
