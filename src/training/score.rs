//! Mission score and the running session total.

use bevy::prelude::Resource;

use super::session::TrainingSession;
use super::stage::Stage;
use super::tools::collected_count;
use crate::constants::{MISSION_SCORE_CAP, SCORE_PER_TOOL, SESSION_SCORE_CAP};

/// Score for a finished attempt: half a point per remaining oxygen percent
/// plus a flat bonus per tool, capped at [`MISSION_SCORE_CAP`].
///
/// Only a `Victory` scores; anything else is worth nothing.
pub fn mission_score(session: &TrainingSession) -> u32 {
    if session.stage != Stage::Victory {
        return 0;
    }
    let oxygen = (session.oxygen.fraction() * MISSION_SCORE_CAP as f32).round() as u32;
    let tools = collected_count(&session.tools) as u32 * SCORE_PER_TOOL;
    (oxygen + tools).min(MISSION_SCORE_CAP)
}

/// Points banked across attempts in this run of the game.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionScore {
    total: u32,
    missions: u32,
}

impl SessionScore {
    #[inline]
    pub fn total(self) -> u32 {
        self.total
    }

    /// Completed missions banked so far.
    #[inline]
    pub fn missions(self) -> u32 {
        self.missions
    }

    /// Add a mission score; the total saturates at [`SESSION_SCORE_CAP`].
    pub fn bank(&mut self, points: u32) -> u32 {
        self.total = (self.total + points).min(SESSION_SCORE_CAP);
        self.missions += 1;
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainingConfig;
    use crate::training::physics::PlayArea;

    fn finished(oxygen_used: f32) -> TrainingSession {
        let config = TrainingConfig::default();
        let mut s = TrainingSession::new(PlayArea::from_config(&config), &config);
        s.stage = Stage::Victory;
        s.oxygen.drain(oxygen_used);
        for t in &mut s.tools {
            t.collected = true;
        }
        s
    }

    #[test]
    fn score_is_capped_per_mission() {
        assert_eq!(mission_score(&finished(0.0)), 50);
    }

    #[test]
    fn score_counts_oxygen_and_tools() {
        // 40% oxygen -> 20, eight tools -> 40, capped at 50.
        assert_eq!(mission_score(&finished(60.0)), 50);
        // 10% oxygen -> 5, plus 40.
        assert_eq!(mission_score(&finished(90.0)), 45);
    }

    #[test]
    fn only_victory_scores() {
        let mut s = finished(0.0);
        s.stage = Stage::GameOver;
        assert_eq!(mission_score(&s), 0);
    }

    #[test]
    fn session_total_saturates() {
        let mut total = SessionScore::default();
        total.bank(50);
        total.bank(45);
        assert_eq!(total.bank(50), 100);
        assert_eq!(total.missions(), 3);
    }
}
