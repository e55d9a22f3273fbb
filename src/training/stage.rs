//! The training stage machine.
//!
//! ```text
//!   Gravity ──timer──▶ Collect ──all tools──▶ Repair ──zone + delay──▶ Victory
//!                         │                     │
//!                         └──oxygen = 0──┬──────┘
//!                                        ▼
//!                                     GameOver
//! ```
//!
//! Callers never name a target stage directly: progress goes through
//! [`Stage::next`] and depletion through [`Stage::on_depletion`], so the only
//! transitions that can happen are the ones drawn above.

/// The single active stage of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Timed adaptation to the drifting controls.
    #[default]
    Gravity,
    /// Collect every tool before the oxygen runs out.
    Collect,
    /// Reach the repair zone with the collected tools.
    Repair,
    /// Ship repaired; absorbing.
    Victory,
    /// Oxygen depleted; absorbing.
    GameOver,
}

impl Stage {
    /// Stage reached by completing this one.  `None` for absorbing stages.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Gravity => Some(Stage::Collect),
            Stage::Collect => Some(Stage::Repair),
            Stage::Repair => Some(Stage::Victory),
            Stage::Victory | Stage::GameOver => None,
        }
    }

    /// Stage reached when oxygen hits zero.  Only consuming stages can fail.
    pub fn on_depletion(self) -> Option<Stage> {
        if self.consumes_oxygen() {
            Some(Stage::GameOver)
        } else {
            None
        }
    }

    /// `true` for `Victory` and `GameOver`: no physics, no oxygen, no exits
    /// other than a full restart.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Victory | Stage::GameOver)
    }

    /// Whether the oxygen timer runs during this stage.
    #[inline]
    pub fn consumes_oxygen(self) -> bool {
        matches!(self, Stage::Collect | Stage::Repair)
    }

    /// Whether the HUD shows the tool counter.
    #[inline]
    pub fn shows_tool_tally(self) -> bool {
        matches!(self, Stage::Collect | Stage::Repair)
    }

    /// Label shown in the HUD's "current stage" panel.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Gravity => "01 - GRAVITY ADAPTATION",
            Stage::Collect => "02 - TOOL COLLECTION",
            Stage::Repair => "03 - SHIP REPAIR",
            Stage::Victory => "MISSION COMPLETE",
            Stage::GameOver => "GAME OVER",
        }
    }

    /// Instruction banner text, if the stage has one.
    pub fn instruction(self) -> Option<&'static str> {
        match self {
            Stage::Gravity => Some("Use WASD or Arrow Keys to adapt to underwater movement"),
            Stage::Collect => Some("Collect all tools scattered around the facility!"),
            Stage::Repair => Some("Navigate to the REPAIR ZONE with your tools!"),
            Stage::Victory | Stage::GameOver => None,
        }
    }

    /// Number of lit progress markers (out of [`crate::constants::PROGRESS_MARKERS`]).
    ///
    /// | Stage    | Lit |
    /// |----------|-----|
    /// | Gravity  | 1   |
    /// | Collect  | 2   |
    /// | Repair   | 3   |
    /// | Victory  | 4   |
    /// | GameOver | 0   |
    pub fn progress(self) -> u32 {
        match self {
            Stage::Gravity => 1,
            Stage::Collect => 2,
            Stage::Repair => 3,
            Stage::Victory => 4,
            Stage::GameOver => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Stage; 5] = [
        Stage::Gravity,
        Stage::Collect,
        Stage::Repair,
        Stage::Victory,
        Stage::GameOver,
    ];

    #[test]
    fn progression_follows_the_training_order() {
        let mut stage = Stage::Gravity;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![Stage::Gravity, Stage::Collect, Stage::Repair, Stage::Victory]
        );
    }

    #[test]
    fn game_over_only_reachable_from_consuming_stages() {
        for stage in ALL {
            let expected = matches!(stage, Stage::Collect | Stage::Repair);
            assert_eq!(stage.on_depletion().is_some(), expected, "{stage:?}");
        }
    }

    #[test]
    fn terminal_stages_are_absorbing() {
        for stage in ALL.into_iter().filter(|s| s.is_terminal()) {
            assert_eq!(stage.next(), None);
            assert_eq!(stage.on_depletion(), None);
            assert_eq!(stage.instruction(), None);
        }
    }

    #[test]
    fn progress_is_monotonic_until_victory() {
        assert!(Stage::Gravity.progress() < Stage::Collect.progress());
        assert!(Stage::Collect.progress() < Stage::Repair.progress());
        assert!(Stage::Repair.progress() < Stage::Victory.progress());
        assert_eq!(Stage::Victory.progress(), crate::constants::PROGRESS_MARKERS);
    }
}
