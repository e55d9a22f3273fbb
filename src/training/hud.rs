//! HUD snapshot emitted at the end of every frame.

use super::session::TrainingSession;
use super::stage::Stage;
use super::tools::collected_count;
use crate::config::TrainingConfig;
use crate::constants::PROGRESS_MARKERS;

/// Collected / total tool counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolTally {
    pub collected: usize,
    pub total: usize,
}

/// Everything the HUD overlay shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub stage: Stage,
    pub stage_label: &'static str,
    /// Lit progress markers.
    pub progress: u32,
    /// Total progress markers.
    pub markers: u32,
    /// Oxygen as a fraction of a full tank (bar width).
    pub oxygen_fraction: f32,
    /// Oxygen rounded to whole percent (bar caption).
    pub oxygen_percent: u32,
    /// Bar switches to its warning colour when set.
    pub oxygen_low: bool,
    /// Only present in stages that collect or use tools.
    pub tools: Option<ToolTally>,
    /// Instruction banner, while its auto-hide timer runs.
    pub banner: Option<&'static str>,
}

impl HudView {
    pub fn of(session: &TrainingSession, config: &TrainingConfig) -> Self {
        let stage = session.stage;
        let banner = if session.banner_frames > 0 {
            stage.instruction()
        } else {
            None
        };
        Self {
            stage,
            stage_label: stage.label(),
            progress: stage.progress(),
            markers: PROGRESS_MARKERS,
            oxygen_fraction: session.oxygen.fraction(),
            oxygen_percent: session.oxygen.percent(),
            oxygen_low: session.oxygen.is_low(config.oxygen_low_threshold),
            tools: stage.shows_tool_tally().then(|| ToolTally {
                collected: collected_count(&session.tools),
                total: session.tools.len(),
            }),
            banner,
        }
    }
}
