//! Collectible tools: layout and proximity collection.

use crate::constants::TOOL_COUNT;
use bevy::math::Vec2;

use super::physics::PlayArea;

/// What kind of tool a collectible is.  Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Wrench,
    Hammer,
    Gear,
    Bolt,
    Toolkit,
    Clamp,
    PowerCell,
    Screwdriver,
}

impl ToolKind {
    /// Layout order; one of each per session.
    pub const ALL: [ToolKind; TOOL_COUNT] = [
        ToolKind::Wrench,
        ToolKind::Hammer,
        ToolKind::Gear,
        ToolKind::Bolt,
        ToolKind::Toolkit,
        ToolKind::Clamp,
        ToolKind::PowerCell,
        ToolKind::Screwdriver,
    ];

    /// Emoji glyph, used in log lines.
    pub fn glyph(self) -> &'static str {
        match self {
            ToolKind::Wrench => "🔧",
            ToolKind::Hammer => "🔨",
            ToolKind::Gear => "⚙️",
            ToolKind::Bolt => "🔩",
            ToolKind::Toolkit => "🛠️",
            ToolKind::Clamp => "👌",
            ToolKind::PowerCell => "⚡",
            ToolKind::Screwdriver => "🪛",
        }
    }

    /// Plain-text label drawn under the highlight.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Wrench => "WRENCH",
            ToolKind::Hammer => "HAMMER",
            ToolKind::Gear => "GEAR",
            ToolKind::Bolt => "BOLT",
            ToolKind::Toolkit => "TOOLKIT",
            ToolKind::Clamp => "CLAMP",
            ToolKind::PowerCell => "POWER CELL",
            ToolKind::Screwdriver => "SCREWDRIVER",
        }
    }
}

/// A collectible.  `collected` only ever goes from `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tool {
    pub position: Vec2,
    pub collected: bool,
    pub kind: ToolKind,
}

/// Scatter the eight tools over `area`, keeping `padding` from every edge.
///
/// Positions are anchored to the corners and centre lines of the padded
/// area so the spread adapts to the window size.
pub fn layout_tools(area: PlayArea, padding: f32) -> Vec<Tool> {
    let max_x = area.width - padding;
    let max_y = area.height - padding;
    let anchors = [
        Vec2::new(padding + 150.0, padding),
        Vec2::new(padding + 500.0, max_y - 100.0),
        Vec2::new(max_x - 400.0, padding + 50.0),
        Vec2::new(max_x - 100.0, max_y - 150.0),
        Vec2::new(padding + 700.0, max_y / 2.0),
        Vec2::new(padding + 300.0, max_y - 50.0),
        Vec2::new(max_x - 300.0, padding),
        Vec2::new(max_x, max_y / 2.0 - 50.0),
    ];

    anchors
        .iter()
        .zip(ToolKind::ALL)
        .map(|(anchor, kind)| Tool {
            position: Vec2::new(
                anchor.x.min(max_x).max(padding),
                anchor.y.min(max_y).max(padding),
            ),
            collected: false,
            kind,
        })
        .collect()
}

/// Index of the first uncollected tool strictly within `radius` of `center`.
pub fn tool_in_reach(tools: &[Tool], center: Vec2, radius: f32) -> Option<usize> {
    tools
        .iter()
        .position(|t| !t.collected && t.position.distance(center) < radius)
}

pub fn collected_count(tools: &[Tool]) -> usize {
    tools.iter().filter(|t| t.collected).count()
}

#[inline]
pub fn all_collected(tools: &[Tool]) -> bool {
    tools.iter().all(|t| t.collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_places_eight_uncollected_tools_inside_padding() {
        let area = PlayArea::new(1400.0, 800.0);
        let tools = layout_tools(area, 100.0);
        assert_eq!(tools.len(), TOOL_COUNT);
        for t in &tools {
            assert!(!t.collected);
            assert!(t.position.x >= 100.0 && t.position.x <= 1300.0, "{t:?}");
            assert!(t.position.y >= 100.0 && t.position.y <= 700.0, "{t:?}");
        }
    }

    #[test]
    fn layout_matches_anchor_table_on_default_area() {
        let tools = layout_tools(PlayArea::new(1400.0, 800.0), 100.0);
        assert_eq!(tools[0].position, Vec2::new(250.0, 100.0));
        assert_eq!(tools[4].position, Vec2::new(800.0, 350.0));
        assert_eq!(tools[7].position, Vec2::new(1300.0, 300.0));
    }

    #[test]
    fn small_window_clamps_anchors_into_padding() {
        // Padded area is 100..=500 by 100..=300.
        let tools = layout_tools(PlayArea::new(600.0, 400.0), 100.0);
        assert_eq!(tools[0].position, Vec2::new(250.0, 100.0));
        assert_eq!(tools[2].position, Vec2::new(100.0, 150.0));
        assert_eq!(tools[4].position, Vec2::new(500.0, 150.0));
        assert_eq!(tools[7].position, Vec2::new(500.0, 100.0));

        // Anchors, not rows: the default area spreads over many heights.
        let mut ys: Vec<f32> = layout_tools(PlayArea::new(1400.0, 800.0), 100.0)
            .iter()
            .map(|t| t.position.y)
            .collect();
        ys.sort_by(f32::total_cmp);
        ys.dedup();
        assert!(ys.len() > 2, "{ys:?}");
    }

    #[test]
    fn reach_is_strict_and_skips_collected_tools() {
        let mut tools = layout_tools(PlayArea::new(1400.0, 800.0), 100.0);
        let target = tools[0].position;
        assert_eq!(tool_in_reach(&tools, target + Vec2::new(59.0, 0.0), 60.0), Some(0));
        assert_eq!(tool_in_reach(&tools, target + Vec2::new(60.0, 0.0), 60.0), None);

        tools[0].collected = true;
        assert_eq!(tool_in_reach(&tools, target, 60.0), None);
        assert_eq!(collected_count(&tools), 1);
        assert!(!all_collected(&tools));
    }
}
