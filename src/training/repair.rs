use bevy::math::{Rect, Vec2};

use super::physics::PlayArea;
use crate::config::TrainingConfig;

/// The square the astronaut has to reach during the repair stage.
///
/// Anchored to the right edge and vertically centred (slightly high), so it
/// follows the window when it is resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairZone {
    pub bounds: Rect,
}

impl RepairZone {
    pub fn for_area(area: PlayArea, config: &TrainingConfig) -> Self {
        let size = config.repair_zone_size;
        let min = Vec2::new(
            area.width - config.repair_zone_inset,
            area.height / 2.0 - size * 0.6,
        );
        Self {
            bounds: Rect::from_corners(min, min + Vec2::splat(size)),
        }
    }

    /// Strict AABB overlap: touching edges do not count.
    pub fn overlaps(&self, other: Rect) -> bool {
        other.max.x > self.bounds.min.x
            && other.min.x < self.bounds.max.x
            && other.max.y > self.bounds.min.y
            && other.min.y < self.bounds.max.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> RepairZone {
        RepairZone::for_area(PlayArea::new(1400.0, 800.0), &TrainingConfig::default())
    }

    #[test]
    fn zone_sits_right_of_centre() {
        let z = zone();
        assert_eq!(z.bounds.min, Vec2::new(1050.0, 250.0));
        assert_eq!(z.bounds.max, Vec2::new(1300.0, 500.0));
    }

    #[test]
    fn touching_edge_is_not_overlap() {
        let z = zone();
        let left_of = Rect::from_corners(Vec2::new(830.0, 250.0), Vec2::new(1050.0, 470.0));
        assert!(!z.overlaps(left_of));
        let one_px_in = Rect::from_corners(Vec2::new(831.0, 250.0), Vec2::new(1051.0, 470.0));
        assert!(z.overlaps(one_px_in));
    }
}
