use bevy::prelude::*;

/// Directions held during the current frame, derived from all input sources.
///
/// The keyboard system (or the autopilot in test mode) writes this resource
/// each frame; [`super::TrainingLoop::frame`] only ever reads it.  Tests can
/// build one directly to drive the astronaut without a real input device.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// No keys held.
    pub const IDLE: MoveIntent = MoveIntent {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// `true` while any direction is held; selects the "moving" pose.
    #[inline]
    pub fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Unit steps per axis in screen space (x right, y **down**).
    ///
    /// Opposite keys cancel out.
    pub fn axes(self) -> Vec2 {
        let x = f32::from(self.right as u8) - f32::from(self.left as u8);
        let y = f32::from(self.down as u8) - f32::from(self.up as u8);
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel_but_still_count_as_moving() {
        let intent = MoveIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(intent.axes(), Vec2::ZERO);
        assert!(intent.any());
    }

    #[test]
    fn up_is_negative_y() {
        let intent = MoveIntent {
            up: true,
            ..Default::default()
        };
        assert_eq!(intent.axes(), Vec2::new(0.0, -1.0));
    }
}
