use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::training::PlayArea;

/// Logical size of the primary window, once one has reported it.
///
/// `None` in headless runs; the training loop then falls back to the
/// configured play area.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ViewportArea(pub Option<PlayArea>);

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel, centred.
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

/// Track the primary window's logical size every frame.
///
/// Only writes when the size actually changed so downstream systems can rely
/// on change detection.
pub fn sync_viewport_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportArea>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let area = PlayArea::new(window.width(), window.height());
    if area.width <= 0.0 || area.height <= 0.0 {
        // Minimised.
        return;
    }
    if viewport.0 != Some(area) {
        viewport.0 = Some(area);
    }
}

/// Screen space (origin top-left, y down) to world space (origin centre, y up).
#[inline]
pub fn screen_to_world(area: PlayArea, point: Vec2) -> Vec2 {
    Vec2::new(point.x - area.width * 0.5, area.height * 0.5 - point.y)
}

/// World-space centre of a screen-space rectangle.
#[inline]
pub fn rect_center_world(area: PlayArea, rect: Rect) -> Vec2 {
    screen_to_world(area, rect.center())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_corners_map_to_world_corners() {
        let area = PlayArea::new(1400.0, 800.0);
        assert_eq!(screen_to_world(area, Vec2::ZERO), Vec2::new(-700.0, 400.0));
        assert_eq!(screen_to_world(area, Vec2::new(1400.0, 800.0)), Vec2::new(700.0, -400.0));
        assert_eq!(screen_to_world(area, Vec2::new(700.0, 400.0)), Vec2::ZERO);
    }
}
