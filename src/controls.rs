//! Input sampling: keyboard and gamepad into [`MoveIntent`].
//!
//! ## Pipeline (runs in order every `Update` frame while training)
//!
//! 1. [`clear_intent_system`]: reset [`MoveIntent`] to idle.
//! 2. [`keyboard_to_intent_system`]: arrow keys and WASD.
//! 3. [`gamepad_to_intent_system`]: d-pad and left stick of the preferred pad.
//!
//! Sources only ever set directions, never clear them, so holding a key and
//! the stick at once simply agrees.  The training loop reads the result once
//! at the start of its frame.

use bevy::input::gamepad::{GamepadAxis, GamepadButton, GamepadConnection, GamepadConnectionEvent};
use bevy::prelude::*;

use crate::training::MoveIntent;

/// Left-stick magnitude below which the stick counts as centred.
pub const STICK_DEADZONE: f32 = 0.3;

/// Most recently connected gamepad, if any.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PreferredGamepad(pub Option<Entity>);

pub fn clear_intent_system(mut intent: ResMut<MoveIntent>) {
    *intent = MoveIntent::IDLE;
}

/// Arrow keys and WASD; both layouts are always live.
pub fn keyboard_to_intent_system(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<MoveIntent>) {
    let held = |a: KeyCode, b: KeyCode| keys.any_pressed([a, b]);
    intent.up |= held(KeyCode::ArrowUp, KeyCode::KeyW);
    intent.down |= held(KeyCode::ArrowDown, KeyCode::KeyS);
    intent.left |= held(KeyCode::ArrowLeft, KeyCode::KeyA);
    intent.right |= held(KeyCode::ArrowRight, KeyCode::KeyD);
}

/// Track gamepad connect / disconnect and prefer the newest pad.
pub fn gamepad_connection_system(
    mut events: MessageReader<GamepadConnectionEvent>,
    mut preferred: ResMut<PreferredGamepad>,
) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { .. } => {
                preferred.0 = Some(event.gamepad);
                info!("[gamepad] Gamepad {:?} connected (now preferred)", event.gamepad);
            }
            GamepadConnection::Disconnected => {
                info!("[gamepad] Gamepad {:?} disconnected", event.gamepad);
                if preferred.0 == Some(event.gamepad) {
                    preferred.0 = None;
                }
            }
        }
    }
}

/// D-pad and left stick.  Stick y is up-positive; intent is screen space.
pub fn gamepad_to_intent_system(
    preferred: Res<PreferredGamepad>,
    gamepads: Query<&Gamepad>,
    mut intent: ResMut<MoveIntent>,
) {
    let Some(gamepad) = preferred.0.and_then(|e| gamepads.get(e).ok()) else {
        return;
    };

    intent.up |= gamepad.pressed(GamepadButton::DPadUp);
    intent.down |= gamepad.pressed(GamepadButton::DPadDown);
    intent.left |= gamepad.pressed(GamepadButton::DPadLeft);
    intent.right |= gamepad.pressed(GamepadButton::DPadRight);

    let lx = gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
    let ly = gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
    if Vec2::new(lx, ly).length() < STICK_DEADZONE {
        return;
    }
    intent.right |= lx > STICK_DEADZONE;
    intent.left |= lx < -STICK_DEADZONE;
    intent.up |= ly > STICK_DEADZONE;
    intent.down |= ly < -STICK_DEADZONE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<MoveIntent>()
            .add_systems(Update, (clear_intent_system, keyboard_to_intent_system).chain());
        app
    }

    #[test]
    fn wasd_and_arrows_map_to_the_same_directions() {
        let mut app = app();
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::KeyW);
            keys.press(KeyCode::ArrowLeft);
        }
        app.update();
        let intent = *app.world().resource::<MoveIntent>();
        assert!(intent.up && intent.left);
        assert!(!intent.down && !intent.right);
    }

    #[test]
    fn released_keys_clear_next_frame() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyD);
        app.update();
        assert!(app.world().resource::<MoveIntent>().right);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::KeyD);
        app.update();
        assert_eq!(*app.world().resource::<MoveIntent>(), MoveIntent::IDLE);
    }
}
