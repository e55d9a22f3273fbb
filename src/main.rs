use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::env;

use mission25::config::{self, TrainingConfig};
use mission25::{assets, audio, controls, graphics, menu, rendering, simulation, test_mode};

fn main() {
    // Check for test mode
    let test_run = env::var("NBL_TEST").ok();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Mission 25".into(),
            resolution: WindowResolution::new(1400, 800),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.03, 0.06, 0.14)))
    // Compiled defaults; load_training_config overwrites them from
    // assets/training.toml (if present) in the Startup schedule.
    .insert_resource(TrainingConfig::default())
    .add_plugins(menu::MenuPlugin)
    .add_plugins(simulation::TrainingPlugin)
    .add_plugins(rendering::TrainingViewPlugin)
    .add_plugins(audio::SoundPlugin)
    .add_systems(
        Startup,
        (
            // Load config first so every other startup system sees the final values.
            config::load_training_config,
            graphics::setup_camera.after(config::load_training_config),
            assets::begin_art_loading.after(config::load_training_config),
        ),
    )
    .add_systems(
        Update,
        (
            graphics::sync_viewport_system,
            assets::advance_art_loading_system,
            controls::gamepad_connection_system,
        ),
    );

    if let Some(test_name) = test_run {
        test_mode::configure_test_mode(&mut app, &test_name);
    }

    app.run();
}
