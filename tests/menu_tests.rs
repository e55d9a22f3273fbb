//! Headless tests for the [`GameState`] machine and the plugins hung off it.
//!
//! These tests use [`MinimalPlugins`]: no window, no rendering, no audio.
//! They run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `Intro`.
//! 2. A `NextState` request transitions from `Intro` to `Training` and builds the loop.
//! 3. The loop advances once per update and publishes cues.
//! 4. `Esc` returns to `Intro` and drops the loop.
//! 5. A finished mission raises the outcome overlay; `Enter` restarts in place.
//! 6. `insert_state` can force-start directly in `Training` (test-mode path).

use bevy::prelude::*;
use bevy::ecs::message::Messages;
use bevy::state::app::StatesPlugin;
use mission25::config::TrainingConfig;
use mission25::menu::{GameState, IntroRoot, MenuPlugin, OutcomeRoot};
use mission25::simulation::{ActiveTraining, TrainingCue, TrainingPlugin};
use mission25::training::{DrawList, SessionScore, Stage, TrainingEvent};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn still_config() -> TrainingConfig {
    TrainingConfig {
        drift_strength: 0.0,
        seed: Some(25),
        ..Default::default()
    }
}

/// Minimal headless app with the menu and training plugins.
///
/// `StatesPlugin` adds the `StateTransition` schedule needed by `init_state`;
/// keyboard input is registered by hand since `InputPlugin` is not present.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(still_config())
        .add_plugins((MenuPlugin, TrainingPlugin));
    app
}

fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

fn enter_training(app: &mut App) {
    app.update(); // settle into Intro
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Training);
    app.update(); // StateTransition fires; first loop frame runs
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_intro() {
    let mut app = headless_app();
    app.update();
    assert_eq!(state(&app), GameState::Intro);
    assert_eq!(count::<IntroRoot>(&mut app), 1, "intro screen must be spawned");
    assert!(app.world().get_resource::<ActiveTraining>().is_none());
}

#[test]
fn entering_training_builds_and_runs_the_loop() {
    let mut app = headless_app();
    enter_training(&mut app);

    assert_eq!(state(&app), GameState::Training);
    assert_eq!(count::<IntroRoot>(&mut app), 0, "intro must be torn down");

    let active = app.world().resource::<ActiveTraining>();
    assert!(active.0.is_running());
    assert_eq!(active.0.session().stage, Stage::Gravity);
    assert_eq!(active.0.session().frame, 1);
    assert!(app.world().resource::<DrawList>().hud().is_some());

    for _ in 0..9 {
        app.update();
    }
    assert_eq!(app.world().resource::<ActiveTraining>().0.session().frame, 10);
}

#[test]
fn gravity_stage_ends_after_480_updates() {
    let mut app = headless_app();
    enter_training(&mut app);
    for _ in 1..480 {
        app.update();
    }

    let session = app.world().resource::<ActiveTraining>().0.session().clone();
    assert_eq!(session.stage, Stage::Collect);
    assert_eq!(session.frame, 480);

    let cues = app.world().resource::<Messages<TrainingCue>>();
    let mut reader = cues.get_cursor();
    assert!(reader.read(cues).any(|c| c.0
        == TrainingEvent::StageChanged {
            from: Stage::Gravity,
            to: Stage::Collect
        }));
}

#[test]
fn escape_returns_to_intro_and_drops_the_loop() {
    let mut app = headless_app();
    enter_training(&mut app);

    press(&mut app, KeyCode::Escape);
    app.update(); // StateTransition to Intro

    assert_eq!(state(&app), GameState::Intro);
    assert!(app.world().get_resource::<ActiveTraining>().is_none());
    assert!(app.world().resource::<DrawList>().commands.is_empty());
    assert_eq!(count::<IntroRoot>(&mut app), 1);
}

#[test]
fn victory_shows_overlay_and_enter_restarts() {
    let mut app = headless_app();
    enter_training(&mut app);

    {
        let mut active = app.world_mut().resource_mut::<ActiveTraining>();
        let s = active.0.session_mut();
        s.stage = Stage::Repair;
        for tool in s.tools.iter_mut() {
            tool.collected = true;
        }
        s.player.position = Vec2::new(1000.0, 300.0);
    }

    // One frame to touch the zone, then the repair delay.
    for _ in 0..=30 {
        app.update();
    }
    let active = app.world().resource::<ActiveTraining>();
    assert_eq!(active.0.session().stage, Stage::Victory);
    assert!(!active.0.is_running());
    assert_eq!(count::<OutcomeRoot>(&mut app), 1);

    // Frozen: further updates change nothing.
    let frame = app.world().resource::<ActiveTraining>().0.session().frame;
    app.update();
    assert_eq!(app.world().resource::<ActiveTraining>().0.session().frame, frame);

    press(&mut app, KeyCode::Enter);
    assert_eq!(count::<OutcomeRoot>(&mut app), 0);
    let active = app.world().resource::<ActiveTraining>();
    assert!(active.0.is_running());
    assert_eq!(active.0.session().stage, Stage::Gravity);
    assert_eq!(state(&app), GameState::Training);
    assert_eq!(app.world().resource::<SessionScore>().missions(), 0);
}

#[test]
fn insert_state_starts_in_training() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(still_config())
        .insert_state(GameState::Training)
        .add_plugins((MenuPlugin, TrainingPlugin));
    app.update();

    assert_eq!(state(&app), GameState::Training);
    assert!(app.world().resource::<ActiveTraining>().0.is_running());
}
