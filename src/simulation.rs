//! Training plugin: hosts one [`TrainingLoop`] inside the Bevy app.
//!
//! ## Lifecycle
//!
//! | Schedule            | System                  | Effect                                   |
//! |---------------------|-------------------------|------------------------------------------|
//! | `OnEnter(Training)` | `begin_training`        | Build the loop, start it, insert it      |
//! | `Update`            | input pipeline          | Fill [`MoveIntent`]                      |
//! | `Update`            | `follow_viewport_system`| Resize the play area with the window     |
//! | `Update`            | `training_frame_system` | One [`TrainingLoop::frame`] per update   |
//! | `Update`            | `leave_training_system` | `Esc` returns to the intro screen        |
//! | `OnExit(Training)`  | `end_training`          | Stop and remove the loop, clear drawing  |
//!
//! The loop draws into the [`DrawList`] resource; the presenter in
//! [`crate::rendering`] reads it afterwards.  Every [`TrainingEvent`] of a
//! frame is re-published as a [`TrainingCue`] message for sound and overlays.

use bevy::prelude::*;

use crate::assets::ArtLibrary;
use crate::config::TrainingConfig;
use crate::controls;
use crate::graphics::ViewportArea;
use crate::menu::GameState;
use crate::training::{
    ArtReadiness, DrawList, MoveIntent, PlayArea, SessionScore, TrainingEvent, TrainingLoop,
};

/// The running training session.  Present only while in
/// [`GameState::Training`].
#[derive(Resource, Debug)]
pub struct ActiveTraining(pub TrainingLoop);

/// One event from the training loop, for anyone who wants to react to it.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingCue(pub TrainingEvent);

/// System sets of one training update, in order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingSet {
    /// Fill [`MoveIntent`] from devices (or a scripted pilot).
    Input,
    /// Advance the loop.
    Frame,
    /// Draw the latest [`DrawList`] and react to cues.
    Present,
}

pub struct TrainingPlugin;

impl Plugin for TrainingPlugin {
    fn build(&self, app: &mut App) {
        let training = in_state(GameState::Training).and(resource_exists::<ActiveTraining>);
        app.init_resource::<MoveIntent>()
            .init_resource::<DrawList>()
            .init_resource::<SessionScore>()
            .init_resource::<ViewportArea>()
            .init_resource::<controls::PreferredGamepad>()
            .add_message::<TrainingCue>()
            .configure_sets(
                Update,
                (TrainingSet::Input, TrainingSet::Frame, TrainingSet::Present)
                    .chain()
                    .run_if(training),
            )
            .add_systems(OnEnter(GameState::Training), begin_training)
            .add_systems(OnExit(GameState::Training), end_training)
            .add_systems(
                Update,
                (
                    controls::clear_intent_system,
                    controls::keyboard_to_intent_system,
                    controls::gamepad_to_intent_system,
                )
                    .chain()
                    .in_set(TrainingSet::Input),
            )
            .add_systems(
                Update,
                (follow_viewport_system, training_frame_system)
                    .chain()
                    .in_set(TrainingSet::Frame),
            )
            .add_systems(
                Update,
                leave_training_system.run_if(in_state(GameState::Training)),
            );
    }
}

/// Build a fresh loop for the current viewport and start it.
pub fn begin_training(
    mut commands: Commands,
    config: Res<TrainingConfig>,
    viewport: Res<ViewportArea>,
    mut canvas: ResMut<DrawList>,
) {
    let area = viewport.0.unwrap_or_else(|| PlayArea::from_config(&config));
    let mut training = TrainingLoop::new(config.clone(), area);
    training.start();
    canvas.commands.clear();
    commands.insert_resource(ActiveTraining(training));
    info!("Training started ({:.0}×{:.0})", area.width, area.height);
}

/// Stop and drop the loop; safe whichever way training was left.
pub fn end_training(
    mut commands: Commands,
    active: Option<ResMut<ActiveTraining>>,
    mut canvas: ResMut<DrawList>,
    mut intent: ResMut<MoveIntent>,
) {
    if let Some(mut active) = active {
        active.0.stop();
        info!(
            "Training ended in stage {:?} after {} frames",
            active.0.session().stage,
            active.0.session().frame
        );
    }
    commands.remove_resource::<ActiveTraining>();
    canvas.commands.clear();
    *intent = MoveIntent::IDLE;
}

/// Push window size changes into the running session.
pub fn follow_viewport_system(viewport: Res<ViewportArea>, mut active: ResMut<ActiveTraining>) {
    if !viewport.is_changed() {
        return;
    }
    if let Some(area) = viewport.0 {
        active.0.set_area(area);
    }
}

/// Run one frame of the loop and publish what happened.
pub fn training_frame_system(
    mut active: ResMut<ActiveTraining>,
    intent: Res<MoveIntent>,
    art: Option<Res<ArtLibrary>>,
    mut canvas: ResMut<DrawList>,
    mut cues: MessageWriter<TrainingCue>,
) {
    let readiness = art.map_or(ArtReadiness::NONE, |a| a.readiness());
    let outcome = active.0.frame(&intent, &readiness, &mut *canvas);
    for event in outcome.events {
        match event {
            TrainingEvent::StageChanged { from, to } => {
                info!("Stage {:?} → {:?}", from, to);
            }
            TrainingEvent::ToolCollected { index, kind } => {
                debug!("Collected tool {index}: {} {}", kind.glyph(), kind.label());
            }
            TrainingEvent::ShipRepaired => info!("Ship repaired"),
        }
        cues.write(TrainingCue(event));
    }
}

/// `Esc` abandons training and returns to the intro screen.
pub fn leave_training_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Intro);
    }
}
