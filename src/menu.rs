//! Intro screen and mission outcome overlays: `GameState` and `MenuPlugin`.
//!
//! ## States
//!
//! | State      | Description                                             |
//! |------------|---------------------------------------------------------|
//! | `Intro`    | Initial state; mission briefing and session score       |
//! | `Training` | The mini-game; victory / failure overlays appear on top |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                    | Schedule                  | Purpose                          |
//! |---------------------------|---------------------------|----------------------------------|
//! | `setup_intro`             | `OnEnter(Intro)`          | Spawn the briefing UI            |
//! | `cleanup_intro`           | `OnExit(Intro)`           | Despawn the briefing UI          |
//! | `intro_button_system`     | `Update / in Intro`       | Start / Sound / Quit             |
//! | `sync_sound_label_system` | `Update / in Intro`       | Relabel the sound toggle         |
//! | `show_outcome_system`     | `TrainingSet::Present`    | Spawn the overlay on a final cue |
//! | `outcome_button_system`   | `TrainingSet::Present`    | Continue / Train Again           |
//! | `cleanup_outcome`         | `OnExit(Training)`        | Despawn any overlay              |

use bevy::prelude::*;

use crate::audio::SoundSettings;
use crate::constants::SESSION_SCORE_CAP;
use crate::simulation::{ActiveTraining, TrainingCue, TrainingSet};
use crate::training::{mission_score, SessionScore, Stage, TrainingEvent};

mod common;
mod intro;
mod outcome;
mod types;

use common::*;
use intro::*;
use outcome::*;

pub use outcome::OutcomeSummary;
pub use types::*;

/// Registers `GameState`, the intro screen and the outcome overlays.
///
/// Must be added **before** any plugin that runs under
/// `in_state(GameState::Training)`, so the state exists first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::Intro), setup_intro)
            .add_systems(OnExit(GameState::Intro), cleanup_intro)
            .add_systems(
                Update,
                (intro_button_system, sync_sound_label_system)
                    .run_if(in_state(GameState::Intro)),
            )
            .add_systems(
                Update,
                (show_outcome_system, outcome_button_system)
                    .chain()
                    .in_set(TrainingSet::Present),
            )
            .add_systems(OnExit(GameState::Training), cleanup_outcome);
    }
}
