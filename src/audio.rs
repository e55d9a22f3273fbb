//! Synthesized sound: short sine cues and a looping ambient hum.
//!
//! Everything here is optional.  When the app has no audio backend
//! (`Assets<Pitch>` missing) the systems log once at debug level and do
//! nothing; gameplay never depends on sound.
//!
//! | System                      | Schedule                | Purpose                          |
//! |-----------------------------|-------------------------|----------------------------------|
//! | `apply_sound_config`        | `Startup`               | Seed [`SoundSettings`] from config |
//! | `sound_toggle_system`       | `Update`                | `M` flips sound on / off         |
//! | `play_cue_system`           | `Update`                | One tone per [`TrainingCue`]     |
//! | `sync_ambient_hum_system`   | `Update`                | Hum exists iff the loop runs     |
//! | `despawn_ambient_hum`       | `OnExit(Training)`      | Release the hum on leave         |

use std::time::Duration;

use bevy::audio::{Pitch, Volume};
use bevy::prelude::*;

use crate::config::TrainingConfig;
use crate::error::TrainingError;
use crate::menu::GameState;
use crate::simulation::{ActiveTraining, TrainingCue};
use crate::training::{Stage, TrainingEvent};

const CUE_VOLUME: f32 = 0.3;
const HUM_FREQUENCY: f32 = 220.0;
const HUM_VOLUME: f32 = 0.08;

/// Whether sound is wanted at all.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundSettings {
    pub enabled: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl SoundSettings {
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

/// Marker for the looping ambient tone.
#[derive(Component)]
pub struct AmbientHum;

/// A one-shot tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub frequency: f32,
    pub seconds: f32,
}

impl SoundCue {
    pub const STAGE: SoundCue = SoundCue { frequency: 523.0, seconds: 0.2 };
    pub const TOOL: SoundCue = SoundCue { frequency: 659.0, seconds: 0.15 };
    pub const FAILURE: SoundCue = SoundCue { frequency: 200.0, seconds: 0.5 };
    pub const VICTORY: SoundCue = SoundCue { frequency: 784.0, seconds: 0.5 };

    /// Tone for a training event, if it has one.  Only leaving the gravity
    /// stage chimes; Collect to Repair is silent.
    pub fn for_event(event: &TrainingEvent) -> Option<SoundCue> {
        match event {
            TrainingEvent::StageChanged { to: Stage::Victory, .. } => Some(Self::VICTORY),
            TrainingEvent::StageChanged { to: Stage::GameOver, .. } => Some(Self::FAILURE),
            TrainingEvent::StageChanged { from: Stage::Gravity, .. } => Some(Self::STAGE),
            TrainingEvent::StageChanged { .. } => None,
            TrainingEvent::ToolCollected { .. } => Some(Self::TOOL),
            TrainingEvent::ShipRepaired => None,
        }
    }

    fn pitch(self) -> Pitch {
        Pitch::new(self.frequency, Duration::from_secs_f32(self.seconds))
    }
}

/// Copy `sound_enabled` from the loaded config.
pub fn apply_sound_config(config: Res<TrainingConfig>, mut settings: ResMut<SoundSettings>) {
    settings.enabled = config.sound_enabled;
}

/// `M` toggles sound anywhere in the app.
pub fn sound_toggle_system(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<SoundSettings>) {
    if keys.just_pressed(KeyCode::KeyM) {
        let on = settings.toggle();
        info!("Sound {}", if on { "on" } else { "off" });
    }
}

/// Spawn a short tone for every cue written this frame.
pub fn play_cue_system(
    mut commands: Commands,
    mut cues: MessageReader<TrainingCue>,
    settings: Res<SoundSettings>,
    pitches: Option<ResMut<Assets<Pitch>>>,
    mut reported: Local<bool>,
) {
    let Some(mut pitches) = pitches else {
        report_unavailable(&mut reported);
        cues.clear();
        return;
    };
    for TrainingCue(event) in cues.read() {
        if !settings.enabled {
            continue;
        }
        if let Some(cue) = SoundCue::for_event(event) {
            commands.spawn((
                AudioPlayer(pitches.add(cue.pitch())),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(CUE_VOLUME)),
            ));
        }
    }
}

/// Keep exactly one hum alive while a loop is running with sound on, and
/// none otherwise.
pub fn sync_ambient_hum_system(
    mut commands: Commands,
    settings: Res<SoundSettings>,
    active: Option<Res<ActiveTraining>>,
    hums: Query<Entity, With<AmbientHum>>,
    pitches: Option<ResMut<Assets<Pitch>>>,
    mut reported: Local<bool>,
) {
    let wanted = settings.enabled && active.is_some_and(|a| a.0.is_running());
    if !wanted {
        for e in hums.iter() {
            commands.entity(e).despawn();
        }
        return;
    }
    if !hums.is_empty() {
        return;
    }
    let Some(mut pitches) = pitches else {
        report_unavailable(&mut reported);
        return;
    };
    // Long enough that the loop restart is rare; LOOP handles the rest.
    let tone = Pitch::new(HUM_FREQUENCY, Duration::from_secs(10));
    commands.spawn((
        AudioPlayer(pitches.add(tone)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(HUM_VOLUME)),
        AmbientHum,
    ));
}

/// Release the hum when training is left, whatever the exit path.
pub fn despawn_ambient_hum(mut commands: Commands, hums: Query<Entity, With<AmbientHum>>) {
    for e in hums.iter() {
        commands.entity(e).despawn();
    }
}

fn report_unavailable(reported: &mut bool) {
    if !*reported {
        debug!("{}", TrainingError::AudioUnavailable);
        *reported = true;
    }
}

/// Registers sound settings and the audio systems.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundSettings>()
            .add_systems(
                Startup,
                apply_sound_config.after(crate::config::load_training_config),
            )
            .add_systems(
                Update,
                (sound_toggle_system, play_cue_system, sync_ambient_hum_system).chain(),
            )
            .add_systems(OnExit(GameState::Training), despawn_ambient_hum);
    }
}
