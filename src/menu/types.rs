use bevy::prelude::*;

/// Top-level application state machine.
///
/// Every training system runs under `.run_if(in_state(GameState::Training))`,
/// so nothing simulates while the intro screen is up.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Mission briefing; shown on startup.
    #[default]
    Intro,
    /// The NBL mini-game, including its victory / failure overlays.
    Training,
}

/// Root node of the intro screen; despawned on `OnExit(Intro)`.
#[derive(Component)]
pub struct IntroRoot;

/// Tags the "Start Training" button.
#[derive(Component)]
pub struct IntroStartButton;

/// Tags the sound on/off toggle.
#[derive(Component)]
pub struct IntroSoundButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of the victory / failure overlay.
#[derive(Component)]
pub struct OutcomeRoot;

/// Tags "Continue" on the victory overlay.
#[derive(Component)]
pub struct OutcomeContinueButton;

/// Tags "Train Again" / "Try Again".
#[derive(Component)]
pub struct OutcomeRestartButton;
