//! Runtime training configuration loaded from `assets/training.toml`.
//!
//! [`TrainingConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_training_config`] reads
//! `assets/training.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/training.toml`.
//! 2. Restart the game; no recompilation required.
//! 3. Run `NBL_TEST=autopilot cargo run` to confirm the run still completes.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `TrainingConfig::default()`.

use crate::constants::*;
use crate::error::{validate_config, TrainingError, TrainingResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/training.toml";

/// Runtime-tunable training configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/training.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    // ── Play Area ─────────────────────────────────────────────────────────────
    pub play_width: f32,
    pub play_height: f32,

    // ── Player: Movement ──────────────────────────────────────────────────────
    pub player_size: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,

    // ── Drift ─────────────────────────────────────────────────────────────────
    pub drift_strength: f32,
    pub drift_reroll_frames: u64,

    // ── Stages ────────────────────────────────────────────────────────────────
    pub gravity_stage_frames: u32,
    pub instruction_frames: u32,

    // ── Oxygen ────────────────────────────────────────────────────────────────
    pub oxygen_drain_interval: u32,
    pub oxygen_drain_amount: f32,
    pub oxygen_tool_bonus: f32,
    pub oxygen_low_threshold: f32,

    // ── Tools ─────────────────────────────────────────────────────────────────
    pub tool_padding: f32,
    pub collect_radius: f32,
    pub collection_cooldown_frames: u32,
    pub tool_pulse_base: f32,
    pub tool_pulse_amplitude: f32,
    pub tool_pulse_rate: f32,

    // ── Repair Zone ───────────────────────────────────────────────────────────
    pub repair_zone_size: f32,
    pub repair_zone_inset: f32,
    pub repair_delay_frames: u32,

    // ── Presentation ──────────────────────────────────────────────────────────
    pub hud_font_size: f32,
    pub sound_enabled: bool,
    /// Fixed drift seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,

    // ── Art candidates (tried in order; first successful load wins) ───────────
    pub astronaut_static_candidates: Vec<String>,
    pub astronaut_moving_candidates: Vec<String>,
    pub backdrop_damaged_candidates: Vec<String>,
    pub backdrop_repaired_candidates: Vec<String>,
}

fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| (*p).to_string()).collect()
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let backdrop = paths(&[
            "back1.png",
            "back2.png",
            "nbl-bg.jpg",
            "iss-bg.jpg",
            "nbl-bg.png",
        ]);
        let mut backdrop_repaired = backdrop.clone();
        backdrop_repaired.reverse();

        Self {
            // Play Area
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            // Player: Movement
            player_size: PLAYER_SIZE,
            acceleration: ACCELERATION,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            // Drift
            drift_strength: DRIFT_STRENGTH,
            drift_reroll_frames: DRIFT_REROLL_FRAMES,
            // Stages
            gravity_stage_frames: GRAVITY_STAGE_FRAMES,
            instruction_frames: INSTRUCTION_FRAMES,
            // Oxygen
            oxygen_drain_interval: OXYGEN_DRAIN_INTERVAL,
            oxygen_drain_amount: OXYGEN_DRAIN_AMOUNT,
            oxygen_tool_bonus: OXYGEN_TOOL_BONUS,
            oxygen_low_threshold: OXYGEN_LOW_THRESHOLD,
            // Tools
            tool_padding: TOOL_PADDING,
            collect_radius: COLLECT_RADIUS,
            collection_cooldown_frames: COLLECTION_COOLDOWN_FRAMES,
            tool_pulse_base: TOOL_PULSE_BASE,
            tool_pulse_amplitude: TOOL_PULSE_AMPLITUDE,
            tool_pulse_rate: TOOL_PULSE_RATE,
            // Repair Zone
            repair_zone_size: REPAIR_ZONE_SIZE,
            repair_zone_inset: REPAIR_ZONE_INSET,
            repair_delay_frames: REPAIR_DELAY_FRAMES,
            // Presentation
            hud_font_size: HUD_FONT_SIZE,
            sound_enabled: true,
            seed: None,
            // Art
            astronaut_static_candidates: paths(&[
                "ast1.png",
                "ast2.png",
                "nbl-astronaut.jpg",
                "nbl-astronaut.png",
            ]),
            astronaut_moving_candidates: paths(&["ast2.png", "ast1.png", "nbl-astronaut.jpg"]),
            backdrop_damaged_candidates: backdrop,
            backdrop_repaired_candidates: backdrop_repaired,
        }
    }
}

/// Parse and validate a config from TOML text.
///
/// `path` is only used to label errors.
pub fn parse_training_config(path: &str, contents: &str) -> TrainingResult<TrainingConfig> {
    let loaded = toml::from_str::<TrainingConfig>(contents).map_err(|e| {
        TrainingError::ConfigParse {
            path: path.to_string(),
            reason: e.to_string(),
        }
    })?;
    validate_config(&loaded)?;
    Ok(loaded)
}

/// Read, parse and validate the config at `path`.
///
/// Returns `Ok(None)` when the file simply does not exist.
pub fn read_training_config(path: &str) -> TrainingResult<Option<TrainingConfig>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_training_config(path, &contents).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TrainingError::ConfigRead {
            path: path.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Startup system: attempt to load `assets/training.toml` and overwrite the
/// `TrainingConfig` resource with its values.
///
/// Missing keys retain their compiled defaults.  Read, parse, and validation
/// errors are logged but do not stop the game.  A missing file is silently
/// ignored (defaults are already in place from `insert_resource`).
pub fn load_training_config(mut config: ResMut<TrainingConfig>) {
    match read_training_config(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("✓ Loaded training config from {CONFIG_PATH}");
        }
        Ok(None) => {
            info!("ℹ No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("⚠ {e}; using defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = parse_training_config("test.toml", "max_speed = 4.5\nseed = 7\n")
            .expect("partial config parses");
        assert_eq!(config.max_speed, 4.5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.friction, FRICTION);
        assert_eq!(config.gravity_stage_frames, GRAVITY_STAGE_FRAMES);
    }

    #[test]
    fn invalid_tuning_is_rejected_after_parse() {
        let err = parse_training_config("test.toml", "friction = 1.5").unwrap_err();
        assert!(matches!(err, TrainingError::UnsafeTuning { name: "friction", .. }));
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = parse_training_config("test.toml", "max_speed = [").unwrap_err();
        assert!(matches!(err, TrainingError::ConfigParse { .. }));
    }

    #[test]
    fn repaired_backdrop_prefers_last_damaged_candidate() {
        let config = TrainingConfig::default();
        assert_eq!(
            config.backdrop_repaired_candidates.first(),
            config.backdrop_damaged_candidates.last()
        );
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let result = read_training_config("assets/does-not-exist.toml");
        assert!(matches!(result, Ok(None)));
    }
}
