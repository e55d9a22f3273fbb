//! Training-specific error types.
//!
//! Nothing in the frame loop can fail: oxygen depletion is a stage, not an
//! error.  These types cover the collaborators around the loop (config file,
//! image assets, audio backend).  Every error is caught at its call site and
//! turned into a fallback: compiled defaults, placeholder drawing, or silence.

use std::fmt;

use crate::config::TrainingConfig;

/// Top-level error enum for the training mini-game.
#[derive(Debug)]
pub enum TrainingError {
    /// The config file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// OS-level reason.
        reason: String,
    },

    /// The config file was read but is not valid TOML for [`TrainingConfig`].
    ConfigParse {
        path: String,
        reason: String,
    },

    /// A tuning value is outside the range the loop can run with.
    UnsafeTuning {
        /// Name of the config field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// Every candidate path of an art slot failed to load.
    ArtUnavailable {
        /// Slot label, e.g. `"backdrop (damaged)"`.
        label: &'static str,
        /// Number of candidates attempted.
        tried: usize,
    },

    /// No audio backend is present (no output device, or the audio plugin is
    /// disabled).
    AudioUnavailable,
}

impl fmt::Display for TrainingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingError::ConfigRead { path, reason } => {
                write!(f, "could not read {}: {}", path, reason)
            }
            TrainingError::ConfigParse { path, reason } => {
                write!(f, "could not parse {}: {}", path, reason)
            }
            TrainingError::UnsafeTuning {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "tuning value '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            TrainingError::ArtUnavailable { label, tried } => write!(
                f,
                "no art available for {} ({} candidates failed); drawing placeholder",
                label, tried
            ),
            TrainingError::AudioUnavailable => {
                write!(f, "audio backend unavailable; sound disabled")
            }
        }
    }
}

impl std::error::Error for TrainingError {}

/// Convenience alias: a `Result` using `TrainingError` as the error type.
pub type TrainingResult<T> = Result<T, TrainingError>;

// ── Validation helpers ────────────────────────────────────────────────────────

fn require(name: &'static str, value: f32, ok: bool, safe_range: &'static str) -> TrainingResult<()> {
    if ok {
        Ok(())
    } else {
        Err(TrainingError::UnsafeTuning {
            name,
            value,
            safe_range,
        })
    }
}

/// Check every tuning value the loop relies on.
///
/// Friction at or above 1.0 makes velocity grow without bound between speed
/// clamps, and zero-length intervals would divide by zero in the cadence
/// checks.
pub fn validate_config(config: &TrainingConfig) -> TrainingResult<()> {
    require(
        "friction",
        config.friction,
        config.friction > 0.0 && config.friction < 1.0,
        "(0.0, 1.0)",
    )?;
    require(
        "max_speed",
        config.max_speed,
        config.max_speed > 0.0,
        "(0.0, ∞)",
    )?;
    require(
        "acceleration",
        config.acceleration,
        config.acceleration >= 0.0,
        "[0.0, ∞)",
    )?;
    require(
        "drift_strength",
        config.drift_strength,
        config.drift_strength >= 0.0,
        "[0.0, ∞)",
    )?;
    require(
        "drift_reroll_frames",
        config.drift_reroll_frames as f32,
        config.drift_reroll_frames > 0,
        "[1, ∞)",
    )?;
    require(
        "oxygen_drain_interval",
        config.oxygen_drain_interval as f32,
        config.oxygen_drain_interval > 0,
        "[1, ∞)",
    )?;
    require(
        "oxygen_drain_amount",
        config.oxygen_drain_amount,
        config.oxygen_drain_amount > 0.0,
        "(0.0, 100.0]",
    )?;
    require(
        "oxygen_tool_bonus",
        config.oxygen_tool_bonus,
        config.oxygen_tool_bonus >= 0.0,
        "[0.0, 100.0]",
    )?;
    require(
        "player_size",
        config.player_size,
        config.player_size > 0.0 && config.player_size < config.play_width.min(config.play_height),
        "(0.0, min(play_width, play_height))",
    )?;
    require(
        "collect_radius",
        config.collect_radius,
        config.collect_radius > 0.0,
        "(0.0, ∞)",
    )?;
    require(
        "repair_zone_size",
        config.repair_zone_size,
        config.repair_zone_size > 0.0,
        "(0.0, ∞)",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&TrainingConfig::default()).is_ok());
    }

    #[test]
    fn friction_of_one_is_rejected() {
        let config = TrainingConfig {
            friction: 1.0,
            ..Default::default()
        };
        match validate_config(&config) {
            Err(TrainingError::UnsafeTuning { name, .. }) => assert_eq!(name, "friction"),
            other => panic!("expected UnsafeTuning, got {other:?}"),
        }
    }

    #[test]
    fn zero_drain_interval_is_rejected() {
        let config = TrainingConfig {
            oxygen_drain_interval: 0,
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn player_larger_than_area_is_rejected() {
        let config = TrainingConfig {
            player_size: 900.0,
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("player_size"));
    }
}
