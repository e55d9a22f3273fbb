//! Centralised training and presentation constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Units are **logical pixels** and **frames** (one frame = one display
//! refresh; the loop does not decouple simulation from frame rate).
//!
//! ## Tuning guidance
//!
//! Each constant notes the observable consequence of changing it.  Every value is
//! mirrored by a field of [`crate::config::TrainingConfig`] and can be
//! overridden from `assets/training.toml` without recompiling.

// ── Play Area ─────────────────────────────────────────────────────────────────

/// Fallback play-area width used until a window reports its real size
/// (and by headless runs that have no window at all).
pub const PLAY_WIDTH: f32 = 1400.0;

/// Fallback play-area height.
pub const PLAY_HEIGHT: f32 = 800.0;

// ── Player: Movement ──────────────────────────────────────────────────────────

/// Side length of the square astronaut sprite / bounding box.
///
/// Large on purpose: the astronaut art is a full-body illustration and the
/// repair-zone overlap test uses this box.
pub const PLAYER_SIZE: f32 = 220.0;

/// Velocity added per frame for each held direction key.
pub const ACCELERATION: f32 = 0.4;

/// Multiplicative velocity damping applied every frame.
///
/// Terminal speed under a held key is `ACCELERATION * FRICTION / (1 - FRICTION)`
/// ≈ 7.6 px/frame, so `MAX_SPEED` is the binding limit.  Lower values make the
/// water feel thicker.
pub const FRICTION: f32 = 0.95;

/// Maximum speed magnitude (px/frame).  Clamped as a vector, not per axis.
pub const MAX_SPEED: f32 = 6.0;

// ── Drift (underwater current) ────────────────────────────────────────────────

/// Full width of the uniform range each drift component is drawn from.
///
/// Each axis is drawn from `[-DRIFT_STRENGTH / 2, DRIFT_STRENGTH / 2)`.  With
/// friction the steady-state drift speed is up to ~3 px/frame.
pub const DRIFT_STRENGTH: f32 = 0.3;

/// Frames between drift re-rolls (~3 s at 60 Hz).
pub const DRIFT_REROLL_FRAMES: u64 = 180;

// ── Stages ────────────────────────────────────────────────────────────────────

/// Length of the gravity-adaptation stage (~8 s at 60 Hz).
pub const GRAVITY_STAGE_FRAMES: u32 = 480;

/// Frames the instruction banner stays up after a stage starts (~7 s).
pub const INSTRUCTION_FRAMES: u32 = 420;

// ── Oxygen ────────────────────────────────────────────────────────────────────

/// Full tank.
pub const OXYGEN_MAX: f32 = 100.0;

/// Frames between oxygen drains while in a consuming stage (~1 s).
pub const OXYGEN_DRAIN_INTERVAL: u32 = 60;

/// Oxygen removed per drain.  At 0.5 / 60 frames a full tank lasts 200 s.
pub const OXYGEN_DRAIN_AMOUNT: f32 = 0.5;

/// Oxygen restored per collected tool.
pub const OXYGEN_TOOL_BONUS: f32 = 5.0;

/// At or below this level the HUD switches the oxygen bar to its warning colour.
pub const OXYGEN_LOW_THRESHOLD: f32 = 30.0;

// ── Tools ─────────────────────────────────────────────────────────────────────

/// Number of collectible tools per session (fixed by the layout table).
pub const TOOL_COUNT: usize = 8;

/// Minimum distance kept between a tool and the play-area edges.
pub const TOOL_PADDING: f32 = 100.0;

/// A tool is collected when the astronaut's centre is closer than this.
pub const COLLECT_RADIUS: f32 = 60.0;

/// Frames after a collection during which no other tool can be collected.
/// Stops two tools stacked closely from being taken on adjacent frames.
pub const COLLECTION_COOLDOWN_FRAMES: u32 = 15;

/// Base radius of the pulsing highlight drawn behind each tool.
pub const TOOL_PULSE_BASE: f32 = 30.0;

/// Amplitude of the highlight pulse.
pub const TOOL_PULSE_AMPLITUDE: f32 = 10.0;

/// Phase advance per frame of the highlight pulse (radians).
pub const TOOL_PULSE_RATE: f32 = 0.05;

// ── Repair Zone ───────────────────────────────────────────────────────────────

/// Side length of the square repair zone.
pub const REPAIR_ZONE_SIZE: f32 = 250.0;

/// Distance from the right edge of the play area to the zone's left edge.
pub const REPAIR_ZONE_INSET: f32 = 350.0;

/// Frames between first overlap with the repair zone and victory (~0.5 s).
pub const REPAIR_DELAY_FRAMES: u32 = 30;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Maximum score a single training run can award.
pub const MISSION_SCORE_CAP: u32 = 50;

/// Score per collected tool.
pub const SCORE_PER_TOOL: u32 = 5;

/// Cap on the cumulative session score across all activities.
pub const SESSION_SCORE_CAP: u32 = 100;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Font size for HUD body text.
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Number of progress markers in the HUD (gravity, collect, repair, complete).
pub const PROGRESS_MARKERS: u32 = 4;
