//! Engine-independent training core.
//!
//! Nothing in here touches the ECS world: the loop owns its state and draws
//! through the [`Canvas`] trait, so tests drive it frame by frame without a
//! window.
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | `stage`     | [`Stage`] machine and its transition table             |
//! | `oxygen`    | Bounded [`Oxygen`] supply                              |
//! | `input`     | [`MoveIntent`] resource (held directions)              |
//! | `physics`   | Buoyancy integrator, [`PlayArea`], [`PlayerState`]     |
//! | `tools`     | Tool layout and proximity collection                   |
//! | `repair`    | [`RepairZone`] placement and overlap                   |
//! | `session`   | [`TrainingSession`]: all per-attempt state             |
//! | `canvas`    | [`DrawCommand`] surface and [`ArtReadiness`]           |
//! | `hud`       | [`HudView`] snapshot                                   |
//! | `tick`      | [`TrainingLoop`]: start / stop / restart / frame       |
//! | `score`     | Mission score and [`SessionScore`]                     |
//! | `autopilot` | Scripted [`MoveIntent`] source for unattended runs     |

pub mod autopilot;
pub mod canvas;
pub mod hud;
pub mod input;
pub mod oxygen;
pub mod physics;
pub mod repair;
pub mod score;
pub mod session;
pub mod stage;
pub mod tick;
pub mod tools;

pub use canvas::{ArtReadiness, AstronautLook, Backdrop, BackdropArt, Canvas, DrawCommand, DrawList, Pose};
pub use hud::{HudView, ToolTally};
pub use input::MoveIntent;
pub use oxygen::Oxygen;
pub use physics::{PlayArea, PlayerState};
pub use repair::RepairZone;
pub use score::{mission_score, SessionScore};
pub use session::TrainingSession;
pub use stage::Stage;
pub use tick::{FrameOutcome, TrainingEvent, TrainingLoop};
pub use tools::{Tool, ToolKind};
