//! Draw-command surface between the frame loop and whatever presents it.
//!
//! The loop never touches a renderer.  Each frame it submits a short,
//! ordered list of [`DrawCommand`]s to a [`Canvas`]; the Bevy presenter
//! (`crate::rendering`) turns them into sprites, meshes, gizmos and UI, and
//! headless tests simply record them in a [`DrawList`].
//!
//! Missing art is not an error at this level: [`ArtReadiness`] says which
//! images have finished loading, and the loop picks a placeholder command
//! for anything that has not.

use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;

use super::hud::HudView;
use super::physics::PlayArea;
use super::tools::ToolKind;

/// Which art slots have a decoded image available this frame.
///
/// A slot whose candidates all failed simply stays `false` forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArtReadiness {
    pub astronaut_static: bool,
    pub astronaut_moving: bool,
    pub backdrop_damaged: bool,
    pub backdrop_repaired: bool,
}

impl ArtReadiness {
    /// Everything loaded.
    pub const ALL: ArtReadiness = ArtReadiness {
        astronaut_static: true,
        astronaut_moving: true,
        backdrop_damaged: true,
        backdrop_repaired: true,
    };

    /// Nothing loaded (headless runs, or before the first image decodes).
    pub const NONE: ArtReadiness = ArtReadiness {
        astronaut_static: false,
        astronaut_moving: false,
        backdrop_damaged: false,
        backdrop_repaired: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropArt {
    /// Facility before repair.
    Damaged,
    /// Facility after repair.
    Repaired,
}

/// What fills the surface behind everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Art(BackdropArt),
    /// Solid vertical gradient, used whenever the wanted art is unavailable.
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Static,
    Moving,
}

/// How to draw the astronaut this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstronautLook {
    Sprite(Pose),
    /// Rounded body with a helmet disc; deterministic, needs no assets.
    Placeholder(Pose),
}

/// One drawing instruction.  Screen-space coordinates (origin top-left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        area: PlayArea,
    },
    Backdrop(Backdrop),
    Astronaut {
        bounds: Rect,
        look: AstronautLook,
    },
    Tool {
        index: usize,
        kind: ToolKind,
        position: Vec2,
        /// Current radius of the pulsing highlight.
        pulse_radius: f32,
    },
    RepairZone {
        bounds: Rect,
    },
    Hud(HudView),
}

/// Receives the draw commands of one frame, in submission order.
pub trait Canvas {
    fn submit(&mut self, command: DrawCommand);
}

/// Canvas that keeps every command of the latest frame.
///
/// The Bevy host owns one as a resource and clears it before each frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl Canvas for DrawList {
    fn submit(&mut self, command: DrawCommand) {
        if matches!(command, DrawCommand::Clear { .. }) {
            self.commands.clear();
        }
        self.commands.push(command);
    }
}

impl DrawList {
    pub fn backdrop(&self) -> Option<Backdrop> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Backdrop(b) => Some(*b),
            _ => None,
        })
    }

    pub fn astronaut(&self) -> Option<(Rect, AstronautLook)> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Astronaut { bounds, look } => Some((*bounds, *look)),
            _ => None,
        })
    }

    pub fn repair_zone(&self) -> Option<Rect> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::RepairZone { bounds } => Some(*bounds),
            _ => None,
        })
    }

    /// Every tool drawn this frame as `(index, kind, position, pulse_radius)`.
    pub fn tools(&self) -> impl Iterator<Item = (usize, ToolKind, Vec2, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Tool {
                index,
                kind,
                position,
                pulse_radius,
            } => Some((*index, *kind, *position, *pulse_radius)),
            _ => None,
        })
    }

    /// The last HUD snapshot of the frame.
    pub fn hud(&self) -> Option<&HudView> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Hud(view) => Some(view),
            _ => None,
        })
    }

    pub fn area(&self) -> Option<PlayArea> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Clear { area } => Some(*area),
            _ => None,
        })
    }
}
