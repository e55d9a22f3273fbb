//! Mission 25: a Neutral Buoyancy Laboratory training mini-game.
//!
//! The astronaut drifts through a water tank, adapts to buoyancy, gathers
//! eight tools against a draining oxygen supply, then repairs the spacecraft.
//! [`training`] holds the frame-driven game loop with no Bevy scheduling in
//! it; the other modules host that loop inside a Bevy app.

pub mod assets;
pub mod audio;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod graphics;
pub mod menu;
pub mod meshes;
pub mod rendering;
pub mod simulation;
pub mod test_mode;
pub mod training;
