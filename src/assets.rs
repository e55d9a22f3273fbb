//! Image loading with ordered fallbacks.
//!
//! Each art slot has a list of candidate paths.  The first candidate is
//! requested at startup; when it fails the next one is requested, and so on.
//! A slot whose candidates are all exhausted is marked unavailable and the
//! training loop keeps drawing its placeholder for it.  Loading never blocks
//! a frame: [`advance_art_loading_system`] only polls load states.
//!
//! | Slot               | Used for                                 |
//! |--------------------|------------------------------------------|
//! | `AstronautStatic`  | Astronaut while no direction is held     |
//! | `AstronautMoving`  | Astronaut while any direction is held    |
//! | `BackdropDamaged`  | Facility backdrop before the repair      |
//! | `BackdropRepaired` | Facility backdrop after the repair       |

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::config::TrainingConfig;
use crate::error::TrainingError;
use crate::training::ArtReadiness;

// ── Candidate chain ───────────────────────────────────────────────────────────

/// Where a chain currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Waiting on the candidate at this index.
    Pending(usize),
    /// The candidate at this index loaded.
    Loaded(usize),
    /// Every candidate failed (or there were none).
    Unavailable,
}

/// Ordered list of paths for one asset; the first one that loads wins.
#[derive(Debug, Clone)]
pub struct CandidateChain {
    label: &'static str,
    candidates: Vec<String>,
    resolution: Resolution,
}

impl CandidateChain {
    pub fn new(label: &'static str, candidates: Vec<String>) -> Self {
        let resolution = if candidates.is_empty() {
            Resolution::Unavailable
        } else {
            Resolution::Pending(0)
        };
        Self {
            label,
            candidates,
            resolution,
        }
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Path being waited on, if any.
    pub fn pending(&self) -> Option<&str> {
        match self.resolution {
            Resolution::Pending(i) => self.candidates.get(i).map(String::as_str),
            _ => None,
        }
    }

    /// Path that loaded, if any.
    pub fn resolved(&self) -> Option<&str> {
        match self.resolution {
            Resolution::Loaded(i) => self.candidates.get(i).map(String::as_str),
            _ => None,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.resolution, Resolution::Loaded(_))
    }

    /// The pending candidate loaded.
    pub fn on_loaded(&mut self) {
        if let Resolution::Pending(i) = self.resolution {
            self.resolution = Resolution::Loaded(i);
        }
    }

    /// The pending candidate failed.  Returns the next path to try, or an
    /// [`TrainingError::ArtUnavailable`] once the list is exhausted.
    pub fn on_failed(&mut self) -> Result<&str, TrainingError> {
        let Resolution::Pending(i) = self.resolution else {
            return Err(self.exhausted());
        };
        if i + 1 < self.candidates.len() {
            self.resolution = Resolution::Pending(i + 1);
            Ok(&self.candidates[i + 1])
        } else {
            self.resolution = Resolution::Unavailable;
            Err(self.exhausted())
        }
    }

    fn exhausted(&self) -> TrainingError {
        TrainingError::ArtUnavailable {
            label: self.label,
            tried: self.candidates.len(),
        }
    }
}

// ── Bevy side ─────────────────────────────────────────────────────────────────

/// The four art slots the training scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtSlot {
    AstronautStatic,
    AstronautMoving,
    BackdropDamaged,
    BackdropRepaired,
}

impl ArtSlot {
    pub const ALL: [ArtSlot; 4] = [
        ArtSlot::AstronautStatic,
        ArtSlot::AstronautMoving,
        ArtSlot::BackdropDamaged,
        ArtSlot::BackdropRepaired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ArtSlot::AstronautStatic => "astronaut (static)",
            ArtSlot::AstronautMoving => "astronaut (moving)",
            ArtSlot::BackdropDamaged => "backdrop (damaged)",
            ArtSlot::BackdropRepaired => "backdrop (repaired)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn candidates(self, config: &TrainingConfig) -> Vec<String> {
        match self {
            ArtSlot::AstronautStatic => config.astronaut_static_candidates.clone(),
            ArtSlot::AstronautMoving => config.astronaut_moving_candidates.clone(),
            ArtSlot::BackdropDamaged => config.backdrop_damaged_candidates.clone(),
            ArtSlot::BackdropRepaired => config.backdrop_repaired_candidates.clone(),
        }
    }
}

/// One slot's chain plus the handle currently being loaded or shown.
#[derive(Debug, Clone)]
pub struct ArtEntry {
    pub chain: CandidateChain,
    pub handle: Option<Handle<Image>>,
}

/// Every art slot, indexed by [`ArtSlot`].
#[derive(Resource, Debug, Clone)]
pub struct ArtLibrary {
    entries: [ArtEntry; 4],
}

impl ArtLibrary {
    /// Build the chains without requesting anything.
    pub fn from_config(config: &TrainingConfig) -> Self {
        let entries = ArtSlot::ALL.map(|slot| ArtEntry {
            chain: CandidateChain::new(slot.label(), slot.candidates(config)),
            handle: None,
        });
        Self { entries }
    }

    pub fn entry(&self, slot: ArtSlot) -> &ArtEntry {
        &self.entries[slot.index()]
    }

    /// Image for `slot` if it finished loading.
    pub fn image(&self, slot: ArtSlot) -> Option<Handle<Image>> {
        let entry = self.entry(slot);
        entry
            .chain
            .is_ready()
            .then(|| entry.handle.clone())
            .flatten()
    }

    pub fn readiness(&self) -> ArtReadiness {
        let ready = |slot: ArtSlot| self.entry(slot).chain.is_ready();
        ArtReadiness {
            astronaut_static: ready(ArtSlot::AstronautStatic),
            astronaut_moving: ready(ArtSlot::AstronautMoving),
            backdrop_damaged: ready(ArtSlot::BackdropDamaged),
            backdrop_repaired: ready(ArtSlot::BackdropRepaired),
        }
    }
}

/// Build the library from config and request the first candidate of every
/// slot.  Must run after [`crate::config::load_training_config`].
pub fn begin_art_loading(
    mut commands: Commands,
    config: Res<TrainingConfig>,
    asset_server: Res<AssetServer>,
) {
    let mut library = ArtLibrary::from_config(&config);
    for entry in library.entries.iter_mut() {
        match entry.chain.pending() {
            Some(path) => entry.handle = Some(asset_server.load(path.to_owned())),
            None => warn!("⚠ No candidates for {}; drawing placeholder", entry.chain.label()),
        }
    }
    commands.insert_resource(library);
    eprintln!("[SETUP] Art loading started");
}

/// Poll pending slots and move each chain forward.
pub fn advance_art_loading_system(asset_server: Res<AssetServer>, mut library: ResMut<ArtLibrary>) {
    for entry in library.entries.iter_mut() {
        let Some(handle) = entry.handle.as_ref() else {
            continue;
        };
        if entry.chain.pending().is_none() {
            continue;
        }
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                entry.chain.on_loaded();
                info!(
                    "✓ {} art loaded from {}",
                    entry.chain.label(),
                    entry.chain.resolved().unwrap_or_default()
                );
            }
            Some(LoadState::Failed(err)) => {
                debug!("{} candidate failed: {err}", entry.chain.label());
                match entry.chain.on_failed() {
                    Ok(next) => {
                        let next = next.to_owned();
                        entry.handle = Some(asset_server.load(next));
                    }
                    Err(e) => {
                        warn!("⚠ {e}; drawing placeholder");
                        entry.handle = None;
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(paths: &[&str]) -> CandidateChain {
        CandidateChain::new("test", paths.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn first_success_wins() {
        let mut c = chain(&["a.png", "b.png"]);
        assert_eq!(c.pending(), Some("a.png"));
        c.on_loaded();
        assert!(c.is_ready());
        assert_eq!(c.resolved(), Some("a.png"));
        assert_eq!(c.pending(), None);
    }

    #[test]
    fn failures_walk_the_list_then_give_up() {
        let mut c = chain(&["a.png", "b.png"]);
        assert_eq!(c.on_failed().ok(), Some("b.png"));
        let err = c.on_failed().unwrap_err();
        assert!(matches!(err, TrainingError::ArtUnavailable { tried: 2, .. }));
        assert_eq!(c.resolution(), Resolution::Unavailable);
        assert!(!c.is_ready());
        // A late load report for an exhausted chain changes nothing.
        c.on_loaded();
        assert_eq!(c.resolution(), Resolution::Unavailable);
    }

    #[test]
    fn empty_chain_is_unavailable_from_the_start() {
        let c = chain(&[]);
        assert_eq!(c.resolution(), Resolution::Unavailable);
        assert_eq!(c.pending(), None);
    }

    #[test]
    fn library_reports_nothing_ready_before_loading() {
        let library = ArtLibrary::from_config(&TrainingConfig::default());
        assert_eq!(library.readiness(), ArtReadiness::NONE);
        assert_eq!(
            library.entry(ArtSlot::BackdropRepaired).chain.pending(),
            Some("nbl-bg.png")
        );
        assert!(library.image(ArtSlot::AstronautStatic).is_none());
    }
}
