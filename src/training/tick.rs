//! The frame loop: one [`TrainingLoop::frame`] call per display refresh.
//!
//! ## Frame order
//!
//! | Step | Work                                                              |
//! |------|-------------------------------------------------------------------|
//! | 1    | Clear the surface                                                 |
//! | 2    | Backdrop (repaired / damaged art, gradient fallback)              |
//! | 3-8  | [`physics::step`]: intent, drift, friction, speed clamp, Euler, bounds |
//! | 9    | Astronaut (sprite or placeholder, moving / static pose)           |
//! | 10   | Oxygen drain in consuming stages; depletion ends the frame early  |
//! | 11   | Stage logic (exhaustive match on [`Stage`])                       |
//! | 12   | HUD                                                               |
//! | 13   | Reschedule unless the stage is terminal                           |
//!
//! The loop owns all mutable state and never blocks.  It reports what
//! happened through [`FrameOutcome`]; the Bevy host turns the events into
//! sound cues and overlays.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::canvas::{ArtReadiness, AstronautLook, Backdrop, BackdropArt, Canvas, DrawCommand, Pose};
use super::hud::HudView;
use super::input::MoveIntent;
use super::physics::{self, PlayArea};
use super::session::TrainingSession;
use super::stage::Stage;
use super::tools::{all_collected, tool_in_reach, ToolKind};
use crate::config::TrainingConfig;

/// Something observable that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingEvent {
    StageChanged { from: Stage, to: Stage },
    ToolCollected { index: usize, kind: ToolKind },
    ShipRepaired,
}

/// Result of one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Events in the order they happened.
    pub events: Vec<TrainingEvent>,
    /// `false` once the loop has stopped (terminal stage or [`TrainingLoop::stop`]).
    pub reschedule: bool,
}

impl FrameOutcome {
    /// The stage entered this frame, if any.
    pub fn entered(&self) -> Option<Stage> {
        self.events.iter().find_map(|e| match e {
            TrainingEvent::StageChanged { to, .. } => Some(*to),
            _ => None,
        })
    }
}

/// One training session plus the scheduling flag that drives it.
#[derive(Debug, Clone)]
pub struct TrainingLoop {
    config: TrainingConfig,
    session: TrainingSession,
    rng: StdRng,
    running: bool,
}

impl TrainingLoop {
    /// Build a stopped loop.  `config.seed` fixes the drift sequence.
    pub fn new(config: TrainingConfig, area: PlayArea) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = TrainingSession::new(area, &config);
        Self {
            config,
            session,
            rng,
            running: false,
        }
    }

    /// Begin scheduling.  Resets the frame counter, stage timers and drift;
    /// a no-op while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        let s = &mut self.session;
        s.frame = 0;
        s.stage_frames = 0;
        s.oxygen_timer = 0;
        s.collection_cooldown = 0;
        s.drift = physics::reroll_drift(&mut self.rng, self.config.drift_strength);
        self.running = true;
    }

    /// Cancel scheduling.  Safe to call repeatedly or before [`Self::start`].
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Throw the session away and start a fresh one in the same area.
    pub fn restart(&mut self) {
        self.running = false;
        self.session = TrainingSession::new(self.session.area, &self.config);
        self.start();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn session(&self) -> &TrainingSession {
        &self.session
    }

    #[inline]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Direct session access for hosts and tests that stage a scenario.
    #[inline]
    pub fn session_mut(&mut self) -> &mut TrainingSession {
        &mut self.session
    }

    /// Follow a window resize.
    pub fn set_area(&mut self, area: PlayArea) {
        self.session.resize(area, &self.config);
    }

    /// Advance the simulation by one frame and draw it.
    pub fn frame<C: Canvas + ?Sized>(
        &mut self,
        intent: &MoveIntent,
        art: &ArtReadiness,
        canvas: &mut C,
    ) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if !self.running {
            return outcome;
        }

        let config = &self.config;
        let s = &mut self.session;
        s.frame += 1;
        s.collection_cooldown = s.collection_cooldown.saturating_sub(1);

        // 1-2
        canvas.submit(DrawCommand::Clear { area: s.area });
        canvas.submit(DrawCommand::Backdrop(backdrop_for(s, art)));

        // 3-8
        if s.frame % config.drift_reroll_frames == 0 {
            s.drift = physics::reroll_drift(&mut self.rng, config.drift_strength);
        }
        physics::step(&mut s.player, intent, s.drift, config, s.area);

        // 9
        canvas.submit(DrawCommand::Astronaut {
            bounds: s.player.bounds(),
            look: astronaut_look(s.player.moving, art),
        });

        // 10
        if s.stage.consumes_oxygen() {
            s.oxygen_timer += 1;
            if s.oxygen_timer >= config.oxygen_drain_interval {
                s.oxygen_timer = 0;
                if s.oxygen.drain(config.oxygen_drain_amount) {
                    if let Some((from, to)) = s.fail(config) {
                        outcome.events.push(TrainingEvent::StageChanged { from, to });
                    }
                    canvas.submit(DrawCommand::Hud(HudView::of(s, config)));
                    self.running = false;
                    return outcome;
                }
            }
        }

        // 11
        match s.stage {
            Stage::Gravity => {
                s.stage_frames += 1;
                if s.stage_frames >= config.gravity_stage_frames {
                    if let Some((from, to)) = s.advance(config) {
                        outcome.events.push(TrainingEvent::StageChanged { from, to });
                    }
                }
            }
            Stage::Collect => {
                let pulse_radius = config.tool_pulse_base
                    + config.tool_pulse_amplitude * (s.frame as f32 * config.tool_pulse_rate).sin();
                for (index, tool) in s.tools.iter().enumerate().filter(|(_, t)| !t.collected) {
                    canvas.submit(DrawCommand::Tool {
                        index,
                        kind: tool.kind,
                        position: tool.position,
                        pulse_radius,
                    });
                }

                if s.collection_cooldown == 0 {
                    if let Some(index) =
                        tool_in_reach(&s.tools, s.player.center(), config.collect_radius)
                    {
                        let tool = &mut s.tools[index];
                        tool.collected = true;
                        s.collection_cooldown = config.collection_cooldown_frames;
                        s.oxygen.refill(config.oxygen_tool_bonus);
                        outcome.events.push(TrainingEvent::ToolCollected {
                            index,
                            kind: tool.kind,
                        });
                    }
                }

                if all_collected(&s.tools) {
                    if let Some((from, to)) = s.advance(config) {
                        outcome.events.push(TrainingEvent::StageChanged { from, to });
                    }
                }
            }
            Stage::Repair => {
                let zone = s.repair_zone(config);
                canvas.submit(DrawCommand::RepairZone { bounds: zone.bounds });

                if !s.ship_repaired && zone.overlaps(s.player.bounds()) {
                    s.ship_repaired = true;
                    s.repair_countdown = Some(config.repair_delay_frames);
                    outcome.events.push(TrainingEvent::ShipRepaired);
                } else if let Some(left) = s.repair_countdown.as_mut() {
                    *left = left.saturating_sub(1);
                }

                if s.repair_countdown == Some(0) {
                    s.repair_countdown = None;
                    if let Some((from, to)) = s.advance(config) {
                        outcome.events.push(TrainingEvent::StageChanged { from, to });
                    }
                }
            }
            Stage::Victory | Stage::GameOver => {}
        }

        // 12
        canvas.submit(DrawCommand::Hud(HudView::of(s, config)));
        s.banner_frames = s.banner_frames.saturating_sub(1);

        // 13
        if s.stage.is_terminal() {
            self.running = false;
        }
        outcome.reschedule = self.running;
        outcome
    }
}

fn backdrop_for(session: &TrainingSession, art: &ArtReadiness) -> Backdrop {
    let repaired = session.ship_repaired || session.stage == Stage::Victory;
    match repaired {
        true if art.backdrop_repaired => Backdrop::Art(BackdropArt::Repaired),
        false if art.backdrop_damaged => Backdrop::Art(BackdropArt::Damaged),
        _ => Backdrop::Gradient,
    }
}

fn astronaut_look(moving: bool, art: &ArtReadiness) -> AstronautLook {
    let (pose, ready) = if moving {
        (Pose::Moving, art.astronaut_moving)
    } else {
        (Pose::Static, art.astronaut_static)
    };
    if ready {
        AstronautLook::Sprite(pose)
    } else {
        AstronautLook::Placeholder(pose)
    }
}

/// Centre of the repair zone, or of the nearest uncollected tool, whichever
/// the current stage is after.  Used by the autopilot.
pub(crate) fn current_target(session: &TrainingSession, config: &TrainingConfig) -> Option<Vec2> {
    match session.stage {
        Stage::Collect => {
            let center = session.player.center();
            session
                .tools
                .iter()
                .filter(|t| !t.collected)
                .map(|t| t.position)
                .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)))
        }
        Stage::Repair => Some(session.repair_zone(config).center()),
        Stage::Gravity | Stage::Victory | Stage::GameOver => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::canvas::DrawList;

    fn still_config() -> TrainingConfig {
        TrainingConfig {
            drift_strength: 0.0,
            seed: Some(7),
            ..Default::default()
        }
    }

    fn running_loop(config: TrainingConfig) -> TrainingLoop {
        let area = PlayArea::from_config(&config);
        let mut lp = TrainingLoop::new(config, area);
        lp.start();
        lp
    }

    #[test]
    fn stopped_loop_draws_nothing() {
        let mut lp = TrainingLoop::new(still_config(), PlayArea::new(1400.0, 800.0));
        let mut list = DrawList::default();
        let out = lp.frame(&MoveIntent::IDLE, &ArtReadiness::ALL, &mut list);
        assert!(list.commands.is_empty());
        assert!(!out.reschedule);
        lp.stop();
        lp.stop();
        assert!(!lp.is_running());
    }

    #[test]
    fn frame_draws_in_order_with_fallbacks() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        let out = lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        assert!(out.reschedule);
        assert!(matches!(list.commands[0], DrawCommand::Clear { .. }));
        assert_eq!(list.commands[1], DrawCommand::Backdrop(Backdrop::Gradient));
        assert!(matches!(
            list.commands[2],
            DrawCommand::Astronaut {
                look: AstronautLook::Placeholder(Pose::Static),
                ..
            }
        ));
        assert!(matches!(list.commands.last(), Some(DrawCommand::Hud(_))));
    }

    #[test]
    fn loaded_art_is_used_and_pose_follows_input() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        let right = MoveIntent {
            right: true,
            ..Default::default()
        };
        lp.frame(&right, &ArtReadiness::ALL, &mut list);
        assert_eq!(list.backdrop(), Some(Backdrop::Art(BackdropArt::Damaged)));
        assert_eq!(
            list.astronaut().map(|(_, look)| look),
            Some(AstronautLook::Sprite(Pose::Moving))
        );
    }

    #[test]
    fn gravity_has_no_oxygen_drain() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        for _ in 0..400 {
            lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        }
        assert_eq!(lp.session().oxygen.level(), 100.0);
        assert_eq!(lp.session().stage, Stage::Gravity);
    }

    #[test]
    fn banner_hides_after_its_timer() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        assert!(list.hud().and_then(|h| h.banner).is_some());
        for _ in 0..420 {
            lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        }
        assert_eq!(list.hud().and_then(|h| h.banner), None);
    }

    #[test]
    fn tools_only_drawn_while_collecting() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        assert_eq!(list.tools().count(), 0);

        lp.session_mut().stage = Stage::Collect;
        lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        assert_eq!(list.tools().count(), 8);
        for (_, _, _, r) in list.tools() {
            assert!((20.0..=40.0).contains(&r));
        }
    }

    #[test]
    fn cooldown_blocks_back_to_back_collection() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        let s = lp.session_mut();
        s.stage = Stage::Collect;
        // Two tools right next to each other, both in reach of the player.
        let center = s.player.center();
        s.tools[0].position = center;
        s.tools[1].position = center + Vec2::new(10.0, 0.0);

        let first = lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        assert_eq!(first.events.len(), 1);
        let second = lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        assert!(second.events.is_empty());

        for _ in 0..14 {
            lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list);
        }
        assert!(lp.session().tools[1].collected);
    }

    #[test]
    fn repaired_backdrop_follows_repair() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        lp.session_mut().stage = Stage::Repair;
        lp.session_mut().ship_repaired = true;
        lp.session_mut().repair_countdown = Some(10);
        lp.frame(&MoveIntent::IDLE, &ArtReadiness::ALL, &mut list);
        assert_eq!(list.backdrop(), Some(Backdrop::Art(BackdropArt::Repaired)));

        let only_damaged = ArtReadiness {
            backdrop_damaged: true,
            ..ArtReadiness::NONE
        };
        lp.frame(&MoveIntent::IDLE, &only_damaged, &mut list);
        assert_eq!(list.backdrop(), Some(Backdrop::Gradient));
    }

    #[test]
    fn restart_resets_everything() {
        let mut lp = running_loop(still_config());
        let mut list = DrawList::default();
        let s = lp.session_mut();
        s.stage = Stage::GameOver;
        s.tools[3].collected = true;
        s.oxygen.drain(100.0);
        s.player.position.x = 0.0;
        lp.stop();

        lp.restart();
        let s = lp.session();
        assert!(lp.is_running());
        assert_eq!(s.stage, Stage::Gravity);
        assert_eq!(s.oxygen.level(), 100.0);
        assert!(s.tools.iter().all(|t| !t.collected));
        assert_eq!(s.player.position, Vec2::new(590.0, 290.0));
        assert_eq!(s.frame, 0);
        assert!(lp.frame(&MoveIntent::IDLE, &ArtReadiness::NONE, &mut list).reschedule);
    }

    #[test]
    fn target_prefers_nearest_tool_then_zone() {
        let config = still_config();
        let mut s = TrainingSession::new(PlayArea::from_config(&config), &config);
        assert_eq!(current_target(&s, &config), None);
        s.stage = Stage::Collect;
        assert_eq!(current_target(&s, &config), Some(Vec2::new(800.0, 350.0)));
        s.stage = Stage::Repair;
        assert_eq!(current_target(&s, &config), Some(Vec2::new(1175.0, 375.0)));
    }
}
