pub mod collision;
pub mod config;
pub mod effect;
pub mod player;
pub mod powerup;
pub mod render;
pub mod trail;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use kurve_core::cooldown::Cooldown;
use kurve_core::player::{Player, PlayerId};

use collision::{BorderEdge, border_crossing};
use config::ArenaConfig;
use player::Curve;
use powerup::{PowerUpKind, Scope, SpawnedPowerUp};
use render::{BorderFrame, CurveSprite, RenderFrame};
use trail::TrailStore;

/// Steering signals for one player for one frame. Held signals are
/// level-triggered; pressed signals are edge-triggered and consumed
/// by the next tick (used under the square capability).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveInput {
    pub left_held: bool,
    pub right_held: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
}

/// Round lifecycle. `Active` pairs with a separate paused flag;
/// pausing halts simulated time entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Idle,
    Countdown { display: u8 },
    Active,
    Ended { winner: Option<PlayerId> },
}

/// The one owned session object: roster, current round entities, and
/// the round state machine. Replaced-in-place on each new round; no
/// global state anywhere.
pub struct Arena {
    config: ArenaConfig,
    roster: Vec<Player>,
    curves: Vec<Curve>,
    trail: TrailStore,
    powerups: Vec<SpawnedPowerUp>,
    pending_inputs: HashMap<PlayerId, CurveInput>,
    phase: RoundPhase,
    countdown_step: Cooldown,
    paused: bool,
    elapsed_time: f32,
    powerup_spawn: Cooldown,
    portal_borders: bool,
    portal_timer: Cooldown,
    rng: StdRng,
}

impl Arena {
    pub fn new(config: ArenaConfig, roster: Vec<Player>) -> Self {
        Self::with_rng(config, roster, StdRng::from_os_rng())
    }

    /// Deterministic arena for tests and replays.
    pub fn with_seed(config: ArenaConfig, roster: Vec<Player>, seed: u64) -> Self {
        Self::with_rng(config, roster, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ArenaConfig, roster: Vec<Player>, rng: StdRng) -> Self {
        Self {
            config,
            roster,
            curves: Vec::new(),
            trail: TrailStore::new(),
            powerups: Vec::new(),
            pending_inputs: HashMap::new(),
            phase: RoundPhase::Idle,
            countdown_step: Cooldown::ready(),
            paused: false,
            elapsed_time: 0.0,
            powerup_spawn: Cooldown::ready(),
            portal_borders: false,
            portal_timer: Cooldown::ready(),
            rng,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn curve(&self, id: PlayerId) -> Option<&Curve> {
        self.curves.iter().find(|c| c.id == id)
    }

    pub fn trail(&self) -> &TrailStore {
        &self.trail
    }

    pub fn powerups(&self) -> &[SpawnedPowerUp] {
        &self.powerups
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn portal_borders_active(&self) -> bool {
        self.portal_borders
    }

    pub fn alive_count(&self) -> usize {
        self.curves.iter().filter(|c| c.alive).count()
    }

    pub fn is_round_complete(&self) -> bool {
        matches!(self.phase, RoundPhase::Ended { .. })
    }

    /// First player at or past the configured score threshold, best
    /// score first. Round flow itself stays last-player-standing;
    /// callers decide what reaching the threshold means.
    pub fn match_winner(&self) -> Option<PlayerId> {
        self.curves
            .iter()
            .filter(|c| c.score >= self.config.points_to_win)
            .max_by_key(|c| c.score)
            .map(|c| c.id)
    }

    /// Begin a new round: rebuild every curve from the roster at a
    /// random position and heading, clear round entities, and enter
    /// the countdown. Ignored while a countdown or round is running.
    pub fn start_round(&mut self) -> bool {
        match self.phase {
            RoundPhase::Countdown { .. } | RoundPhase::Active => {
                tracing::debug!(phase = ?self.phase, "Ignored start request");
                return false;
            },
            RoundPhase::Idle | RoundPhase::Ended { .. } => {},
        }

        // Scores outlive rounds; everything else is rebuilt.
        let carried: HashMap<PlayerId, i32> =
            self.curves.iter().map(|c| (c.id, c.score)).collect();

        let inset = self.config.border_width + self.config.base_radius * 2.0;
        let mut curves = Vec::with_capacity(self.roster.len());
        for profile in &self.roster {
            let x = self.rng.random_range(inset..self.config.width - inset);
            let y = self.rng.random_range(inset..self.config.height - inset);
            let direction = self.rng.random_range(0.0..std::f32::consts::TAU);
            let mut curve = Curve::spawn(profile, x, y, direction, &self.config);
            curve.score = carried.get(&profile.id).copied().unwrap_or(0);
            curves.push(curve);
        }
        self.curves = curves;

        self.trail.clear();
        self.powerups.clear();
        self.pending_inputs.clear();
        self.elapsed_time = 0.0;
        // First power-up spawns on the first active frame.
        self.powerup_spawn.set(0.0);
        self.portal_borders = false;
        self.portal_timer = Cooldown::ready();
        self.paused = false;

        if self.config.countdown_start == 0 {
            self.phase = RoundPhase::Active;
        } else {
            self.phase = RoundPhase::Countdown {
                display: self.config.countdown_start,
            };
            self.countdown_step.set(self.config.countdown_interval);
        }
        tracing::debug!(players = self.curves.len(), "Round starting");
        true
    }

    /// Record one player's steering for the next tick. Held signals
    /// overwrite; pressed signals accumulate until consumed, so a tap
    /// between ticks is never lost.
    pub fn apply_input(&mut self, player_id: PlayerId, input: CurveInput) {
        if !self.roster.iter().any(|p| p.id == player_id) {
            tracing::debug!(player_id, "Dropped input for unknown player");
            return;
        }
        let entry = self.pending_inputs.entry(player_id).or_default();
        entry.left_held = input.left_held;
        entry.right_held = input.right_held;
        if input.left_pressed {
            entry.left_pressed = true;
        }
        if input.right_pressed {
            entry.right_pressed = true;
        }
    }

    /// Pause toggle. Meaningful only while a round is active; returns
    /// the paused state afterwards.
    pub fn toggle_pause(&mut self) -> bool {
        if matches!(self.phase, RoundPhase::Active) {
            self.paused = !self.paused;
        } else {
            tracing::debug!(phase = ?self.phase, "Ignored pause request");
        }
        self.paused
    }

    /// Advance the simulation by `dt` seconds of frame time. The
    /// caller derives `dt` from its frame clock (speed factor / base
    /// frame rate) so gameplay speed is independent of jitter.
    pub fn update(&mut self, dt: f32) {
        match self.phase {
            RoundPhase::Idle | RoundPhase::Ended { .. } => {},
            RoundPhase::Countdown { display } => {
                if self.countdown_step.tick_elapsed(dt) {
                    if display <= 1 {
                        self.phase = RoundPhase::Active;
                        tracing::debug!("Round active");
                    } else {
                        self.phase = RoundPhase::Countdown {
                            display: display - 1,
                        };
                        self.countdown_step.set(self.config.countdown_interval);
                    }
                }
            },
            RoundPhase::Active => {
                if !self.paused {
                    self.tick(dt);
                }
            },
        }
    }

    /// One simulation frame: kinematics for every live curve in list
    /// order, then border/trail/power-up checks in the same order,
    /// then arena-level timers.
    fn tick(&mut self, dt: f32) {
        self.elapsed_time += dt;

        for i in 0..self.curves.len() {
            if !self.curves[i].alive {
                continue;
            }
            let id = self.curves[i].id;
            let input = self.pending_inputs.remove(&id).unwrap_or_default();
            let curve = &mut self.curves[i];
            curve.update(
                dt,
                self.elapsed_time,
                input,
                &mut self.trail,
                &mut self.rng,
                &self.config,
            );
        }

        for i in 0..self.curves.len() {
            if !self.curves[i].alive {
                continue;
            }

            self.check_border(i);
            if !self.curves[i].alive {
                continue;
            }

            if self.trail_hit(i) {
                self.kill_curve(i);
            }
            if !self.curves[i].alive {
                continue;
            }

            self.collect_powerups(i);
        }

        if self.portal_borders && self.portal_timer.tick_elapsed(dt) {
            self.portal_borders = false;
            tracing::debug!("Portal borders reverted");
        }

        self.powerup_spawn.tick(dt);
        if self.powerup_spawn.is_ready() {
            let powerup = SpawnedPowerUp::spawn_random(&mut self.rng, &self.config);
            tracing::debug!(kind = ?powerup.kind, "Power-up spawned");
            self.powerups.push(powerup);
            let lo = self.config.powerup_spawn_min.min(self.config.powerup_spawn_max);
            let hi = self.config.powerup_spawn_min.max(self.config.powerup_spawn_max);
            let interval = if hi > lo {
                self.rng.random_range(lo..=hi)
            } else {
                lo
            };
            self.powerup_spawn.set(interval);
        }
    }

    /// Edge contact teleports to the opposite side when portals apply
    /// (globally or per player), otherwise kills.
    fn check_border(&mut self, i: usize) {
        let hitbox = self.curves[i].hitbox();
        let crossed = border_crossing(
            &hitbox,
            self.config.width,
            self.config.height,
            self.config.border_width,
        );
        let Some(edge) = crossed else {
            return;
        };

        let can_teleport = self.portal_borders || self.curves[i].can_teleport_through_borders();
        if !can_teleport {
            self.kill_curve(i);
            return;
        }

        let offset = self.config.border_width + self.curves[i].radius();
        let curve = &mut self.curves[i];
        match edge {
            BorderEdge::Left => curve.x = self.config.width - offset,
            BorderEdge::Right => curve.x = offset,
            BorderEdge::Top => curve.y = self.config.height - offset,
            BorderEdge::Bottom => curve.y = offset,
        }
        tracing::debug!(player = %curve.name, ?edge, "Teleported through border");
    }

    /// A trail record is lethal unless it is the curve's own and
    /// younger than the velocity-scaled grace window.
    fn trail_hit(&self, i: usize) -> bool {
        let curve = &self.curves[i];
        let grace = self.config.self_hit_grace / curve.velocity(&self.config);
        self.trail.hitboxes.iter().any(|record| {
            let young_own = record.created_by == curve.id
                && self.elapsed_time - record.created_at <= grace;
            !young_own && curve.collides_with(&record.aabb)
        })
    }

    fn collect_powerups(&mut self, i: usize) {
        let mut j = 0;
        while j < self.powerups.len() {
            if self.curves[i].collides_with(&self.powerups[j].aabb()) {
                let powerup = self.powerups.remove(j);
                self.apply_powerup(i, powerup.kind);
            } else {
                j += 1;
            }
        }
    }

    fn apply_powerup(&mut self, collector: usize, kind: PowerUpKind) {
        tracing::debug!(?kind, player = %self.curves[collector].name, "Power-up collected");
        match kind.scope() {
            Scope::SelfPlayer => {
                if let Some(effect) = kind.effect() {
                    self.curves[collector].add_effect(effect, &self.config);
                }
            },
            Scope::Enemies => {
                let collector_id = self.curves[collector].id;
                if let Some(template) = kind.effect() {
                    for curve in &mut self.curves {
                        if curve.id != collector_id && curve.alive {
                            curve.add_effect(template.clone(), &self.config);
                        }
                    }
                }
            },
            Scope::Global => match kind {
                PowerUpKind::Clear => self.trail.clear(),
                PowerUpKind::PortalBorders => {
                    self.portal_borders = true;
                    self.portal_timer.set(kind.duration());
                },
                _ => {},
            },
        }
    }

    /// Kill bookkeeping: a no-op for invincible curves; an actual
    /// death pays one point to every survivor and may end the round.
    fn kill_curve(&mut self, i: usize) {
        {
            let curve = &mut self.curves[i];
            if !curve.alive || curve.is_invincible() {
                return;
            }
            curve.alive = false;
            tracing::debug!(player = %curve.name, "Curve died");
        }

        for survivor in &mut self.curves {
            if survivor.alive {
                survivor.score += 1;
            }
        }

        let alive = self.alive_count();
        let finished = if self.curves.len() > 1 {
            alive <= 1
        } else {
            alive == 0
        };
        if finished {
            let winner = self.curves.iter().find(|c| c.alive).map(|c| c.id);
            self.phase = RoundPhase::Ended { winner };
            tracing::debug!(?winner, "Round ended");
        }
    }

    /// Snapshot of everything the presentation layer draws this
    /// frame. Pure data, no drawing.
    pub fn render_frame(&self) -> RenderFrame<'_> {
        let message = match &self.phase {
            RoundPhase::Countdown { display } => Some(display.to_string()),
            RoundPhase::Ended { winner } => Some(match winner {
                Some(id) => {
                    let name = self
                        .curves
                        .iter()
                        .find(|c| c.id == *id)
                        .map(|c| c.name.as_str())
                        .unwrap_or("Unknown");
                    format!("{name} is the winner!")
                },
                None => "Everyone died".to_string(),
            }),
            RoundPhase::Idle | RoundPhase::Active => None,
        };

        RenderFrame {
            border: BorderFrame {
                width: self.config.width,
                height: self.config.height,
                border_width: self.config.border_width,
                portal_active: self.portal_borders,
            },
            curves: self.curves.iter().map(CurveSprite::for_curve).collect(),
            segments: &self.trail.segments,
            hitboxes: self
                .config
                .debug_hitboxes
                .then_some(self.trail.hitboxes.as_slice()),
            powerups: &self.powerups,
            message,
            paused: self.paused,
        }
    }
}
