use std::f32::consts::FRAC_PI_2;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use kurve_core::cooldown::Cooldown;
use kurve_core::player::{Player, PlayerColor, PlayerId};

use crate::CurveInput;
use crate::collision::Aabb;
use crate::config::ArenaConfig;
use crate::effect::{Effect, combine_multipliers};
use crate::trail::{HitboxRecord, TrailSegment, TrailStore};

/// Emission cooldown armed when a gap is rolled. Long enough to
/// suppress the current frame's hitbox; replaced by the real gap
/// cooldown on the next frame.
const GAP_ARM_COOLDOWN: f32 = 10.0;

/// A steered kinematic body: position, heading, trail cooldowns and
/// the timed effects currently modifying it. Built fresh for every
/// round from a roster [`Player`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub x: f32,
    pub y: f32,
    /// Heading in radians.
    pub direction: f32,
    pub alive: bool,
    pub score: i32,
    pub base_velocity: f32,
    pub base_radius: f32,
    /// Ended effects stay here with `timed_out` set; they are
    /// filtered, never removed.
    pub effects: Vec<Effect>,
    pub frame_count: u64,
    /// Painting is on whenever this is at zero.
    pub painting_cooldown: Cooldown,
    /// Hitbox emission is gated on this being zero.
    pub hitbox_cooldown: Cooldown,
    /// Frame index at which a rolled gap takes effect.
    pub pending_gap_frame: Option<u64>,
    /// Radians per frame for continuous turning. Fixed from the
    /// velocity at spawn; deliberately not rescaled when effects
    /// change velocity later.
    pub turn_velocity: f32,
}

impl Curve {
    pub fn spawn(profile: &Player, x: f32, y: f32, direction: f32, config: &ArenaConfig) -> Self {
        Self {
            id: profile.id,
            name: profile.display_name.clone(),
            color: profile.color,
            x,
            y,
            direction,
            alive: true,
            score: 0,
            base_velocity: config.base_velocity,
            base_radius: config.base_radius,
            effects: Vec::new(),
            frame_count: 0,
            painting_cooldown: Cooldown::ready(),
            hitbox_cooldown: Cooldown::ready(),
            pending_gap_frame: None,
            turn_velocity: config.base_velocity / config.turn_divisor,
        }
    }

    pub fn active_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(|e| !e.timed_out)
    }

    /// Units per frame, base times all active multipliers, clamped to
    /// a strictly positive floor.
    pub fn velocity(&self, config: &ArenaConfig) -> f32 {
        combine_multipliers(
            self.base_velocity,
            self.active_effects().map(|e| e.velocity_multiplier),
        )
        .max(config.min_velocity)
    }

    pub fn radius(&self) -> f32 {
        combine_multipliers(
            self.base_radius,
            self.active_effects().map(|e| e.thickness_multiplier),
        )
    }

    /// Side length of the head's collision square: the diagonal of
    /// the circle's inscribed square, so the box still covers the
    /// rotated-square visual under the square capability.
    pub fn hit_box_size(&self) -> f32 {
        std::f32::consts::SQRT_2 * self.radius()
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::centered(self.x, self.y, self.hit_box_size())
    }

    pub fn is_painting(&self) -> bool {
        self.painting_cooldown.is_ready()
    }

    /// Hitboxes are emitted every `ceil(frequency / velocity)` frames
    /// so faster curves lay spatially denser records.
    pub fn is_making_hitboxes(&self, config: &ArenaConfig) -> bool {
        let cadence = (config.hitbox_frequency / self.velocity(config)).ceil().max(1.0) as u64;
        self.hitbox_cooldown.is_ready() && self.frame_count % cadence == 0
    }

    /// A curve in a non-painting gap is always immune.
    pub fn is_invincible(&self) -> bool {
        !self.is_painting() || self.active_effects().any(|e| e.invincibility)
    }

    pub fn can_teleport_through_borders(&self) -> bool {
        self.active_effects().any(|e| e.teleport_through_borders)
    }

    pub fn has_inverted_controls(&self) -> bool {
        self.active_effects().any(|e| e.inverted_controls)
    }

    pub fn turns_square(&self) -> bool {
        self.active_effects().any(|e| e.square)
    }

    /// Lethal unless invincible.
    pub fn die(&mut self) {
        if self.is_invincible() {
            return;
        }
        self.alive = false;
    }

    /// Attach an effect. Duplicates are allowed and stack. Granting
    /// invincibility pauses painting and emission for the grace
    /// period so the pickup cannot kill or immediately re-anchor a
    /// trail mid-grant.
    pub fn add_effect(&mut self, effect: Effect, config: &ArenaConfig) {
        if effect.invincibility {
            self.painting_cooldown.set(config.invincibility_grace);
            self.hitbox_cooldown.set(config.invincibility_grace);
        }
        self.effects.push(effect);
    }

    /// Axis-aligned overlap test against another box. No rotation is
    /// modeled for any capability state.
    pub fn collides_with(&self, other: &Aabb) -> bool {
        self.hitbox().intersects(other)
    }

    /// Advance one simulation frame. No-op while dead.
    pub fn update(
        &mut self,
        dt: f32,
        elapsed: f32,
        input: CurveInput,
        trail: &mut TrailStore,
        rng: &mut StdRng,
        config: &ArenaConfig,
    ) {
        if !self.alive {
            return;
        }

        // Roll for a trail gap. Arming the emission cooldown now
        // skips this frame's hitbox; the gap itself lands next frame.
        if self.is_painting()
            && self.is_making_hitboxes(config)
            && rng.random::<f32>() < config.gap_chance
        {
            self.pending_gap_frame = Some(self.frame_count + 1);
            self.hitbox_cooldown.set(GAP_ARM_COOLDOWN);
        }

        // Apply a gap scheduled on the previous frame. Gap length
        // scales with thickness so wide trails get visibly open holes.
        if self.pending_gap_frame == Some(self.frame_count) {
            let gap = config.gap_length_factor * self.radius();
            self.painting_cooldown.set(gap);
            self.hitbox_cooldown.set(gap);
            self.pending_gap_frame = None;
        }

        let painting = self.is_painting();
        let (start_x, start_y) = (self.x, self.y);

        self.turn(input);
        self.advance(config);

        if painting {
            trail.push_segment(TrailSegment {
                x1: start_x,
                y1: start_y,
                x2: self.x,
                y2: self.y,
                width: self.radius() * 2.0,
                color: self.color,
            });
        }

        if self.is_making_hitboxes(config) {
            trail.push_hitbox(HitboxRecord {
                aabb: Aabb::centered(
                    self.x,
                    self.y,
                    config.hitbox_shrink_factor * self.hit_box_size(),
                ),
                created_at: elapsed,
                created_by: self.id,
            });
        }

        self.painting_cooldown.tick(dt);
        self.hitbox_cooldown.tick(dt);
        for effect in &mut self.effects {
            effect.tick(dt);
        }
        self.frame_count += 1;
    }

    /// Steer for one frame. Square mode snaps a quarter turn per
    /// edge-triggered press; otherwise held keys turn continuously.
    /// Inverted controls swap the signals first; left wins when both
    /// fire.
    fn turn(&mut self, input: CurveInput) {
        let (mut left, mut right) = if self.turns_square() {
            (input.left_pressed, input.right_pressed)
        } else {
            (input.left_held, input.right_held)
        };

        if self.has_inverted_controls() {
            std::mem::swap(&mut left, &mut right);
        }

        let delta = if self.turns_square() {
            FRAC_PI_2
        } else {
            self.turn_velocity
        };

        if left {
            self.direction -= delta;
        } else if right {
            self.direction += delta;
        }
    }

    /// Constant-speed Euler step, one frame, no sub-stepping.
    fn advance(&mut self, config: &ArenaConfig) {
        let v = self.velocity(config);
        self.x += v * self.direction.cos();
        self.y += v * self.direction.sin();
    }
}
