use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::collision::Aabb;
use crate::config::ArenaConfig;
use crate::effect::Effect;

/// Pickup radius used for power-up collision boxes.
pub const PICKUP_SIZE: f32 = 16.0;

/// Who a collected power-up acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// The colliding player only.
    SelfPlayer,
    /// Every other living player.
    Enemies,
    /// The whole arena.
    Global,
}

/// The closed set of power-up kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    SlowEnemies,
    Shrink,
    ThickenEnemies,
    Invincibility,
    InvertEnemies,
    SquareTurns,
    PortalSelf,
    Clear,
    PortalBorders,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 10] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowEnemies,
        PowerUpKind::Shrink,
        PowerUpKind::ThickenEnemies,
        PowerUpKind::Invincibility,
        PowerUpKind::InvertEnemies,
        PowerUpKind::SquareTurns,
        PowerUpKind::PortalSelf,
        PowerUpKind::Clear,
        PowerUpKind::PortalBorders,
    ];

    pub fn scope(&self) -> Scope {
        match self {
            PowerUpKind::SpeedBoost
            | PowerUpKind::Shrink
            | PowerUpKind::Invincibility
            | PowerUpKind::SquareTurns
            | PowerUpKind::PortalSelf => Scope::SelfPlayer,
            PowerUpKind::SlowEnemies
            | PowerUpKind::ThickenEnemies
            | PowerUpKind::InvertEnemies => Scope::Enemies,
            PowerUpKind::Clear | PowerUpKind::PortalBorders => Scope::Global,
        }
    }

    /// Lifetime of the granted effect, or of the global condition.
    /// `Clear` is instantaneous.
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::SpeedBoost | PowerUpKind::SlowEnemies => 4.0,
            PowerUpKind::Shrink | PowerUpKind::ThickenEnemies => 6.0,
            PowerUpKind::Invincibility => 3.0,
            PowerUpKind::InvertEnemies => 5.0,
            PowerUpKind::SquareTurns => 5.0,
            PowerUpKind::PortalSelf => 5.0,
            PowerUpKind::Clear => 0.0,
            PowerUpKind::PortalBorders => 10.0,
        }
    }

    /// Effect template applied to players. Global kinds act on the
    /// arena instead and carry no template.
    pub fn effect(&self) -> Option<Effect> {
        let mut e = Effect::timed(self.duration());
        match self {
            PowerUpKind::SpeedBoost => e.velocity_multiplier = 2.0,
            PowerUpKind::SlowEnemies => e.velocity_multiplier = 0.5,
            PowerUpKind::Shrink => e.thickness_multiplier = 0.5,
            PowerUpKind::ThickenEnemies => e.thickness_multiplier = 2.0,
            PowerUpKind::Invincibility => e.invincibility = true,
            PowerUpKind::InvertEnemies => e.inverted_controls = true,
            PowerUpKind::SquareTurns => e.square = true,
            PowerUpKind::PortalSelf => e.teleport_through_borders = true,
            PowerUpKind::Clear | PowerUpKind::PortalBorders => return None,
        }
        Some(e)
    }
}

/// A live pickup on the arena floor. Destroyed on pickup or round
/// reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnedPowerUp {
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
}

impl SpawnedPowerUp {
    /// Spawn a random kind at a random spot inside the playfield,
    /// inset so the pickup box never overlaps the border.
    pub fn spawn_random(rng: &mut StdRng, config: &ArenaConfig) -> Self {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let inset = config.border_width + PICKUP_SIZE / 2.0;
        Self {
            kind,
            x: rng.random_range(inset..config.width - inset),
            y: rng.random_range(inset..config.height - inset),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.x, self.y, PICKUP_SIZE)
    }
}
