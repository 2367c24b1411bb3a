use serde::{Deserialize, Serialize};

use kurve_core::player::PlayerColor;

use crate::player::Curve;
use crate::powerup::SpawnedPowerUp;
use crate::trail::{HitboxRecord, TrailSegment};

/// Drawn head shape. Collision stays axis-aligned either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadShape {
    Circle,
    Square,
}

/// Per-curve drawing instructions for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSprite {
    pub x: f32,
    pub y: f32,
    pub direction: f32,
    pub radius: f32,
    pub shape: HeadShape,
    pub color: PlayerColor,
    /// Heads fade while able to pass through borders.
    pub alpha: f32,
    pub inverted_controls: bool,
    pub alive: bool,
}

impl CurveSprite {
    pub fn for_curve(curve: &Curve) -> Self {
        Self {
            x: curve.x,
            y: curve.y,
            direction: curve.direction,
            radius: curve.radius(),
            shape: if curve.turns_square() {
                HeadShape::Square
            } else {
                HeadShape::Circle
            },
            color: curve.color,
            alpha: if curve.can_teleport_through_borders() {
                0.2
            } else {
                1.0
            },
            inverted_controls: curve.has_inverted_controls(),
            alive: curve.alive,
        }
    }
}

/// The border frame: a full-arena rectangle with an inner cutout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BorderFrame {
    pub width: f32,
    pub height: f32,
    pub border_width: f32,
    /// The presentation layer animates border alpha while true.
    pub portal_active: bool,
}

/// Everything a presentation collaborator needs to draw one frame.
/// Pure data; the engine performs no drawing.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub border: BorderFrame,
    pub curves: Vec<CurveSprite>,
    pub segments: &'a [TrailSegment],
    /// Present only when the debug toggle is on.
    pub hitboxes: Option<&'a [HitboxRecord]>,
    pub powerups: &'a [SpawnedPowerUp],
    /// Countdown digit or round-result text; None means hidden.
    pub message: Option<String>,
    pub paused: bool,
}
