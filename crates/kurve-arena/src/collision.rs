use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. The only collision primitive in the
/// simulation: heads, trail records, power-ups, and border edges are
/// all tested as AABBs, even when a square capability changes the
/// drawn shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Box of `size x size` centered on (x, y).
    pub fn centered(x: f32, y: f32, size: f32) -> Self {
        let half = size / 2.0;
        Self {
            min_x: x - half,
            max_x: x + half,
            min_y: y - half,
            max_y: y + half,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

/// Which inner-arena edge an AABB has crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Classify a border crossing. At most one edge is reported per
/// frame, left/right taking precedence over top/bottom.
pub fn border_crossing(
    aabb: &Aabb,
    width: f32,
    height: f32,
    border_width: f32,
) -> Option<BorderEdge> {
    if aabb.min_x < border_width {
        Some(BorderEdge::Left)
    } else if aabb.max_x > width - border_width {
        Some(BorderEdge::Right)
    } else if aabb.min_y < border_width {
        Some(BorderEdge::Top)
    } else if aabb.max_y > height - border_width {
        Some(BorderEdge::Bottom)
    } else {
        None
    }
}
