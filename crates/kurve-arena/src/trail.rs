use serde::{Deserialize, Serialize};

use kurve_core::player::{PlayerColor, PlayerId};

use crate::collision::Aabb;

/// A timestamped, owner-tagged rectangle marking where a player has
/// already been. Collision against these is lethal outside the
/// owner's grace window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitboxRecord {
    pub aabb: Aabb,
    /// Elapsed simulation time at creation.
    pub created_at: f32,
    pub created_by: PlayerId,
}

/// A drawn trail piece for the presentation layer. Carries no
/// collision semantics; the hitbox records do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: PlayerColor,
}

/// Append-only per-round store of trail state. Emptied wholesale on
/// round reset or by a global clear power-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailStore {
    pub hitboxes: Vec<HitboxRecord>,
    pub segments: Vec<TrailSegment>,
}

impl TrailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_hitbox(&mut self, record: HitboxRecord) {
        self.hitboxes.push(record);
    }

    pub fn push_segment(&mut self, segment: TrailSegment) {
        self.segments.push(segment);
    }

    pub fn clear(&mut self) {
        self.hitboxes.clear();
        self.segments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_empties_both_sequences() {
        let mut store = TrailStore::new();
        store.push_hitbox(HitboxRecord {
            aabb: Aabb::centered(10.0, 10.0, 4.0),
            created_at: 1.0,
            created_by: 1,
        });
        store.push_segment(TrailSegment {
            x1: 0.0,
            y1: 0.0,
            x2: 3.0,
            y2: 0.0,
            width: 8.0,
            color: PlayerColor::Red,
        });

        store.clear();
        assert!(store.hitboxes.is_empty());
        assert!(store.segments.is_empty());
    }

    #[test]
    fn hitboxes_append_in_order() {
        let mut store = TrailStore::new();
        for t in 0..3 {
            store.push_hitbox(HitboxRecord {
                aabb: Aabb::centered(t as f32, 0.0, 4.0),
                created_at: t as f32,
                created_by: 1,
            });
        }
        let times: Vec<f32> = store.hitboxes.iter().map(|h| h.created_at).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }
}
