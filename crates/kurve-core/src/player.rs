use serde::{Deserialize, Serialize};

/// Unique identifier for a player in the session.
pub type PlayerId = u64;

/// A configured player profile: who is at the keyboard, not the
/// kinematic body steered during a round (the arena owns that).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub color: PlayerColor,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            color,
        }
    }
}

/// Trail color selection. One per player, doubles as the visual
/// owner tag on trail segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
}

impl Default for PlayerColor {
    fn default() -> Self {
        PlayerColor::Red
    }
}

impl PlayerColor {
    /// Selection order offered to players.
    pub const PALETTE: [PlayerColor; 6] = [
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Blue,
        PlayerColor::Yellow,
        PlayerColor::Orange,
        PlayerColor::Purple,
    ];

    /// sRGB triple for the presentation layer.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PlayerColor::Red => (224, 49, 49),
            PlayerColor::Green => (47, 158, 68),
            PlayerColor::Blue => (25, 113, 194),
            PlayerColor::Yellow => (241, 224, 90),
            PlayerColor::Orange => (232, 129, 26),
            PlayerColor::Purple => (156, 54, 181),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        for (i, a) in PlayerColor::PALETTE.iter().enumerate() {
            for b in &PlayerColor::PALETTE[i + 1..] {
                assert_ne!(a, b);
                assert_ne!(a.rgb(), b.rgb());
            }
        }
    }
}
