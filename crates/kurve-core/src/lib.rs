pub mod cooldown;
pub mod player;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::player::{Player, PlayerColor, PlayerId};

    /// Create `n` test players with sequential IDs starting at 1 and
    /// distinct palette colors.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player {
                id: i as PlayerId + 1,
                display_name: format!("Player{}", i + 1),
                color: PlayerColor::PALETTE[i % PlayerColor::PALETTE.len()],
            })
            .collect()
    }
}
