use serde::{Deserialize, Serialize};

/// Data-driven configuration for the arena simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width in world units.
    pub width: f32,
    /// Arena height in world units.
    pub height: f32,
    /// Thickness of the lethal border frame.
    pub border_width: f32,
    /// Score threshold consulted by `Arena::match_winner`. Rounds
    /// themselves still end last-player-standing.
    pub points_to_win: i32,
    /// Base forward speed (units per frame).
    pub base_velocity: f32,
    /// Base head radius.
    pub base_radius: f32,
    /// Starting number displayed by the pre-round countdown.
    pub countdown_start: u8,
    /// Seconds per countdown step.
    pub countdown_interval: f32,
    /// Lower bound of the power-up spawn interval (seconds).
    pub powerup_spawn_min: f32,
    /// Upper bound of the power-up spawn interval (seconds).
    pub powerup_spawn_max: f32,
    /// Per-frame probability of starting a trail gap.
    pub gap_chance: f32,
    /// Gap length as painting-cooldown seconds per unit of radius.
    pub gap_length_factor: f32,
    /// Hitbox rectangles cover this fraction of the head hitbox.
    pub hitbox_shrink_factor: f32,
    /// Hitbox emission cadence numerator: emit every
    /// `ceil(hitbox_frequency / velocity)` frames.
    pub hitbox_frequency: f32,
    /// Cooldown applied to painting and emission when an
    /// invincibility effect is granted (seconds).
    pub invincibility_grace: f32,
    /// Self-trail immunity window numerator: a player's own record is
    /// harmless for `self_hit_grace / velocity` seconds.
    pub self_hit_grace: f32,
    /// Continuous turn rate divisor: radians per frame is
    /// `initial velocity / turn_divisor`.
    pub turn_divisor: f32,
    /// Strictly positive velocity floor. Keeps the emission cadence
    /// division well-defined however effects stack.
    pub min_velocity: f32,
    /// Expose hitbox rectangles in render frames.
    pub debug_hitboxes: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            border_width: 5.0,
            points_to_win: 10,
            base_velocity: 3.0,
            base_radius: 4.0,
            countdown_start: 3,
            countdown_interval: 0.3,
            powerup_spawn_min: 5.0,
            powerup_spawn_max: 5.0,
            gap_chance: 0.02,
            gap_length_factor: 0.03,
            hitbox_shrink_factor: 0.8,
            hitbox_frequency: 7.0,
            invincibility_grace: 5.0,
            self_hit_grace: 0.5,
            turn_divisor: 50.0,
            min_velocity: 0.1,
            debug_hitboxes: false,
        }
    }
}

impl ArenaConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("KURVE_CONFIG") {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Self>(&contents) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse {path}: {e}, using defaults"),
                },
                Err(e) => tracing::warn!("Failed to read {path}: {e}, using defaults"),
            }
        }
        if let Ok(contents) = std::fs::read_to_string("config/kurve.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    /// Inner playfield width (between the borders).
    pub fn inner_width(&self) -> f32 {
        self.width - self.border_width * 2.0
    }

    /// Inner playfield height (between the borders).
    pub fn inner_height(&self) -> f32 {
        self.height - self.border_width * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rules() {
        let c = ArenaConfig::default();
        assert_eq!(c.border_width, 5.0);
        assert_eq!(c.points_to_win, 10);
        assert_eq!(c.base_velocity, 3.0);
        assert_eq!(c.base_radius, 4.0);
    }

    #[test]
    fn inner_dimensions_subtract_both_borders() {
        let c = ArenaConfig::default();
        assert_eq!(c.inner_width(), 790.0);
        assert_eq!(c.inner_height(), 590.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: ArenaConfig = toml::from_str("width = 1024.0").unwrap();
        assert_eq!(c.width, 1024.0);
        assert_eq!(c.height, 600.0);
        assert_eq!(c.countdown_start, 3);
    }
}
