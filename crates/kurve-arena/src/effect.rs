use serde::{Deserialize, Serialize};

/// A timed modifier attached to a player by a power-up.
///
/// Capabilities are a closed set of orthogonal flags rather than a
/// kind hierarchy: multipliers combine multiplicatively across active
/// effects, booleans OR-reduce. Ended effects stay in the owner's
/// list with `timed_out` set and are filtered out, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub velocity_multiplier: f32,
    pub thickness_multiplier: f32,
    pub invincibility: bool,
    pub teleport_through_borders: bool,
    pub inverted_controls: bool,
    pub square: bool,
    /// Total lifetime in simulated seconds.
    pub duration: f32,
    /// Simulated seconds left. Ages only while the owner is alive.
    pub remaining: f32,
    pub timed_out: bool,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            velocity_multiplier: 1.0,
            thickness_multiplier: 1.0,
            invincibility: false,
            teleport_through_borders: false,
            inverted_controls: false,
            square: false,
            duration: 0.0,
            remaining: 0.0,
            timed_out: false,
        }
    }
}

impl Effect {
    /// A neutral effect lasting `duration` simulated seconds.
    pub fn timed(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration,
            ..Self::default()
        }
    }

    /// Age the effect by `dt` simulated seconds, flipping `timed_out`
    /// once the full duration has passed.
    pub fn tick(&mut self, dt: f32) {
        if self.timed_out {
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining <= 0.0 {
            self.timed_out = true;
        }
    }
}

/// Fold effect multipliers over a base value. An empty list leaves
/// the base unchanged; two 0.5x effects yield 0.25x.
pub fn combine_multipliers(base: f32, multipliers: impl IntoIterator<Item = f32>) -> f32 {
    multipliers.into_iter().fold(base, |acc, m| acc * m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_empty_is_identity() {
        assert_eq!(combine_multipliers(3.0, []), 3.0);
    }

    #[test]
    fn combine_is_multiplicative() {
        assert_eq!(combine_multipliers(4.0, [2.0, 0.5]), 4.0);
        assert_eq!(combine_multipliers(4.0, [0.5, 0.5]), 1.0);
    }

    #[test]
    fn effect_times_out_after_duration() {
        let mut e = Effect::timed(2.0);
        e.tick(1.0);
        assert!(!e.timed_out);
        e.tick(1.0);
        assert!(e.timed_out);
    }

    #[test]
    fn ended_effect_stays_ended() {
        let mut e = Effect::timed(0.5);
        e.tick(10.0);
        assert!(e.timed_out);
        e.tick(1.0);
        assert!(e.timed_out);
        assert_eq!(e.remaining, 0.0);
    }
}
