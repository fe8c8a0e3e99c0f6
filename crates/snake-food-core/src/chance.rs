//! Food spawn-chance curve of the Battlesnake engine (`rules/tick.go`).
//!
//! The uniform draw is taken in `[0, CHANCE_SCALE)` and food spawns when the draw
//! is `<=` the curve value for the current number of idle turns.

/// Turns without food after which spawning becomes unconditional.
pub const DEFAULT_SPAWN_PERIOD: i32 = 9;

/// Upper bound (exclusive) of the per-turn uniform draw.
pub const CHANCE_SCALE: f64 = 1000.0;

/// Curve value for `turns_since_last_spawn` idle turns.
///
/// `x = (1000 / 0.5) ^ (1 / (period - 1))`, `chance = 0.5 * (1 - x^y / (1 - x))`.
/// Not defined for `spawn_period == 1`; callers gate that out (see `FoodConfig::validate`).
pub fn spawn_chance(spawn_period: i32, turns_since_last_spawn: u32) -> f64 {
    debug_assert!(spawn_period != 1, "spawn-chance curve undefined for period 1");
    let x = (CHANCE_SCALE / 0.5).powf(1.0 / f64::from(spawn_period - 1));
    let y = f64::from(turns_since_last_spawn);
    0.5 * (1.0 - x.powf(y) / (1.0 - x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_strictly_increasing() {
        let mut prev = f64::NEG_INFINITY;
        for y in 0..DEFAULT_SPAWN_PERIOD as u32 {
            let c = spawn_chance(DEFAULT_SPAWN_PERIOD, y);
            assert!(c > prev, "chance({y}) = {c} not above {prev}");
            prev = c;
        }
    }

    #[test]
    fn curve_stays_below_certainty_before_period() {
        let last = spawn_chance(DEFAULT_SPAWN_PERIOD, DEFAULT_SPAWN_PERIOD as u32 - 1);
        assert!(last < CHANCE_SCALE);
        let second_last = spawn_chance(DEFAULT_SPAWN_PERIOD, DEFAULT_SPAWN_PERIOD as u32 - 2);
        assert!(second_last < 500.0);
    }

    #[test]
    fn curve_matches_reference_values() {
        // y = 0 gives 0.5 * (1 + 1 / (x - 1)) with x = 2000^(1/8).
        let x = 2000f64.powf(1.0 / 8.0);
        let expected = 0.5 * (1.0 + 1.0 / (x - 1.0));
        assert!((spawn_chance(9, 0) - expected).abs() < 1e-9);
        assert!((spawn_chance(9, 0) - 0.8153).abs() < 1e-3);
        // x^8 == 2000 exactly at the last idle turn.
        let expected_last = 0.5 * (1.0 + 2000.0 / (x - 1.0));
        assert!((spawn_chance(9, 8) - expected_last).abs() < 1e-6);
    }

    #[test]
    fn shorter_period_rises_faster() {
        assert!(spawn_chance(3, 2) > spawn_chance(9, 2));
    }
}
