use crate::chance::DEFAULT_SPAWN_PERIOD;
use crate::grid::BoardSize;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Idle turns before food spawns unconditionally. `<= 0` switches to
    /// replenish-only mode (one new food per food eaten).
    pub spawn_period: i32,
    pub seed: u64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            board_width: 11,
            board_height: 11,
            spawn_period: DEFAULT_SPAWN_PERIOD,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodConfigError {
    UndefinedSpawnCurve,
    BoardTooLarge { width: usize, height: usize },
}

impl fmt::Display for FoodConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodConfigError::UndefinedSpawnCurve => write!(
                f,
                "spawn_period must not be 1: the spawn-chance curve is undefined there"
            ),
            FoodConfigError::BoardTooLarge { width, height } => {
                write!(f, "board {width}x{height} has more cells than fit in usize")
            }
        }
    }
}

impl Error for FoodConfigError {}

impl FoodConfig {
    pub fn board_size(&self) -> BoardSize {
        BoardSize::new(self.board_width, self.board_height)
    }

    pub fn validate(&self) -> Result<(), FoodConfigError> {
        if self.spawn_period == 1 {
            return Err(FoodConfigError::UndefinedSpawnCurve);
        }
        if self.board_width.checked_mul(self.board_height).is_none() {
            return Err(FoodConfigError::BoardTooLarge {
                width: self.board_width,
                height: self.board_height,
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_reference_board() {
        let cfg = FoodConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.board_size(), BoardSize::new(11, 11));
        assert_eq!(cfg.spawn_period, 9);
    }

    #[test]
    fn period_one_is_rejected() {
        let cfg = FoodConfig {
            spawn_period: 1,
            ..FoodConfig::default()
        };
        assert_eq!(cfg.validate(), Err(FoodConfigError::UndefinedSpawnCurve));
    }

    #[test]
    fn replenish_mode_and_empty_board_are_accepted() {
        let cfg = FoodConfig {
            board_width: 0,
            board_height: 0,
            spawn_period: 0,
            ..FoodConfig::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn overflowing_board_is_rejected() {
        let cfg = FoodConfig {
            board_width: usize::MAX,
            board_height: 2,
            ..FoodConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(FoodConfigError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn json_fills_missing_fields_from_default() {
        let cfg = FoodConfig::from_json(r#"{"board_width": 7, "seed": 5}"#).unwrap();
        assert_eq!(cfg.board_width, 7);
        assert_eq!(cfg.board_height, 11);
        assert_eq!(cfg.spawn_period, 9);
        assert_eq!(cfg.seed, 5);
    }
}
