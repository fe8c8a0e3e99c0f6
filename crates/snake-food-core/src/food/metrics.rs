use super::{FoodField, SpawnError, SpawnTrigger};
use crate::config::{FoodConfig, FoodConfigError};
use crate::forced::Placement;
use crate::grid::OccupancyGrid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

pub const MAX_SIMULATION_TURNS: usize = 1_000_000;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodStats {
    pub turns: usize,
    /// Turns on which nothing was requested (counter incremented).
    pub idle_turns: usize,
    pub replenish_turns: usize,
    pub overdue_turns: usize,
    pub chance_turns: usize,
    pub total_spawned: usize,
    pub forced_spawned: usize,
    pub random_spawned: usize,
    pub food_removed: usize,
}

impl FoodStats {
    pub(crate) fn record_placement(&mut self, placement: &Placement) {
        self.total_spawned += 1;
        if placement.is_forced() {
            self.forced_spawned += 1;
        } else {
            self.random_spawned += 1;
        }
    }

    pub(crate) fn record_turn(&mut self, trigger: SpawnTrigger, requested: usize) {
        self.turns += 1;
        if requested == 0 {
            self.idle_turns += 1;
        }
        match trigger {
            SpawnTrigger::Replenish => self.replenish_turns += 1,
            SpawnTrigger::Overdue => self.overdue_turns += 1,
            SpawnTrigger::Chance => self.chance_turns += 1,
            SpawnTrigger::Idle => {}
        }
    }

    pub fn spawn_turns(&self) -> usize {
        self.turns - self.idle_turns
    }
}

/// Fixed per-turn inputs for a spawn-rate simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRateScenario {
    pub turns: usize,
    pub living: usize,
    /// Food items eaten per turn (taken from the board when present).
    pub food_eaten: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedRun {
    pub seed: u64,
    pub stats: FoodStats,
    pub final_food_count: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnRateSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub config: FoodConfig,
    pub scenario: SpawnRateScenario,
    pub runs: Vec<SeedRun>,
    pub mean_spawns_per_turn: f64,
    /// `None` when no run ever spawned food.
    pub mean_turns_between_spawns: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentError {
    NoSeeds,
    TooManyTurns { max: usize, actual: usize },
    Config(FoodConfigError),
    Spawn { seed: u64, error: SpawnError },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::NoSeeds => write!(f, "at least one seed is required"),
            ExperimentError::TooManyTurns { max, actual } => {
                write!(f, "turns ({actual}) exceed supported maximum ({max})")
            }
            ExperimentError::Config(e) => write!(f, "{e}"),
            ExperimentError::Spawn { seed, error } => write!(f, "seed {seed}: {error}"),
        }
    }
}

impl From<FoodConfigError> for ExperimentError {
    fn from(err: FoodConfigError) -> Self {
        ExperimentError::Config(err)
    }
}

impl Error for ExperimentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExperimentError::Config(e) => Some(e),
            ExperimentError::Spawn { error, .. } => Some(error),
            _ => None,
        }
    }
}

fn run_seed(
    config: &FoodConfig,
    scenario: SpawnRateScenario,
    seed: u64,
) -> Result<SeedRun, ExperimentError> {
    let config = FoodConfig {
        seed,
        ..config.clone()
    };
    let mut field = FoodField::try_from_config(&config, [])?;
    let snakes = OccupancyGrid::new(config.board_size());
    for _ in 0..scenario.turns {
        let eaten: Vec<_> = field
            .food_coordinates()
            .into_iter()
            .take(scenario.food_eaten)
            .collect();
        for coord in &eaten {
            field.remove_food(*coord);
        }
        field
            .advance_turn(&snakes, eaten.len(), scenario.living)
            .map_err(|error| ExperimentError::Spawn { seed, error })?;
    }
    Ok(SeedRun {
        seed,
        final_food_count: field.food_count(),
        stats: field.stats,
    })
}

/// Run one independent field per seed on a snake-free board and aggregate how
/// often food appears.
pub fn simulate_spawn_rate(
    config: &FoodConfig,
    scenario: SpawnRateScenario,
    seeds: &[u64],
) -> Result<SpawnRateSummary, ExperimentError> {
    if seeds.is_empty() {
        return Err(ExperimentError::NoSeeds);
    }
    if scenario.turns > MAX_SIMULATION_TURNS {
        return Err(ExperimentError::TooManyTurns {
            max: MAX_SIMULATION_TURNS,
            actual: scenario.turns,
        });
    }
    config.validate()?;

    let runs = seeds
        .par_iter()
        .map(|&seed| run_seed(config, scenario, seed))
        .collect::<Result<Vec<_>, _>>()?;

    let total_turns: usize = runs.iter().map(|r| r.stats.turns).sum();
    let total_spawned: usize = runs.iter().map(|r| r.stats.total_spawned).sum();
    let spawn_turns: usize = runs.iter().map(|r| r.stats.spawn_turns()).sum();
    let mean_spawns_per_turn = if total_turns > 0 {
        total_spawned as f64 / total_turns as f64
    } else {
        0.0
    };
    let mean_turns_between_spawns =
        (spawn_turns > 0).then(|| total_turns as f64 / spawn_turns as f64);
    tracing::debug!(
        seeds = seeds.len(),
        total_turns,
        total_spawned,
        "spawn-rate simulation finished"
    );

    Ok(SpawnRateSummary {
        schema_version: 1,
        config: config.clone(),
        scenario,
        runs,
        mean_spawns_per_turn,
        mean_turns_between_spawns,
    })
}
