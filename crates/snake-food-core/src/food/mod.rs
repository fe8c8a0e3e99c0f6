pub mod metrics;
pub mod turn;

pub use metrics::*;
pub use turn::*;

use crate::chance::DEFAULT_SPAWN_PERIOD;
use crate::config::{FoodConfig, FoodConfigError};
use crate::forced::ForcedSpawns;
use crate::grid::{BoardSize, Coord, OccupancyGrid, OutOfBounds};
use crate::sampler::{CoordinateSampler, InsufficientFreeCells, UniformSampler};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};

/// Seed used by the convenience constructors that take no config.
pub const DEFAULT_SEED: u64 = 0;

/// Food layer of one game board: which cells hold food, the forced-spawn
/// queue, and the idle-turn counter driving the spawn-chance curve.
pub struct FoodField<R = ChaCha12Rng, S = UniformSampler> {
    pub(crate) board: BoardSize,
    pub(crate) food: OccupancyGrid,
    pub(crate) forced: ForcedSpawns,
    pub(crate) turns_since_last_spawn: u32,
    pub(crate) spawn_period: i32,
    pub(crate) rng: R,
    pub(crate) sampler: S,
    pub(crate) stats: FoodStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    OutOfBounds(OutOfBounds),
    InsufficientFreeCells(InsufficientFreeCells),
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::OutOfBounds(e) => write!(f, "cannot place food: {e}"),
            SpawnError::InsufficientFreeCells(e) => write!(f, "cannot place food: {e}"),
        }
    }
}

impl From<OutOfBounds> for SpawnError {
    fn from(err: OutOfBounds) -> Self {
        SpawnError::OutOfBounds(err)
    }
}

impl From<InsufficientFreeCells> for SpawnError {
    fn from(err: InsufficientFreeCells) -> Self {
        SpawnError::InsufficientFreeCells(err)
    }
}

impl Error for SpawnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SpawnError::OutOfBounds(e) => Some(e),
            SpawnError::InsufficientFreeCells(e) => Some(e),
        }
    }
}

impl FoodField {
    /// Empty board with the reference spawn period and default seed.
    pub fn new<I>(board: impl Into<BoardSize>, forced_spawn_locations: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self::with_parts(
            board.into(),
            DEFAULT_SPAWN_PERIOD,
            forced_spawn_locations,
            ChaCha12Rng::seed_from_u64(DEFAULT_SEED),
            UniformSampler,
        )
    }

    pub fn from_coordinates<I>(board: impl Into<BoardSize>, food: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self::try_from_coordinates(board, food).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Board pre-populated with `food`; the forced-spawn queue starts empty.
    pub fn try_from_coordinates<I>(
        board: impl Into<BoardSize>,
        food: I,
    ) -> Result<Self, OutOfBounds>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut field = Self::new(board, []);
        for coord in food {
            field.place_food(coord)?;
        }
        Ok(field)
    }

    pub fn from_config<I>(config: &FoodConfig, forced_spawn_locations: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self::try_from_config(config, forced_spawn_locations)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_from_config<I>(
        config: &FoodConfig,
        forced_spawn_locations: I,
    ) -> Result<Self, FoodConfigError>
    where
        I: IntoIterator<Item = Coord>,
    {
        config.validate()?;
        Ok(Self::with_parts(
            config.board_size(),
            config.spawn_period,
            forced_spawn_locations,
            ChaCha12Rng::seed_from_u64(config.seed),
            UniformSampler,
        ))
    }
}

impl<R: RngCore, S: CoordinateSampler> FoodField<R, S> {
    /// Assemble a field around an injected draw source and sampler.
    pub fn with_parts<I>(
        board: BoardSize,
        spawn_period: i32,
        forced_spawn_locations: I,
        rng: R,
        sampler: S,
    ) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self {
            board,
            food: OccupancyGrid::new(board),
            forced: ForcedSpawns::new(forced_spawn_locations),
            turns_since_last_spawn: 0,
            spawn_period,
            rng,
            sampler,
            stats: FoodStats::default(),
        }
    }

    pub fn board_size(&self) -> BoardSize {
        self.board
    }

    pub fn spawn_period(&self) -> i32 {
        self.spawn_period
    }

    pub fn turns_since_last_spawn(&self) -> u32 {
        self.turns_since_last_spawn
    }

    /// Restore the idle-turn counter, e.g. when rebuilding a field mid-episode.
    pub fn set_turns_since_last_spawn(&mut self, turns: u32) {
        self.turns_since_last_spawn = turns;
    }

    pub fn forced_spawns(&self) -> &ForcedSpawns {
        &self.forced
    }

    pub fn forced_spawns_mut(&mut self) -> &mut ForcedSpawns {
        &mut self.forced
    }

    pub fn stats(&self) -> &FoodStats {
        &self.stats
    }

    pub fn food_map(&self) -> &OccupancyGrid {
        &self.food
    }

    pub fn food_count(&self) -> usize {
        self.food.count()
    }

    pub fn food_coordinates(&self) -> Vec<Coord> {
        self.food.iter_occupied().collect()
    }

    pub fn has_food(&self, coord: Coord) -> bool {
        self.try_has_food(coord)
            .expect("coordinate out of bounds for has_food")
    }

    pub fn try_has_food(&self, coord: Coord) -> Option<bool> {
        self.food.get(coord)
    }

    /// Put food on `coord` directly, bypassing the spawn rules and the queue.
    pub fn place_food(&mut self, coord: Coord) -> Result<(), OutOfBounds> {
        self.food.set(coord, true)
    }

    /// Clear `coord` after a snake ate there. Idempotent on empty cells.
    pub fn remove_food(&mut self, coord: Coord) {
        let had_food = self.has_food(coord);
        self.food
            .set(coord, false)
            .unwrap_or_else(|e| panic!("{e}"));
        if had_food {
            self.stats.food_removed += 1;
        }
    }
}
