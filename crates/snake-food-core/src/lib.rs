//! Food spawning for a grid-based multi-snake training board.
//!
//! [`FoodField`] owns the food layer and applies the Battlesnake engine's
//! end-of-turn spawn rules; board geometry and random cell sampling live in
//! [`grid`] and [`sampler`].

pub mod chance;
pub mod config;
pub mod food;
pub mod forced;
pub mod grid;
pub mod sampler;

pub use config::{FoodConfig, FoodConfigError};
pub use food::{FoodField, FoodStats, SpawnError, SpawnTrigger, TurnOutcome};
pub use forced::{ForcedSpawns, Placement};
pub use grid::{occupied_coordinates, BoardSize, Coord, OccupancyGrid, OutOfBounds};
pub use sampler::{CoordinateSampler, InsufficientFreeCells, UniformSampler};
