use super::{FoodField, SpawnError};
use crate::chance::{spawn_chance, CHANCE_SCALE};
use crate::forced::Placement;
use crate::grid::{occupied_coordinates, Coord, OccupancyGrid};
use crate::sampler::{CoordinateSampler, InsufficientFreeCells};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which rule decided the number of food items for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnTrigger {
    /// `spawn_period <= 0`: replace eaten food one for one.
    Replenish,
    /// Idle for a full period: spawn without drawing.
    Overdue,
    /// The uniform draw fell under the spawn-chance curve.
    Chance,
    /// The draw missed; nothing spawns.
    Idle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub trigger: SpawnTrigger,
    pub requested: usize,
    pub placements: Vec<Placement>,
    /// Uniform draw in `[0, 1000)`, only taken on the probabilistic path.
    pub draw: Option<f64>,
    pub chance: Option<f64>,
    pub turns_since_last_spawn: u32,
}

impl TurnOutcome {
    pub fn spawned(&self) -> usize {
        self.placements.len()
    }
}

impl<R: RngCore, S: CoordinateSampler> FoodField<R, S> {
    /// Place a single food item: the next forced coordinate if one is queued,
    /// otherwise a random cell not covered by `others`.
    pub fn spawn_one_round(&mut self, others: &OccupancyGrid) -> Result<Placement, SpawnError> {
        let excluding = occupied_coordinates(others);
        self.place_one(&excluding)
    }

    fn place_one(&mut self, excluding: &HashSet<Coord>) -> Result<Placement, SpawnError> {
        let placement = match self.forced.pop_front() {
            Some(coord) => Placement::Forced(coord),
            None => {
                let coord = self
                    .sampler
                    .sample_free(&mut self.rng, self.board, 1, excluding)?
                    .into_iter()
                    .next()
                    .ok_or(InsufficientFreeCells {
                        requested: 1,
                        available: 0,
                    })?;
                Placement::Random(coord)
            }
        };
        // Forced coordinates overwrite whatever is there without a collision check.
        self.food.set(placement.coord(), true)?;
        self.stats.record_placement(&placement);
        tracing::debug!(?placement, "food placed");
        Ok(placement)
    }

    /// Run the end-of-turn spawn rules once. Call after this turn's
    /// `remove_food` events, with the board's snake occupancy.
    pub fn advance_turn(
        &mut self,
        others: &OccupancyGrid,
        food_eaten: usize,
        living: usize,
    ) -> Result<TurnOutcome, SpawnError> {
        let mut draw = None;
        let mut chance = None;
        let (trigger, requested) = if self.spawn_period <= 0 {
            (SpawnTrigger::Replenish, food_eaten)
        } else if i64::from(self.turns_since_last_spawn) >= i64::from(self.spawn_period) {
            (SpawnTrigger::Overdue, living.div_ceil(2))
        } else {
            let d = self.rng.random::<f64>() * CHANCE_SCALE;
            let c = spawn_chance(self.spawn_period, self.turns_since_last_spawn);
            draw = Some(d);
            chance = Some(c);
            if d <= c {
                // The counter resets as soon as the draw hits, before placement.
                self.turns_since_last_spawn = 0;
                (SpawnTrigger::Chance, living.div_ceil(2))
            } else {
                (SpawnTrigger::Idle, 0)
            }
        };
        tracing::debug!(
            ?trigger,
            requested,
            turns_since_last_spawn = self.turns_since_last_spawn,
            "food spawn decision"
        );

        let mut placements = Vec::with_capacity(requested);
        if requested > 0 {
            let excluding = occupied_coordinates(others);
            for _ in 0..requested {
                placements.push(self.place_one(&excluding)?);
            }
            self.turns_since_last_spawn = 0;
        } else {
            self.turns_since_last_spawn = self.turns_since_last_spawn.saturating_add(1);
            tracing::trace!(
                turns_since_last_spawn = self.turns_since_last_spawn,
                "no food this turn"
            );
        }
        self.stats.record_turn(trigger, requested);

        Ok(TurnOutcome {
            trigger,
            requested,
            placements,
            draw,
            chance,
            turns_since_last_spawn: self.turns_since_last_spawn,
        })
    }
}
