use crate::grid::Coord;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Caller-seeded spawn locations, consumed front to back before any random
/// placement. Coordinates are trusted: no collision check is made on use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedSpawns {
    queue: VecDeque<Coord>,
}

impl ForcedSpawns {
    pub fn new<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self {
            queue: coords.into_iter().collect(),
        }
    }

    pub fn pop_front(&mut self) -> Option<Coord> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<Coord> {
        self.queue.front().copied()
    }

    pub fn extend<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Coord>,
    {
        self.queue.extend(coords);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.queue.iter().copied()
    }
}

impl FromIterator<Coord> for ForcedSpawns {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Where a spawned food item came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Forced(Coord),
    Random(Coord),
}

impl Placement {
    pub fn coord(&self) -> Coord {
        match self {
            Placement::Forced(c) | Placement::Random(c) => *c,
        }
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, Placement::Forced(_))
    }
}
