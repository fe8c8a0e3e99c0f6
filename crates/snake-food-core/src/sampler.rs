use crate::grid::{BoardSize, Coord};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;
use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientFreeCells {
    pub requested: usize,
    pub available: usize,
}

impl fmt::Display for InsufficientFreeCells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requested {} free cells but only {} available",
            self.requested, self.available
        )
    }
}

impl Error for InsufficientFreeCells {}

/// Source of random free board cells used when no forced spawn is queued.
pub trait CoordinateSampler {
    fn sample_free<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: BoardSize,
        count: usize,
        excluding: &HashSet<Coord>,
    ) -> Result<Vec<Coord>, InsufficientFreeCells>;
}

/// Picks `count` distinct cells uniformly among those not in `excluding`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformSampler;

impl CoordinateSampler for UniformSampler {
    fn sample_free<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: BoardSize,
        count: usize,
        excluding: &HashSet<Coord>,
    ) -> Result<Vec<Coord>, InsufficientFreeCells> {
        let free: Vec<Coord> = (0..board.width)
            .flat_map(|x| (0..board.height).map(move |y| Coord::new(x, y)))
            .filter(|c| !excluding.contains(c))
            .collect();
        if free.len() < count {
            return Err(InsufficientFreeCells {
                requested: count,
                available: free.len(),
            });
        }
        Ok(index::sample(rng, free.len(), count)
            .into_iter()
            .map(|i| free[i])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn never_returns_excluded_cells() {
        let board = BoardSize::new(3, 3);
        let excluding: HashSet<Coord> = (0..3)
            .flat_map(|x| (0..3).map(move |y| Coord::new(x, y)))
            .filter(|c| *c != Coord::new(2, 1))
            .collect();
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = UniformSampler
                .sample_free(&mut rng, board, 1, &excluding)
                .unwrap();
            assert_eq!(picked, vec![Coord::new(2, 1)]);
        }
    }

    #[test]
    fn returns_distinct_in_bounds_cells() {
        let board = BoardSize::new(4, 5);
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let picked = UniformSampler
            .sample_free(&mut rng, board, 20, &HashSet::new())
            .unwrap();
        let unique: HashSet<Coord> = picked.iter().copied().collect();
        assert_eq!(unique.len(), 20);
        assert!(picked.iter().all(|c| board.contains(*c)));
    }

    #[test]
    fn fails_when_board_is_full() {
        let board = BoardSize::new(1, 2);
        let excluding: HashSet<Coord> = [Coord::new(0, 0)].into_iter().collect();
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let err = UniformSampler
            .sample_free(&mut rng, board, 2, &excluding)
            .unwrap_err();
        assert_eq!(
            err,
            InsufficientFreeCells {
                requested: 2,
                available: 1
            }
        );
    }

    #[test]
    fn same_seed_same_cells() {
        let board = BoardSize::new(11, 11);
        let mut a = ChaCha12Rng::seed_from_u64(42);
        let mut b = ChaCha12Rng::seed_from_u64(42);
        let pa = UniformSampler.sample_free(&mut a, board, 3, &HashSet::new());
        let pb = UniformSampler.sample_free(&mut b, board, 3, &HashSet::new());
        assert_eq!(pa, pb);
    }
}
