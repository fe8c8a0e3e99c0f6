use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{error::Error, fmt};

/// A cell on the board. `x` indexes columns (board width), `y` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for (usize, usize) {
    fn from(c: Coord) -> Self {
        (c.x, c.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl BoardSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }
}

impl From<(usize, usize)> for BoardSize {
    fn from((width, height): (usize, usize)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub coord: Coord,
    pub board: BoardSize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coordinate {} is outside the {} board", self.coord, self.board)
    }
}

impl Error for OutOfBounds {}

/// Binary occupancy grid, x-major: cell (x, y) lives at `x * height + y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    board: BoardSize,
    data: Vec<u8>,
}

impl OccupancyGrid {
    pub fn new(board: BoardSize) -> Self {
        Self {
            board,
            data: vec![0; board.cell_count()],
        }
    }

    pub fn from_coordinates<I>(board: BoardSize, coords: I) -> Result<Self, OutOfBounds>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut grid = Self::new(board);
        for coord in coords {
            grid.set(coord, true)?;
        }
        Ok(grid)
    }

    /// Build from nested x-major rows (`rows[x][y]`), as handed over by the gym.
    /// Any non-zero cell counts as occupied. Ragged input is padded with empty cells.
    pub fn from_rows<T, R>(rows: &[R]) -> Self
    where
        T: Copy + Default + PartialEq,
        R: AsRef<[T]>,
    {
        let width = rows.len();
        let height = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = Self::new(BoardSize::new(width, height));
        for (x, row) in rows.iter().enumerate() {
            for (y, v) in row.as_ref().iter().enumerate() {
                if *v != T::default() {
                    grid.data[x * height + y] = 1;
                }
            }
        }
        grid
    }

    pub fn board(&self) -> BoardSize {
        self.board
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.board
            .contains(coord)
            .then(|| coord.x * self.board.height + coord.y)
    }

    pub fn get(&self, coord: Coord) -> Option<bool> {
        self.index(coord).map(|i| self.data[i] == 1)
    }

    pub fn set(&mut self, coord: Coord, occupied: bool) -> Result<(), OutOfBounds> {
        let i = self.index(coord).ok_or(OutOfBounds {
            coord,
            board: self.board,
        })?;
        self.data[i] = u8::from(occupied);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copy out as nested x-major rows.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        if self.board.height == 0 {
            return vec![Vec::new(); self.board.width];
        }
        self.data
            .chunks(self.board.height)
            .map(<[u8]>::to_vec)
            .collect()
    }

    pub fn iter_occupied(&self) -> impl Iterator<Item = Coord> + '_ {
        let height = self.board.height;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1)
            .map(move |(i, _)| Coord::new(i / height, i % height))
    }

    pub fn occupied_coordinates(&self) -> HashSet<Coord> {
        self.iter_occupied().collect()
    }
}

/// Extract every occupied cell of another entity layer (e.g. the snake map).
pub fn occupied_coordinates(grid: &OccupancyGrid) -> HashSet<Coord> {
    grid.occupied_coordinates()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_use_x_major_layout() {
        let mut grid = OccupancyGrid::new(BoardSize::new(3, 2));
        grid.set(Coord::new(2, 1), true).unwrap();
        assert_eq!(grid.get(Coord::new(2, 1)), Some(true));
        assert_eq!(grid.get(Coord::new(1, 2)), None);
        assert_eq!(grid.data()[2 * 2 + 1], 1);
        assert_eq!(grid.rows(), vec![vec![0, 0], vec![0, 0], vec![0, 1]]);
    }

    #[test]
    fn set_rejects_out_of_bounds() {
        let mut grid = OccupancyGrid::new(BoardSize::new(4, 4));
        let err = grid.set(Coord::new(4, 0), true).unwrap_err();
        assert_eq!(err.coord, Coord::new(4, 0));
        assert_eq!(grid.count(), 0);
    }

    #[test]
    fn from_rows_treats_nonzero_as_occupied() {
        let rows = vec![vec![0.0f64, 2.0], vec![1.0, 0.0], vec![0.0, 0.0]];
        let grid = OccupancyGrid::from_rows(&rows);
        assert_eq!(grid.board(), BoardSize::new(3, 2));
        let occupied = occupied_coordinates(&grid);
        assert_eq!(occupied.len(), 2);
        assert!(occupied.contains(&Coord::new(0, 1)));
        assert!(occupied.contains(&Coord::new(1, 0)));
    }

    #[test]
    fn duplicate_coordinates_are_harmless() {
        let grid = OccupancyGrid::from_coordinates(
            BoardSize::new(5, 5),
            [Coord::new(1, 1), Coord::new(1, 1)],
        )
        .unwrap();
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn zero_sized_board_has_no_cells() {
        let grid = OccupancyGrid::new(BoardSize::new(0, 7));
        assert_eq!(grid.count(), 0);
        assert!(grid.rows().is_empty());
        assert_eq!(grid.get(Coord::new(0, 0)), None);
    }
}
