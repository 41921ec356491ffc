#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use input::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod game;
mod generator;
mod input;
mod tile;
mod types;

/// Side length and mine count of a square board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Requires `size >= 1` and `mines < size * size`.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 || mines >= mult(size, size) {
            return Err(GameError::invalid_config(size, mines));
        }
        Ok(Self::new_unchecked(size, mines))
    }

    /// Same as [`GameConfig::new`] for values read from the player, which may be negative or
    /// larger than the coordinate types allow.
    pub fn from_raw(size: i64, mines: i64) -> Result<Self> {
        let invalid = || GameError::invalid_config(size, mines);
        let size = Coord::try_from(size).map_err(|_| invalid())?;
        let mines = CellCount::try_from(mines).map_err(|_| invalid())?;
        Self::new(size, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Preset mine densities offered at session start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked(9, 10),
            Self::Intermediate => GameConfig::new_unchecked(16, 40),
            Self::Expert => GameConfig::new_unchecked(24, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }
}

/// Number of mines in the Moore neighbourhood of `coords`, clipped at the edges.
pub fn count_adjacent_mines(mine_mask: &Array2<bool>, coords: Coord2) -> u8 {
    let adjacent = mine_mask
        .iter_neighbors(coords)
        .filter(|&pos| mine_mask[pos.to_nd_index()])
        .count();
    // at most 8 neighbours
    adjacent as u8
}

/// Immutable labelled grid produced by a [`BoardGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    labels: Array2<Label>,
    mine_count: CellCount,
}

impl Board {
    /// Generates a random board, validating `size` and `mines` first.
    pub fn generate<R: rand::Rng>(size: Coord, mines: CellCount, rng: &mut R) -> Result<Self> {
        RandomBoardGenerator::new(rng).generate(GameConfig::new_unchecked(size, mines))
    }

    /// Labels every cell of a square mine mask.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let labels = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            if mine_mask[(row, col)] {
                Label::Mine
            } else {
                // the mask was built from Coord2 dimensions
                let coords = (row as Coord, col as Coord);
                Label::from_count(count_adjacent_mines(mine_mask, coords))
            }
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self { labels, mine_count }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size && coords.1 < size
    }

    /// Side length of the board.
    pub fn size(&self) -> Coord {
        shape_of(&self.labels).0
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn label(&self, coords: Coord2) -> Label {
        self[coords]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.labels.iter_neighbors(coords)
    }

    /// All mine coordinates in row-major order.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.labels
            .indexed_iter()
            .filter(|(_, label)| label.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for Board {
    type Output = Label;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.labels[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Flagged,
    Unflagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// A safe cell was opened and the game goes on.
    Revealed,
    /// A mine was opened; the game is lost.
    Exploded,
    /// The last safe cell was opened.
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_rejects_empty_grid_and_full_boards() {
        assert_eq!(
            GameConfig::new(0, 0),
            Err(GameError::InvalidConfiguration { size: 0, mines: 0 })
        );
        assert!(GameConfig::new(3, 9).is_err());
        assert!(GameConfig::new(3, 10).is_err());
        assert_eq!(GameConfig::new(3, 8), Ok(GameConfig { size: 3, mines: 8 }));
        assert_eq!(GameConfig::new(1, 0).map(|c| c.safe_cells()), Ok(1));
    }

    #[test]
    fn raw_config_rejects_negative_and_oversized_values() {
        assert!(GameConfig::from_raw(5, -1).is_err());
        assert!(GameConfig::from_raw(-5, 1).is_err());
        assert!(GameConfig::from_raw(256, 1).is_err());
        assert!(GameConfig::from_raw(5, 25).is_err());
        assert_eq!(GameConfig::from_raw(5, 3), GameConfig::new(5, 3));
    }

    #[test]
    fn presets_are_valid_configs() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert_eq!(GameConfig::new(config.size, config.mines), Ok(config));
        }
    }

    #[test]
    fn count_adjacent_mines_clips_at_edges() {
        let mask = Array2::from_shape_fn((3, 3), |pos| pos == (0, 0) || pos == (2, 2));

        assert_eq!(count_adjacent_mines(&mask, (1, 1)), 2);
        assert_eq!(count_adjacent_mines(&mask, (0, 2)), 0);
        assert_eq!(count_adjacent_mines(&mask, (0, 1)), 1);
        assert_eq!(count_adjacent_mines(&mask, (1, 0)), 1);
    }

    #[test]
    fn board_labels_match_neighbourhood() {
        let board = Board::from_mine_coords(3, &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 7);
        assert_eq!(board[(0, 0)], Label::Mine);
        assert_eq!(board[(1, 1)], Label::Count(2));
        assert_eq!(board[(0, 2)], Label::Empty);
        assert_eq!(board[(0, 1)], Label::Count(1));
        assert_eq!(board.mines().collect::<Vec<_>>(), [(0, 0), (2, 2)]);
    }

    #[test]
    fn board_rejects_mines_outside_grid() {
        assert_eq!(
            Board::from_mine_coords(2, &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
