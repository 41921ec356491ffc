use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Reveal and flag bookkeeping over an immutable [`Board`].
///
/// The reveal mask only ever gains cells. The engine does not know whether the game is over;
/// callers stop feeding it moves once a reveal reports [`RevealOutcome::Exploded`] or
/// [`RevealOutcome::Won`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    revealed_safe: CellCount,
    flag_count: CellCount,
    moves: u32,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        let shape = (board.size(), board.size()).to_nd_index();
        Self {
            board,
            revealed: Array2::default(shape),
            flagged: Array2::default(shape),
            revealed_safe: 0,
            flag_count: 0,
            moves: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.flag_count)
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flagged[coords.to_nd_index()]
    }

    pub fn revealed_mask(&self) -> &Array2<bool> {
        &self.revealed
    }

    pub fn flag_mask(&self) -> &Array2<bool> {
        &self.flagged
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        if self.is_revealed(coords) {
            CellView::Revealed(self.board[coords])
        } else if self.is_flagged(coords) {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    /// Every safe cell has been revealed.
    pub fn is_won(&self) -> bool {
        self.revealed_safe == self.board.safe_cell_count()
    }

    pub fn validate_coords(&self, coords: Coord2) -> MoveResult<Coord2> {
        if self.board.contains(coords) {
            Ok(coords)
        } else {
            Err(MoveError::OutOfBounds {
                max: self.size().saturating_sub(1),
            })
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MoveResult<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.is_revealed(coords) {
            return Err(MoveError::RevealedCell);
        }

        let flag = &mut self.flagged[coords.to_nd_index()];
        *flag = !*flag;
        Ok(if *flag {
            self.flag_count += 1;
            MarkOutcome::Flagged
        } else {
            self.flag_count -= 1;
            MarkOutcome::Unflagged
        })
    }

    /// Opens one cell, flood filling from it when it has no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> MoveResult<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.is_revealed(coords) {
            return Err(MoveError::AlreadyRevealed);
        }
        if self.is_flagged(coords) {
            return Err(MoveError::FlaggedCell);
        }

        self.revealed[coords.to_nd_index()] = true;
        self.moves += 1;

        match self.board[coords] {
            Label::Mine => {
                log::debug!("Mine hit at {:?} on move {}", coords, self.moves);
                return Ok(RevealOutcome::Exploded);
            }
            Label::Empty => {
                self.revealed_safe += 1;
                self.flood_fill(coords);
            }
            Label::Count(count) => {
                self.revealed_safe += 1;
                log::debug!("Revealed {:?}, adjacent mines: {}", coords, count);
            }
        }

        Ok(if self.is_won() {
            log::debug!("All safe cells revealed after {} moves", self.moves);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Opens the region around an empty cell that was just revealed. Mines and flagged cells are
    /// never opened.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit = Vec::from([origin]);
        log::trace!("Starting flood-fill from {:?}", origin);

        while let Some(visit_coords) = to_visit.pop() {
            for pos in self.board.iter_neighbors(visit_coords) {
                let index = pos.to_nd_index();
                if self.revealed[index] || self.flagged[index] {
                    continue;
                }

                let label = self.board[pos];
                if label.is_mine() {
                    continue;
                }

                self.revealed[index] = true;
                self.revealed_safe += 1;
                log::trace!("Flood opened cell at {:?}, label: {:?}", pos, label);

                if label == Label::Empty {
                    to_visit.push(pos);
                }
            }
        }
    }
}
