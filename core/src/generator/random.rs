use ndarray::Array2;
use rand::Rng;

use super::*;

/// Places mines uniformly at random by rejection sampling: a random cell is drawn, and drawn again
/// when it already holds a mine.
#[derive(Debug)]
pub struct RandomBoardGenerator<'a, R> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RandomBoardGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<'_, R> {
    fn generate(self, config: GameConfig) -> Result<Board> {
        let GameConfig { size, mines } = GameConfig::new(config.size, config.mines)?;
        let rng = self.rng;
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut draws: u32 = 0;

        // terminates since the config was checked to leave a free cell
        while mines_placed < mines {
            let coords: Coord2 = (rng.random_range(0..size), rng.random_range(0..size));
            draws += 1;
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Generated {}x{} board with {} mines in {} draws",
            size,
            size,
            mines,
            draws
        );
        Ok(Board::from_mine_mask(&mine_mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn generate(size: Coord, mines: CellCount, seed: u64) -> Board {
        let mut rng = SmallRng::seed_from_u64(seed);
        Board::generate(size, mines, &mut rng).unwrap()
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..20 {
            let board = generate(5, 3, seed);
            assert_eq!(board.mine_count(), 3);
            assert_eq!(board.mines().count(), 3);
        }
    }

    #[test]
    fn labels_match_adjacent_mines() {
        for seed in 0..20 {
            let board = generate(8, 20, seed);
            let size = board.size();
            for row in 0..size {
                for col in 0..size {
                    let coords = (row, col);
                    if board[coords].is_mine() {
                        continue;
                    }
                    let expected = board
                        .iter_neighbors(coords)
                        .filter(|&pos| board[pos].is_mine())
                        .count() as u8;
                    assert_eq!(board[coords], Label::from_count(expected));
                }
            }
        }
    }

    #[test]
    fn dense_board_leaves_one_safe_cell() {
        let board = generate(4, 15, 7);
        assert_eq!(board.mine_count(), 15);
        assert_eq!(board.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_gives_same_board() {
        assert_eq!(generate(10, 12, 42), generate(10, 12, 42));
    }

    #[test]
    fn zero_mines_gives_all_empty() {
        let board = generate(3, 0, 1);
        assert!(board.mines().next().is_none());
        assert_eq!(board[(1, 1)], Label::Empty);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            Board::generate(0, 0, &mut rng),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Board::generate(2, 4, &mut rng),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn unchecked_config_is_rejected_not_sampled() {
        let mut rng = SmallRng::seed_from_u64(0);
        // more mines than cells, no cells at all, and no safe cell left
        for (size, mines) in [(2, 5), (0, 1), (2, 4)] {
            let config = GameConfig { size, mines };
            assert_eq!(
                RandomBoardGenerator::new(&mut rng).generate(config),
                Err(GameError::InvalidConfiguration {
                    size: size.into(),
                    mines: mines.into()
                })
            );
        }
    }
}
