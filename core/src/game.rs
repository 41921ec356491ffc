use alloc::format;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// Status shown while the game waits for a move.
pub const PROMPT: &str = "Enter your move:";

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Moves are accepted
    InProgress,
    /// Game ended and player won
    Won,
    /// Game ended and player lost
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game session from start to finish: board, masks, cursor, and the status line shown to the
/// player.
///
/// Every mutating operation is rejected with [`MoveError::GameOver`] once the state is final. Other
/// rejections leave the board untouched and only replace the status message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    engine: PlayEngine,
    cursor: Coord2,
    state: GameState,
    message: String,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            engine: PlayEngine::new(board),
            cursor: (0, 0),
            state: Default::default(),
            message: PROMPT.to_string(),
            triggered_mine: None,
        }
    }

    /// Fails with [`GameError::InvalidConfiguration`] when `config` leaves no safe cell.
    pub fn generate<R: rand::Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        RandomBoardGenerator::new(rng).generate(config).map(Self::new)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn size(&self) -> Coord {
        self.engine.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board().mine_count()
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn moves(&self) -> u32 {
        self.engine.moves()
    }

    pub fn flag_count(&self) -> CellCount {
        self.engine.flag_count()
    }

    pub fn mines_left(&self) -> i32 {
        self.engine.mines_left()
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.engine.cell_at(coords)
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Moves the cursor, clamping at the board edges.
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) -> MoveResult<Coord2> {
        self.check_not_finished()?;

        let size = self.size();
        let (row, col) = self.cursor;
        self.cursor = (
            clamp_offset(row, d_row, size),
            clamp_offset(col, d_col, size),
        );
        Ok(self.cursor)
    }

    pub fn reveal_at_cursor(&mut self) -> MoveResult<RevealOutcome> {
        self.reveal(self.cursor)
    }

    /// Reveals the cell typed as `row,col`.
    pub fn handle_input(&mut self, text: &str) -> MoveResult<RevealOutcome> {
        self.check_not_finished()?;

        match parse_coords(text, self.size()) {
            Ok(coords) => self.reveal(coords),
            Err(err) => Err(self.reject(err)),
        }
    }

    pub fn toggle_flag(&mut self) -> MoveResult<MarkOutcome> {
        self.check_not_finished()?;

        match self.engine.toggle_flag(self.cursor) {
            Ok(outcome) => {
                self.message = PROMPT.to_string();
                Ok(outcome)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> MoveResult<RevealOutcome> {
        self.check_not_finished()?;

        let outcome = match self.engine.reveal(coords) {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.reject(err)),
        };

        match outcome {
            RevealOutcome::Exploded => {
                self.state = GameState::Lost;
                self.triggered_mine = Some(coords);
                self.message = "BOOM! Game Over.".to_string();
            }
            RevealOutcome::Won => {
                self.state = GameState::Won;
                self.message = format!("Congratulations! You won in {} moves.", self.moves());
            }
            RevealOutcome::Revealed => {
                self.message = PROMPT.to_string();
            }
        }
        Ok(outcome)
    }

    fn reject(&mut self, err: MoveError) -> MoveError {
        log::debug!("Rejected move: {:?}", err);
        self.message = err.to_string();
        err
    }

    fn check_not_finished(&self) -> MoveResult<()> {
        if self.state.is_final() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}
