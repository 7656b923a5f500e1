//! Rules oracle seam.
//!
//! The concrete game rules live outside this crate. The client only needs
//! three things from them: the board dimensions (to size the proposal
//! tally), the canonical initial state (substituted on a first-move
//! snapshot), and a way to validate a clicked cell into a fully-formed
//! move.

use crate::view::{CellAction, GameState, Move};
use derive_more::{Display, Error};

/// An illegal candidate move, as reported by the rules oracle.
///
/// Illegal clicks are a normal part of play: callers log the error and
/// absorb it, and the click simply has no effect.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("illegal move at ({}, {}): {}", row, col, reason)]
pub struct MoveError {
    /// 0-based row of the rejected cell.
    pub row: usize,
    /// 0-based column of the rejected cell.
    pub col: usize,
    /// Why the rules rejected it.
    pub reason: String,
}

impl MoveError {
    /// Creates a new illegal-move error.
    pub fn new(row: usize, col: usize, reason: impl Into<String>) -> Self {
        Self {
            row,
            col,
            reason: reason.into(),
        }
    }
}

/// Validates candidate interactions into fully-formed moves.
///
/// Implementations are pure: no shared state, same answer for the same
/// inputs.
pub trait MoveOracle: Send + Sync {
    /// Board height in cells.
    fn board_rows(&self) -> usize;

    /// Board width in cells.
    fn board_cols(&self) -> usize;

    /// The state a match starts from when the platform has none yet.
    fn initial_state(&self) -> GameState;

    /// Validates an interaction with a cell into a fully-formed move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] when the interaction is illegal in `state`.
    fn create_move(
        &self,
        state: &GameState,
        row: usize,
        col: usize,
        action: CellAction,
        turn_index: i64,
    ) -> Result<Move, MoveError>;
}

/// Minimal single-layer placement rules used by tests and demos.
///
/// Real games bring their own oracle. This one marks an empty cell with
/// `"P"` on a move, downgrades a `"P"` to `"B"` on an attack, and rotates
/// the turn round-robin over the seats.
#[derive(Debug, Clone, Copy)]
pub struct PlacementOracle {
    rows: usize,
    cols: usize,
    seats: usize,
}

impl PlacementOracle {
    /// Creates placement rules for a `rows x cols` board with `seats`
    /// players.
    pub fn new(rows: usize, cols: usize, seats: usize) -> Self {
        Self { rows, cols, seats }
    }
}

impl MoveOracle for PlacementOracle {
    fn board_rows(&self) -> usize {
        self.rows
    }

    fn board_cols(&self) -> usize {
        self.cols
    }

    fn initial_state(&self) -> GameState {
        GameState {
            board: vec![vec![vec![String::new(); self.cols]; self.rows]],
            delta: None,
        }
    }

    fn create_move(
        &self,
        state: &GameState,
        row: usize,
        col: usize,
        action: CellAction,
        turn_index: i64,
    ) -> Result<Move, MoveError> {
        if row >= self.rows || col >= self.cols {
            return Err(MoveError::new(row, col, "cell is off the board"));
        }
        let occupant = state
            .piece_at(0, row, col)
            .ok_or_else(|| MoveError::new(row, col, "cell is off the board"))?;

        let placed = match action {
            CellAction::Move if occupant.is_empty() => "P",
            CellAction::Move => return Err(MoveError::new(row, col, "cell is occupied")),
            CellAction::Attack if occupant == "P" => "B",
            CellAction::Attack => return Err(MoveError::new(row, col, "nothing to attack")),
        };

        let mut next = state.clone();
        next.board[0][row][col] = placed.to_string();
        next.delta = Some(crate::view::Delta::new(row, col));

        Ok(Move {
            end_match_scores: None,
            state: next,
            turn_index: (turn_index + 1) % self.seats as i64,
        })
    }
}
