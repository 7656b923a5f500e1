//! Automated opponent seam.

use crate::rules::MoveOracle;
use crate::view::{CellAction, GameState, Move};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// An automated opponent that can choose moves.
///
/// Invoked only when the turn controller says the seat on turn is
/// platform-controlled. Implementations may be slow internally; the client
/// awaits them off the state lock.
#[async_trait]
pub trait Opponent: Send + Sync {
    /// Chooses a move for the seat currently on turn.
    async fn choose_move(
        &self,
        state: &GameState,
        turn_index: i64,
        end_match_scores: Option<&[i64]>,
    ) -> Result<Move>;

    /// Display name used in logs.
    fn name(&self) -> &str;
}

/// Opponent that takes the first cell the oracle will accept.
pub struct FirstFit {
    oracle: Arc<dyn MoveOracle>,
}

impl FirstFit {
    /// Creates a first-fit opponent over the given rules.
    pub fn new(oracle: Arc<dyn MoveOracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl Opponent for FirstFit {
    async fn choose_move(
        &self,
        state: &GameState,
        turn_index: i64,
        _end_match_scores: Option<&[i64]>,
    ) -> Result<Move> {
        for row in 0..self.oracle.board_rows() {
            for col in 0..self.oracle.board_cols() {
                if let Ok(mv) = self.oracle.create_move(state, row, col, CellAction::Move, turn_index)
                {
                    debug!(row, col, "first-fit opponent chose a cell");
                    return Ok(mv);
                }
            }
        }
        anyhow::bail!("no legal moves available")
    }

    fn name(&self) -> &str {
        "first-fit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PlacementOracle;

    #[tokio::test]
    async fn first_fit_takes_first_empty_cell() {
        let oracle = Arc::new(PlacementOracle::new(2, 2, 2));
        let opponent = FirstFit::new(oracle.clone());

        let state = oracle.initial_state();
        let mv = opponent.choose_move(&state, 0, None).await.unwrap();
        assert_eq!(mv.state.piece_at(0, 0, 0), Some("P"));

        let mv = opponent.choose_move(&mv.state, 1, None).await.unwrap();
        assert_eq!(mv.state.piece_at(0, 0, 1), Some("P"));
    }

    #[tokio::test]
    async fn first_fit_errors_on_full_board() {
        let oracle = Arc::new(PlacementOracle::new(1, 1, 2));
        let opponent = FirstFit::new(oracle.clone());

        let state = oracle.initial_state();
        let mv = opponent.choose_move(&state, 0, None).await.unwrap();
        assert!(opponent.choose_move(&mv.state, 1, None).await.is_err());
    }
}
