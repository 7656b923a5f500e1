//! Turn ownership state machine.

use crate::rules::MoveOracle;
use crate::view::{GameState, UpdateView};
use tracing::debug;

/// Owns the current platform snapshot and the one-submission-per-round flag.
///
/// `ingest` is the only path that replaces the snapshot; every replacement
/// resets the round flag and bumps the generation, which is what voids any
/// deferred work armed for the previous round. With no snapshot yet, every
/// predicate fails closed.
#[derive(Debug, Default)]
pub(crate) struct TurnController {
    current: Option<UpdateView>,
    state: Option<GameState>,
    has_moved: bool,
    generation: u64,
}

impl TurnController {
    /// Replaces the current snapshot and resets per-round bookkeeping.
    ///
    /// A snapshot without embedded state means the match is on its first
    /// move; the oracle's canonical initial state is substituted. Returns
    /// the new generation.
    pub(crate) fn ingest(&mut self, view: UpdateView, oracle: &dyn MoveOracle) -> u64 {
        self.has_moved = false;
        self.generation = self.generation.wrapping_add(1);
        self.state = match view.state.clone() {
            Some(state) => Some(state),
            None => {
                debug!("first move; substituting initial state");
                Some(oracle.initial_state())
            }
        };
        self.current = Some(view);
        self.generation
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn current(&self) -> Option<&UpdateView> {
        self.current.as_ref()
    }

    pub(crate) fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// True while this seat may still act on the current snapshot: nothing
    /// submitted this round, the match is ongoing, and the turn is ours.
    pub(crate) fn is_my_turn(&self) -> bool {
        let Some(view) = &self.current else {
            return false;
        };
        !self.has_moved && view.turn_index >= 0 && view.your_player_index == view.turn_index
    }

    /// True when this seat is controlled by the platform rather than a
    /// human. Community snapshots carry no seat descriptors, so a community
    /// match never reports an automated seat.
    pub(crate) fn seat_is_automated(&self) -> bool {
        let Some(view) = &self.current else {
            return false;
        };
        usize::try_from(view.your_player_index)
            .ok()
            .and_then(|i| view.players_info.get(i))
            .is_some_and(|info| info.is_automated())
    }

    pub(crate) fn is_automated_turn(&self) -> bool {
        self.is_my_turn() && self.seat_is_automated()
    }

    pub(crate) fn is_human_turn(&self) -> bool {
        self.is_my_turn() && !self.seat_is_automated()
    }

    /// Claims the round's single submission slot.
    ///
    /// Returns false if something was already submitted this round. The
    /// flag is raised before any downstream effect runs, which closes the
    /// window even when the submission itself is asynchronous.
    pub(crate) fn begin_submission(&mut self) -> bool {
        if self.has_moved {
            return false;
        }
        self.has_moved = true;
        true
    }

    /// Overwrites the round flag from the platform's own record of whether
    /// this player has an outstanding proposal.
    pub(crate) fn set_has_moved(&mut self, has_moved: bool) {
        self.has_moved = has_moved;
    }
}
