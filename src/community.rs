//! Community proposal tally.

use crate::view::{PlayerInfo, Proposal};
use std::collections::HashMap;
use tracing::warn;

/// Per-cell vote counts for community mode, plus this client's own player
/// record.
///
/// The tally is rebuilt from scratch on every community update rather than
/// patched incrementally, so withdrawn or re-aimed proposals can never
/// leave stale counts behind. Its presence is what marks the match as a
/// community match for the dispatcher.
#[derive(Debug, Default)]
pub(crate) struct ProposalEngine {
    tally: Option<Vec<Vec<u32>>>,
    your_player: Option<PlayerInfo>,
}

impl ProposalEngine {
    /// Drops back to direct mode; a direct snapshot carries no proposals.
    pub(crate) fn clear(&mut self) {
        self.tally = None;
    }

    /// True once at least one community update has been seen since the last
    /// direct snapshot.
    pub(crate) fn is_community(&self) -> bool {
        self.tally.is_some()
    }

    /// This client's own player record, if a community update supplied one.
    pub(crate) fn your_player(&self) -> Option<&PlayerInfo> {
        self.your_player.as_ref()
    }

    pub(crate) fn set_your_player(&mut self, player: PlayerInfo) {
        self.your_player = Some(player);
    }

    /// Rebuilds the tally from every outstanding proposal.
    pub(crate) fn rebuild(
        &mut self,
        proposals: &HashMap<String, Proposal>,
        rows: usize,
        cols: usize,
    ) {
        let mut tally = vec![vec![0u32; cols]; rows];
        for proposal in proposals.values() {
            let delta = proposal.data;
            match tally.get_mut(delta.row).and_then(|r| r.get_mut(delta.col)) {
                Some(cell) => *cell += 1,
                None => {
                    warn!(
                        row = delta.row,
                        col = delta.col,
                        "proposal targets a cell off the board; dropped from tally"
                    );
                }
            }
        }
        self.tally = Some(tally);
    }

    /// Votes currently standing for a cell. Zero in direct mode or off the
    /// board.
    pub(crate) fn count_at(&self, row: usize, col: usize) -> u32 {
        self.tally
            .as_ref()
            .and_then(|t| t.get(row))
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }
}
