//! One-shot move dispatch.

use crate::community::ProposalEngine;
use crate::platform::PlatformSink;
use crate::turn::TurnController;
use crate::view::{Move, Proposal};
use tracing::{debug, info, warn};

/// Routes a validated move to the platform, enforcing at most one
/// submission per snapshot.
///
/// The round's submission slot is claimed before anything else happens, so
/// a stray second click or a slow platform acknowledgement cannot produce a
/// double submission.
pub(crate) fn dispatch(
    turn: &mut TurnController,
    proposals: &ProposalEngine,
    platform: &dyn PlatformSink,
    quorum: u32,
    mv: Move,
) {
    if !turn.begin_submission() {
        debug!("a move was already sent this round; dropping");
        return;
    }

    if !proposals.is_community() {
        info!(turn_index = mv.turn_index, "submitting move");
        platform.submit_move(mv);
        return;
    }

    // Community mode: the move becomes this player's vote. It resolves the
    // round only when enough other players already back the same cell, and
    // the count is read before our own vote lands.
    let Some(delta) = mv.state.delta else {
        warn!("community move carries no delta; dropped");
        return;
    };
    let Some(player) = proposals.your_player().cloned() else {
        warn!("no player record to attach to the proposal; dropped");
        return;
    };

    let support = proposals.count_at(delta.row, delta.col);
    let resolve = if support < quorum { None } else { Some(mv) };
    info!(
        row = delta.row,
        col = delta.col,
        support,
        resolving = resolve.is_some(),
        "submitting proposal"
    );
    platform.submit_proposal(Proposal::for_cell(delta, player), resolve);
}
