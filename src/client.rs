//! Client facade: wires the turn controller, the dispatcher and the
//! proposal engine to the platform's event stream.

use crate::community::ProposalEngine;
use crate::config::ClientConfig;
use crate::dispatch::dispatch;
use crate::opponent::Opponent;
use crate::platform::PlatformSink;
use crate::rules::MoveOracle;
use crate::turn::TurnController;
use crate::view::{CellAction, CommunityView, UpdateView};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Snapshot, round flag and tally mutate as a unit, so they live behind one
/// lock together with the deferred-move handle.
#[derive(Default)]
struct ClientState {
    turn: TurnController,
    proposals: ProposalEngine,
    pending: Option<JoinHandle<()>>,
}

/// Arbitrates turns and moves for one hosted match.
///
/// The platform adapter pushes snapshots in via [`on_update`] and
/// [`on_community_update`], the presentation layer pushes clicks in via
/// [`cell_clicked`], and submissions leave through the [`PlatformSink`].
/// Cloning is cheap and clones share the same match state.
///
/// [`on_update`]: GameClient::on_update
/// [`on_community_update`]: GameClient::on_community_update
/// [`cell_clicked`]: GameClient::cell_clicked
#[derive(Clone)]
pub struct GameClient {
    state: Arc<Mutex<ClientState>>,
    oracle: Arc<dyn MoveOracle>,
    opponent: Arc<dyn Opponent>,
    platform: Arc<dyn PlatformSink>,
    config: ClientConfig,
}

impl GameClient {
    /// Creates a client for one match.
    ///
    /// Must be called inside a tokio runtime: snapshot ingestion spawns the
    /// deferred automated-move task.
    pub fn new(
        config: ClientConfig,
        oracle: Arc<dyn MoveOracle>,
        opponent: Arc<dyn Opponent>,
        platform: Arc<dyn PlatformSink>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClientState::default())),
            oracle,
            opponent,
            platform,
            config,
        }
    }

    /// Ingests a snapshot from the platform.
    ///
    /// Replaces the current snapshot, reopens the round, drops back to
    /// direct mode until a community update says otherwise, cancels any
    /// pending deferred move and arms a fresh one.
    #[instrument(skip(self, view), fields(turn_index = view.turn_index))]
    pub fn on_update(&self, view: UpdateView) {
        info!("snapshot received");
        let generation = {
            let mut state = self.state.lock().unwrap();
            let generation = state.turn.ingest(view, self.oracle.as_ref());
            state.proposals.clear();
            if let Some(pending) = state.pending.take() {
                pending.abort();
            }
            generation
        };
        // The opponent is consulted only after the delay, so the board
        // animation is not starved by move search.
        self.arm_deferred_move(generation);
    }

    /// Ingests a community snapshot.
    ///
    /// The derived match view only replaces the current snapshot when it or
    /// our own player record actually changed, so vote-only traffic does
    /// not disrupt a player mid-interaction. The proposal tally and the
    /// already-proposed flag are refreshed afterwards either way; that
    /// order is fixed, because ingesting a snapshot clears the per-round
    /// state the refresh then overwrites.
    #[instrument(
        skip(self, view),
        fields(turn_index = view.turn_index, outstanding = view.player_id_to_proposal.len())
    )]
    pub fn on_community_update(&self, view: CommunityView) {
        info!("community snapshot received");
        let next = view.to_update_view();
        let unchanged = {
            let state = self.state.lock().unwrap();
            state.proposals.your_player() == Some(&view.your_player_info)
                && state.turn.current() == Some(&next)
        };
        if unchanged {
            debug!("only proposals changed; keeping the current snapshot");
        } else {
            self.on_update(next);
        }

        let mut state = self.state.lock().unwrap();
        state
            .proposals
            .set_your_player(view.your_player_info.clone());
        let already_proposed = view
            .player_id_to_proposal
            .contains_key(&view.your_player_info.player_id);
        state.turn.set_has_moved(already_proposed);
        state.proposals.rebuild(
            &view.player_id_to_proposal,
            self.oracle.board_rows(),
            self.oracle.board_cols(),
        );
    }

    /// Handles a click on a board cell from the presentation layer.
    ///
    /// Ignored unless a human may act right now. An illegal cell is logged
    /// and absorbed: the click simply has no effect.
    #[instrument(skip(self))]
    pub fn cell_clicked(&self, row: usize, col: usize, action: CellAction) {
        let mut state = self.state.lock().unwrap();
        if !state.turn.is_human_turn() {
            debug!("not a human turn; click ignored");
            return;
        }
        let (Some(game_state), Some(view)) = (state.turn.state(), state.turn.current()) else {
            return;
        };
        let mv = match self
            .oracle
            .create_move(game_state, row, col, action, view.turn_index)
        {
            Ok(mv) => mv,
            Err(error) => {
                debug!(%error, "illegal move; click absorbed");
                return;
            }
        };
        let ClientState {
            turn, proposals, ..
        } = &mut *state;
        dispatch(turn, proposals, self.platform.as_ref(), *self.config.quorum(), mv);
    }

    /// Cancels any pending deferred-move work.
    pub fn shutdown(&self) {
        if let Some(pending) = self.state.lock().unwrap().pending.take() {
            pending.abort();
        }
    }

    fn arm_deferred_move(&self, generation: u64) {
        let client = self.clone();
        let delay = self.config.animation_delay();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            client.deferred_move(generation).await;
        });

        let mut state = self.state.lock().unwrap();
        if state.turn.generation() == generation {
            if let Some(old) = state.pending.replace(handle) {
                old.abort();
            }
        } else {
            // A newer snapshot landed while we were arming.
            handle.abort();
        }
    }

    /// Fires once per armed delay. A stale generation means a newer
    /// snapshot superseded this round: cancel-then-ignore, never
    /// cancel-and-race.
    async fn deferred_move(&self, generation: u64) {
        let inputs = {
            let state = self.state.lock().unwrap();
            if state.turn.generation() != generation || !state.turn.is_automated_turn() {
                return;
            }
            match (state.turn.state(), state.turn.current()) {
                (Some(game_state), Some(view)) => (
                    game_state.clone(),
                    view.turn_index,
                    view.end_match_scores.clone(),
                ),
                _ => return,
            }
        };

        let (game_state, turn_index, scores) = inputs;
        debug!(opponent = %self.opponent.name(), "asking the automated opponent for a move");
        let mv = match self
            .opponent
            .choose_move(&game_state, turn_index, scores.as_deref())
            .await
        {
            Ok(mv) => mv,
            Err(error) => {
                warn!(%error, "automated opponent failed; skipping the round");
                return;
            }
        };
        info!(turn_index = mv.turn_index, "automated opponent chose a move");

        let mut state = self.state.lock().unwrap();
        // The opponent ran off the lock; a snapshot may have landed since.
        if state.turn.generation() != generation {
            debug!("snapshot superseded while the opponent was thinking; move dropped");
            return;
        }
        let ClientState {
            turn, proposals, ..
        } = &mut *state;
        dispatch(turn, proposals, self.platform.as_ref(), *self.config.quorum(), mv);
    }

    // ── read-only presentation queries ──────────────────────────────

    /// True while this seat may act on the current snapshot.
    pub fn is_my_turn(&self) -> bool {
        self.state.lock().unwrap().turn.is_my_turn()
    }

    /// True when the cell should render artwork: a piece on the shared
    /// layer, or at least one outstanding proposal.
    pub fn should_show_image(&self, row: usize, col: usize) -> bool {
        let state = self.state.lock().unwrap();
        let piece = state
            .turn
            .state()
            .and_then(|s| s.piece_at(0, row, col))
            .is_some_and(|cell| !cell.is_empty());
        piece || state.proposals.count_at(row, col) > 0
    }

    /// True when the cell is the latest delta and should animate in.
    pub fn should_slowly_appear(&self, row: usize, col: usize) -> bool {
        self.state
            .lock()
            .unwrap()
            .turn
            .state()
            .and_then(|s| s.delta)
            .is_some_and(|d| d.row == row && d.col == col)
    }

    /// Votes currently standing for a cell.
    pub fn proposal_count(&self, row: usize, col: usize) -> u32 {
        self.state.lock().unwrap().proposals.count_at(row, col)
    }

    /// True when any player proposes this cell.
    pub fn is_proposal(&self, row: usize, col: usize) -> bool {
        self.proposal_count(row, col) > 0
    }

    /// True when exactly one player proposes this cell.
    pub fn is_proposal_single(&self, row: usize, col: usize) -> bool {
        self.proposal_count(row, col) == 1
    }

    /// True when exactly two players propose this cell.
    pub fn is_proposal_pair(&self, row: usize, col: usize) -> bool {
        self.proposal_count(row, col) == 2
    }

    /// True when the cell holds a piece (`"P"`) on the caller's layer.
    pub fn is_position(&self, layer: usize, row: usize, col: usize) -> bool {
        self.is_piece_at(layer, row, col, "P")
    }

    /// True when the cell holds a broken piece (`"B"`) on the caller's
    /// layer.
    pub fn is_broken(&self, layer: usize, row: usize, col: usize) -> bool {
        self.is_piece_at(layer, row, col, "B")
    }

    /// True when the cell is empty on the caller's layer.
    pub fn is_blank(&self, layer: usize, row: usize, col: usize) -> bool {
        self.is_piece_at(layer, row, col, "")
    }

    /// Per-player boards stack below the shared layer; the caller's seat
    /// offsets the layer index.
    fn is_piece_at(&self, layer: usize, row: usize, col: usize, code: &str) -> bool {
        let state = self.state.lock().unwrap();
        let Some(view) = state.turn.current() else {
            return false;
        };
        let Ok(offset) = usize::try_from(view.your_player_index) else {
            return false;
        };
        state
            .turn
            .state()
            .and_then(|s| s.piece_at(layer + offset, row, col))
            == Some(code)
    }
}
