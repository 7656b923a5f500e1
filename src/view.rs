//! Platform-facing view records.
//!
//! Everything the hosting platform pushes at the client, and everything the
//! client sends back, is a plain serde struct in this module (camelCase on
//! the wire). The types are structurally comparable: change suppression on
//! community updates is defined as `==` over a derived [`UpdateView`], so
//! the `PartialEq` derives here are load-bearing.

use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One seat's player record as supplied by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    /// Platform-wide player identifier. A seat controlled by the platform
    /// itself (an automated opponent) carries an empty id.
    #[serde(default)]
    pub player_id: String,
    /// Name shown to other players.
    #[serde(default)]
    pub display_name: String,
    /// Avatar URL, if the player has one.
    #[serde(default)]
    pub avatar_image_url: String,
}

impl PlayerInfo {
    /// True when this seat is played by the platform rather than a human.
    pub fn is_automated(&self) -> bool {
        self.player_id.is_empty()
    }
}

/// The cell affected by the most recent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Delta {
    /// 0-based row.
    pub row: usize,
    /// 0-based column.
    pub col: usize,
}

/// Match state as this core sees it.
///
/// The board is a stack of layers, each `rows x cols` of piece codes; layer
/// 0 is the shared layer every seat can see, and deeper layers are read
/// per-seat by the presentation queries. Everything else about the state is
/// opaque and owned by the rules oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Board layers in row-major order.
    pub board: Vec<Vec<Vec<String>>>,
    /// Cell changed by the latest move, if any.
    #[serde(default)]
    pub delta: Option<Delta>,
}

impl GameState {
    /// Reads a cell from one board layer, `None` when out of bounds.
    pub fn piece_at(&self, layer: usize, row: usize, col: usize) -> Option<&str> {
        self.board
            .get(layer)
            .and_then(|l| l.get(row))
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }
}

/// What kind of interaction a cell click is.
///
/// Opaque to this core; the rules oracle gives it meaning.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CellAction {
    /// Place or move a piece.
    Move,
    /// Attack an occupied cell.
    Attack,
}

/// A snapshot of the match delivered by the platform.
///
/// Exactly one snapshot is current at a time; ingesting a new one replaces
/// the previous snapshot and resets the per-round bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateView {
    /// Per-seat player records. Empty in community matches.
    #[serde(default)]
    pub players_info: Vec<PlayerInfo>,
    /// Platform play mode discriminator.
    pub play_mode: i64,
    /// Total number of seats.
    pub number_of_players: usize,
    /// Current match state; `None` means the match is on its first move.
    pub state: Option<GameState>,
    /// Seat whose turn it is; negative once the match has ended.
    pub turn_index: i64,
    /// Final scores, present only when the match is over.
    #[serde(default)]
    pub end_match_scores: Option<Vec<i64>>,
    /// The receiving player's own seat.
    pub your_player_index: i64,
}

/// A community-mode snapshot: the match view plus every outstanding
/// proposal, keyed by proposing player id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityView {
    /// The receiving player's own seat.
    pub your_player_index: i64,
    /// Total number of seats.
    pub number_of_players: usize,
    /// Current match state; `None` on the first move.
    pub state: Option<GameState>,
    /// Seat whose turn it is; negative once the match has ended.
    pub turn_index: i64,
    /// Final scores, present only when the match is over.
    #[serde(default)]
    pub end_match_scores: Option<Vec<i64>>,
    /// The receiving player's own record.
    pub your_player_info: PlayerInfo,
    /// Every player's outstanding proposal, if they have one.
    #[serde(default)]
    pub player_id_to_proposal: HashMap<String, Proposal>,
}

impl CommunityView {
    /// Derives the equivalent match snapshot.
    ///
    /// Community snapshots carry no per-seat descriptors, so the derived
    /// view has an empty seat list and can never report an automated turn.
    pub fn to_update_view(&self) -> UpdateView {
        UpdateView {
            players_info: Vec::new(),
            play_mode: self.your_player_index,
            number_of_players: self.number_of_players,
            state: self.state.clone(),
            turn_index: self.turn_index,
            end_match_scores: self.end_match_scores.clone(),
            your_player_index: self.your_player_index,
        }
    }
}

/// A fully-formed move ready for submission.
///
/// Constructed by the rules oracle, validated, submitted, then discarded;
/// never retained across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    /// Final scores when this move ends the match.
    #[serde(default)]
    pub end_match_scores: Option<Vec<i64>>,
    /// The state resulting from the move.
    pub state: GameState,
    /// Seat on turn after this move.
    pub turn_index: i64,
}

/// One player's non-binding vote for a cell, used only in community mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// The proposed cell.
    pub data: Delta,
    /// Human-readable cell label shown in the match chat.
    pub chat_description: String,
    /// The proposing player.
    pub player_info: PlayerInfo,
}

impl Proposal {
    /// Builds a proposal for `delta` on behalf of `player`, labeled with the
    /// 1-based `RxC` cell name shown in chat.
    pub fn for_cell(delta: Delta, player: PlayerInfo) -> Self {
        Self {
            data: delta,
            chat_description: format!("{}x{}", delta.row + 1, delta.col + 1),
            player_info: player,
        }
    }
}
