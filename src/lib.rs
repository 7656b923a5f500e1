//! Turn and move arbitration for platform-hosted board games.
//!
//! The hosting platform delivers opaque match snapshots and accepts
//! submitted moves; this crate decides whose turn it is, whether the mover
//! is a human or an automated opponent, enforces the
//! one-submission-per-round rule, and (in community matches) collapses
//! many players' cell votes into a single authoritative move.
//!
//! # Architecture
//!
//! - **Turn controller**: owns the current snapshot and the turn predicates
//! - **Move dispatcher**: at most one submission per snapshot, direct or
//!   community routing
//! - **Proposal engine**: per-cell vote tally and quorum promotion
//! - **Seams**: [`MoveOracle`], [`Opponent`] and [`PlatformSink`] traits
//!   for the game rules, the automated opponent and the platform adapter
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use turnstile::{ChannelSink, ClientConfig, FirstFit, GameClient, PlacementOracle};
//!
//! # async fn example() {
//! let oracle = Arc::new(PlacementOracle::new(6, 6, 2));
//! let (sink, mut outbound) = ChannelSink::new();
//! let client = GameClient::new(
//!     ClientConfig::default(),
//!     oracle.clone(),
//!     Arc::new(FirstFit::new(oracle)),
//!     Arc::new(sink),
//! );
//! // The platform adapter pushes snapshots into `client.on_update(...)`
//! // and drains `outbound` onto the wire.
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod community;
mod config;
mod dispatch;
mod opponent;
mod platform;
mod rules;
mod turn;
mod view;

// Crate-level exports - Client facade
pub use client::GameClient;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Automated opponent seam
pub use opponent::{FirstFit, Opponent};

// Crate-level exports - Platform seam
pub use platform::{ChannelSink, Outbound, PlatformSink};

// Crate-level exports - Rules seam
pub use rules::{MoveError, MoveOracle, PlacementOracle};

// Crate-level exports - View records
pub use view::{
    CellAction, CommunityView, Delta, GameState, Move, PlayerInfo, Proposal, UpdateView,
};
