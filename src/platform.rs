//! Outgoing submission seam to the hosting platform.

use crate::view::{Move, Proposal};
use tokio::sync::mpsc;
use tracing::warn;

/// A submission leaving the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// A direct move.
    Move(Move),
    /// A community vote, with a resolving move attached once the cell is
    /// quorate.
    Proposal {
        /// The vote itself.
        proposal: Proposal,
        /// The move that resolves the round, if enough others already agree.
        resolve: Option<Move>,
    },
}

/// Sink for submissions to the platform.
///
/// Fire-and-forget from the client's perspective: delivery, acknowledgement
/// and retry are the platform adapter's concern.
pub trait PlatformSink: Send + Sync {
    /// Submits a direct move.
    fn submit_move(&self, mv: Move);

    /// Submits a community proposal, optionally resolving the round.
    fn submit_proposal(&self, proposal: Proposal, resolve: Option<Move>);
}

/// Sink that forwards submissions over an unbounded channel.
///
/// The receiving half is handed to the platform adapter, which drains it
/// onto the wire.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelSink {
    /// Creates a sink and the receiver the platform adapter drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, out: Outbound) {
        if self.tx.send(out).is_err() {
            warn!("platform receiver dropped; submission discarded");
        }
    }
}

impl PlatformSink for ChannelSink {
    fn submit_move(&self, mv: Move) {
        self.forward(Outbound::Move(mv));
    }

    fn submit_proposal(&self, proposal: Proposal, resolve: Option<Move>) {
        self.forward(Outbound::Proposal { proposal, resolve });
    }
}
