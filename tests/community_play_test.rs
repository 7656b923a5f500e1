//! Community-mode play: vote tallying and quorum promotion.

use std::collections::HashMap;
use std::sync::Arc;
use turnstile::{
    CellAction, ChannelSink, ClientConfig, CommunityView, Delta, FirstFit, GameClient, MoveOracle,
    Outbound, PlacementOracle, PlayerInfo, Proposal,
};

fn player(id: &str) -> PlayerInfo {
    PlayerInfo {
        player_id: id.to_string(),
        display_name: id.to_uppercase(),
        avatar_image_url: String::new(),
    }
}

fn proposals(cells: &[(&str, usize, usize)]) -> HashMap<String, Proposal> {
    cells
        .iter()
        .map(|(id, row, col)| {
            (
                id.to_string(),
                Proposal::for_cell(Delta::new(*row, *col), player(id)),
            )
        })
        .collect()
}

/// A community snapshot as seen by `who`, with the whole group on turn.
fn community_view(
    oracle: &PlacementOracle,
    who: &str,
    outstanding: HashMap<String, Proposal>,
) -> CommunityView {
    CommunityView {
        your_player_index: 0,
        number_of_players: 3,
        state: Some(oracle.initial_state()),
        turn_index: 0,
        end_match_scores: None,
        your_player_info: player(who),
        player_id_to_proposal: outstanding,
    }
}

fn community_client() -> (GameClient, tokio::sync::mpsc::UnboundedReceiver<Outbound>) {
    let oracle = Arc::new(PlacementOracle::new(4, 4, 3));
    let (sink, rx) = ChannelSink::new();
    let client = GameClient::new(
        ClientConfig::default(),
        oracle.clone(),
        Arc::new(FirstFit::new(oracle)),
        Arc::new(sink),
    );
    (client, rx)
}

#[tokio::test(start_paused = true)]
async fn first_vote_goes_out_without_a_resolving_move() {
    let oracle = PlacementOracle::new(4, 4, 3);
    let (client, mut rx) = community_client();

    client.on_community_update(community_view(&oracle, "a", HashMap::new()));
    client.cell_clicked(2, 3, CellAction::Move);

    let Ok(Outbound::Proposal { proposal, resolve }) = rx.try_recv() else {
        panic!("expected a proposal");
    };
    assert_eq!(proposal.data, Delta::new(2, 3));
    assert_eq!(proposal.chat_description, "3x4");
    assert_eq!(proposal.player_info, player("a"));
    assert!(resolve.is_none());
}

#[tokio::test(start_paused = true)]
async fn one_prior_supporter_is_not_enough() {
    let oracle = PlacementOracle::new(4, 4, 3);
    let (client, mut rx) = community_client();

    // Player a already backs (2, 3); b's matching vote must not resolve.
    client.on_community_update(community_view(&oracle, "b", proposals(&[("a", 2, 3)])));
    assert!(client.is_proposal_single(2, 3));

    client.cell_clicked(2, 3, CellAction::Move);
    let Ok(Outbound::Proposal { resolve, .. }) = rx.try_recv() else {
        panic!("expected a proposal");
    };
    assert!(resolve.is_none());
}

#[tokio::test(start_paused = true)]
async fn two_prior_supporters_force_resolution() {
    let oracle = PlacementOracle::new(4, 4, 3);
    let (client, mut rx) = community_client();

    // a and b both back (2, 3); c's vote carries the resolving move.
    client.on_community_update(community_view(
        &oracle,
        "c",
        proposals(&[("a", 2, 3), ("b", 2, 3)]),
    ));
    assert_eq!(client.proposal_count(2, 3), 2);
    assert!(client.is_proposal_pair(2, 3));

    client.cell_clicked(2, 3, CellAction::Move);
    let Ok(Outbound::Proposal { proposal, resolve }) = rx.try_recv() else {
        panic!("expected a proposal");
    };
    assert_eq!(proposal.player_info, player("c"));
    let resolved = resolve.expect("two prior supporters must attach a move");
    assert_eq!(resolved.state.delta, Some(Delta::new(2, 3)));
}

#[tokio::test(start_paused = true)]
async fn two_priors_on_another_cell_do_not_resolve_this_one() {
    let oracle = PlacementOracle::new(4, 4, 3);
    let (client, mut rx) = community_client();

    client.on_community_update(community_view(
        &oracle,
        "c",
        proposals(&[("a", 0, 0), ("b", 0, 0)]),
    ));

    client.cell_clicked(2, 3, CellAction::Move);
    let Ok(Outbound::Proposal { resolve, .. }) = rx.try_recv() else {
        panic!("expected a proposal");
    };
    assert!(resolve.is_none());
}

#[tokio::test(start_paused = true)]
async fn own_outstanding_proposal_blocks_a_second_vote() {
    let oracle = PlacementOracle::new(4, 4, 3);
    let (client, mut rx) = community_client();

    // The platform already has our proposal on file.
    client.on_community_update(community_view(&oracle, "a", proposals(&[("a", 2, 3)])));
    assert!(!client.is_my_turn());

    client.cell_clicked(1, 1, CellAction::Move);
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn vote_only_traffic_still_refreshes_the_tally() {
    let oracle = PlacementOracle::new(4, 4, 3);
    let (client, mut rx) = community_client();

    client.on_community_update(community_view(&oracle, "c", proposals(&[("a", 2, 3)])));
    assert!(client.is_proposal_single(2, 3));

    // Same derived view, same player record: the snapshot stays, but the
    // vote count moves.
    client.on_community_update(community_view(
        &oracle,
        "c",
        proposals(&[("a", 2, 3), ("b", 2, 3)]),
    ));
    assert!(client.is_proposal_pair(2, 3));

    // The round is still open for us, and the tally we vote against is the
    // refreshed one.
    client.cell_clicked(2, 3, CellAction::Move);
    let Ok(Outbound::Proposal { resolve, .. }) = rx.try_recv() else {
        panic!("expected a proposal");
    };
    assert!(resolve.is_some());
}

#[tokio::test(start_paused = true)]
async fn community_proposals_show_as_artwork() {
    let oracle = PlacementOracle::new(4, 4, 3);
    let (client, _rx) = community_client();

    client.on_community_update(community_view(&oracle, "c", proposals(&[("a", 2, 3)])));
    assert!(client.should_show_image(2, 3));
    assert!(!client.should_show_image(0, 0));
}
