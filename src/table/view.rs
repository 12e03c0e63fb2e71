//! Read-only view of the table handed to decision policies.
//!
//! Policies see everything through this view, including every hand. The
//! shipped policies only look at their own hand and at public information;
//! keeping to that is part of a policy's contract.

use crate::cards::{Deck, Rank};
use crate::core::{PlayerId, PlayerMap};

use super::player::Player;

/// Borrowed snapshot of players and deck at a decision point.
#[derive(Clone, Copy, Debug)]
pub struct TableView<'a> {
    players: &'a PlayerMap<Player>,
    deck: &'a Deck,
    turn: usize,
}

impl<'a> TableView<'a> {
    pub fn new(players: &'a PlayerMap<Player>, deck: &'a Deck, turn: usize) -> Self {
        Self { players, deck, turn }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &'a Player {
        self.players.get(id)
    }

    /// All seats in turn order.
    pub fn players(&self) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.values()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Non-eliminated seats other than `me`, in turn order.
    #[must_use]
    pub fn alive_opponents(&self, me: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(id, p)| *id != me && p.is_alive())
            .map(|(id, _)| id)
            .collect()
    }

    /// Every discarded card on the table, all seats combined.
    pub fn all_discards(&self) -> impl Iterator<Item = Rank> + 'a {
        self.players.values().flat_map(|p| p.discarded().iter().copied())
    }

    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.deck.count()
    }

    #[must_use]
    pub fn revival_available(&self) -> bool {
        self.deck.revival_available()
    }

    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }
}
