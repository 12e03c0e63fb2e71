//! The Xeno game: turn loop, effect dispatch, and scoring.
//!
//! `Game` owns the deck, the seats, the policy bound to each seat and the
//! single RNG. One call to [`Game::process_turn`] plays one seat's turn:
//!
//! 1. Skip the seat if it has been eliminated.
//! 2. Draw (three-and-keep-one after a Sage, otherwise one).
//! 3. With two cards in hand, ask the seat's policy for a discard.
//! 4. Resolve the discarded rank's effect.
//! 5. Tell the other live seats what happened.
//!
//! [`Game::run`] repeats that until the deck is exhausted or fewer than two
//! players remain.

mod builder;
mod effects;
mod scoring;
mod turn;

pub use builder::GameBuilder;
pub use effects::{FizzleReason, ForcedOutcome, Resolution};
pub use scoring::{EndReason, GameOutcome, GameResult};

use serde::{Deserialize, Serialize};

use crate::cards::Deck;
use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::policy::{CardEvent, DecisionPolicy};
use crate::table::{Player, TableView};

/// What happened on one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: usize,
    pub player: PlayerId,
    /// The discard, if the seat had two cards to choose from.
    pub event: Option<CardEvent>,
    pub resolution: Resolution,
}

/// A game in progress.
pub struct Game {
    deck: Deck,
    players: PlayerMap<Player>,
    /// Policy bound to each seat, same indexing as `players`.
    policies: PlayerMap<Box<dyn DecisionPolicy>>,
    rng: GameRng,
    turn: usize,
    /// Set by the first Boy discarded; later Boys trigger a revolution.
    revolution_seen: bool,
    history: Vec<TurnRecord>,
    outcome: Option<GameOutcome>,
}

impl Game {
    pub(crate) fn new(
        deck: Deck,
        players: PlayerMap<Player>,
        policies: PlayerMap<Box<dyn DecisionPolicy>>,
        rng: GameRng,
    ) -> Self {
        assert_eq!(
            players.player_count(),
            policies.player_count(),
            "every seat needs exactly one policy"
        );
        Self {
            deck,
            players,
            policies,
            rng,
            turn: 0,
            revolution_seen: false,
            history: Vec::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Mutable seat access, for arranging a position before play.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// All seats in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Number of turns processed so far.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Seat whose turn comes next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::new((self.turn % self.player_count()) as u8)
    }

    /// Non-eliminated seats in turn order.
    #[must_use]
    pub fn alive_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.is_alive())
            .map(|(id, _)| id)
            .collect()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.values().filter(|p| p.is_alive()).count()
    }

    /// Whether a Boy has been discarded yet this game.
    #[must_use]
    pub fn revolution_seen(&self) -> bool {
        self.revolution_seen
    }

    /// Every processed turn, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Final outcome, once the game has been settled.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Read-only view of the table, as policies see it.
    #[must_use]
    pub fn view(&self) -> TableView<'_> {
        TableView::new(&self.players, &self.deck, self.turn)
    }

    /// Cards the table accounts for: draw pile, hands, discards and the
    /// revival card while unused. Always the full deck size.
    #[must_use]
    pub fn accounted_cards(&self) -> usize {
        self.deck.count()
            + usize::from(self.deck.revival_available())
            + self.players.values().map(Player::card_count).sum::<usize>()
    }

    /// Play until the game is settled.
    pub fn run(&mut self) -> GameOutcome {
        tracing::info!(
            "starting game: seed {}, {} players, {} cards in the deck",
            self.rng.seed(),
            self.player_count(),
            self.deck.count()
        );
        loop {
            if let Some(outcome) = self.conclude() {
                return outcome;
            }
            self.process_turn();
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("deck", &self.deck)
            .field("players", &self.players)
            .field("turn", &self.turn)
            .field("revolution_seen", &self.revolution_seen)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
