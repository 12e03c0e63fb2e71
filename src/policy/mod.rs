//! Decision policies: who makes each choice a seat faces.
//!
//! Policies are trait-based so a seat can be driven by:
//! - `HeuristicPolicy`: the automated opponent
//! - `InteractivePolicy`: blocking prompts over any `BufRead` / `Write` pair
//!
//! The game calls into the policy bound to a seat at every choice point and
//! applies the answer itself. Randomness comes from the game's single
//! [`GameRng`], passed in at each call.

mod heuristic;
mod interactive;

pub use heuristic::{hidden_counts, HeuristicPolicy};
pub use interactive::{ConsoleInput, InteractivePolicy};

use serde::{Deserialize, Serialize};

use crate::cards::{Hand, Rank};
use crate::core::{GameRng, PlayerId};
use crate::table::TableView;

/// The outcome of a discard decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardEvent {
    /// The card put down.
    pub discarded: Rank,
    /// Opponent the effect is aimed at, for targeted ranks.
    pub target: Option<PlayerId>,
    /// Guessed rank, Soldier only.
    pub guess: Option<Rank>,
}

impl CardEvent {
    /// A discard with no target (Maiden, Sage).
    #[must_use]
    pub fn untargeted(discarded: Rank) -> Self {
        Self {
            discarded,
            target: None,
            guess: None,
        }
    }

    /// A discard aimed at an opponent.
    #[must_use]
    pub fn targeted(discarded: Rank, target: PlayerId) -> Self {
        Self {
            discarded,
            target: Some(target),
            guess: None,
        }
    }

    /// A Soldier investigation.
    #[must_use]
    pub fn investigation(target: PlayerId, guess: Rank) -> Self {
        Self {
            discarded: Rank::Soldier,
            target: Some(target),
            guess: Some(guess),
        }
    }
}

impl std::fmt::Display for CardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.discarded, self.discarded.label())?;
        if let Some(target) = self.target {
            write!(f, " -> {target}")?;
        }
        if let Some(guess) = self.guess {
            write!(f, " guessing {guess}")?;
        }
        Ok(())
    }
}

/// Decision maker bound to one seat.
///
/// ## Contract
///
/// - `select_discard` is only called with exactly two cards in hand and must
///   return one of them. It must never pick the Hero while the other card is
///   not a Hero.
/// - `select_from_wise` must return one of `candidates`.
/// - The forced-discard hooks must return one of the two cards in the pair.
pub trait DecisionPolicy {
    /// Pick the card to discard from a two-card hand, plus target and guess.
    fn select_discard(&mut self, table: &TableView<'_>, me: PlayerId, rng: &mut GameRng) -> CardEvent;

    /// Keep one of up to three cards drawn after playing the Sage.
    fn select_from_wise(
        &mut self,
        table: &TableView<'_>,
        me: PlayerId,
        candidates: &[Rank],
        rng: &mut GameRng,
    ) -> Rank;

    /// Pick which of the target's two face-up cards is discarded.
    fn select_on_public_execution(
        &mut self,
        me: PlayerId,
        target: PlayerId,
        revealed: &Hand,
        rng: &mut GameRng,
    ) -> Rank;

    /// Pick which of the target's two concealed cards is discarded.
    fn select_on_plague(&mut self, me: PlayerId, target: PlayerId, hidden: &Hand, rng: &mut GameRng) -> Rank;

    /// Receive the card a Fortune Teller revealed. Only the acting seat sees it.
    fn observe_clairvoyance(&mut self, _table: &TableView<'_>, _me: PlayerId, _target: PlayerId, _seen: Rank) {}

    /// An opponent's discard has been resolved.
    fn observe_opponent_event(
        &mut self,
        _table: &TableView<'_>,
        _me: PlayerId,
        _opponent: PlayerId,
        _event: &CardEvent,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_event_constructors() {
        let e = CardEvent::investigation(PlayerId::new(1), Rank::Hero);
        assert_eq!(e.discarded, Rank::Soldier);
        assert_eq!(e.target, Some(PlayerId::new(1)));
        assert_eq!(e.guess, Some(Rank::Hero));

        assert_eq!(CardEvent::untargeted(Rank::Maiden).target, None);
        assert_eq!(CardEvent::targeted(Rank::Reaper, PlayerId::new(0)).guess, None);
    }

    #[test]
    fn test_card_event_display() {
        let e = CardEvent::targeted(Rank::Reaper, PlayerId::new(1));
        assert_eq!(e.to_string(), "[5] Reaper (Plague) -> Seat 1");
    }
}
