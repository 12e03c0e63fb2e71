//! A player's hand: zero, one, or (briefly) two cards.
//!
//! Pairwise helpers panic when called on the wrong cardinality. Those calls
//! mean the turn loop skipped a precondition it always checks, so there is
//! nothing sensible to recover.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rank::Rank;
use crate::core::GameRng;

/// Largest hand any player can hold.
pub const MAX_HAND: usize = 2;

/// Cards held by one player, in the order they arrived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Rank; MAX_HAND]>,
}

impl Hand {
    /// An empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A hand holding the given cards.
    ///
    /// Panics on more than two cards.
    pub fn of(cards: &[Rank]) -> Self {
        assert!(cards.len() <= MAX_HAND, "a hand holds at most {MAX_HAND} cards, got {cards:?}");
        Self {
            cards: SmallVec::from_slice(cards),
        }
    }

    /// Add a drawn card.
    pub fn add(&mut self, card: Rank) {
        assert!(
            self.cards.len() < MAX_HAND,
            "Hand::add on a full hand {:?}",
            self.cards
        );
        self.cards.push(card);
    }

    /// Replace the whole hand with one card.
    pub fn set(&mut self, card: Rank) {
        self.cards.clear();
        self.cards.push(card);
    }

    /// Drop every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// The only card held.
    pub fn single(&self) -> Rank {
        match self.cards.as_slice() {
            [card] => *card,
            other => panic!("Hand::single needs exactly 1 card, hand is {other:?}"),
        }
    }

    /// Given one card of a pair, the other one.
    pub fn the_other(&self, given: Rank) -> Rank {
        match self.cards.as_slice() {
            [a, b] if *a == given => *b,
            [a, b] if *b == given => *a,
            [_, _] => panic!("Hand::the_other: {given} is not in {:?}", self.cards),
            other => panic!("Hand::the_other needs exactly 2 cards, hand is {other:?}"),
        }
    }

    /// The stronger card of a pair.
    pub fn larger(&self) -> Rank {
        let [a, b] = self.pair("larger");
        a.max(b)
    }

    /// Either card of a pair, uniformly.
    pub fn random_one(&self, rng: &mut GameRng) -> Rank {
        let [a, b] = self.pair("random_one");
        if rng.coin_flip() {
            b
        } else {
            a
        }
    }

    /// Card at a position (0 = first drawn).
    pub fn at(&self, index: usize) -> Rank {
        match self.cards.get(index) {
            Some(card) => *card,
            None => panic!("Hand::at({index}) out of range for {:?}", self.cards),
        }
    }

    /// Whether the hand holds `rank`.
    #[must_use]
    pub fn contains(&self, rank: Rank) -> bool {
        self.cards.contains(&rank)
    }

    /// Number of cards held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// No cards held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All held cards, in arrival order.
    #[must_use]
    pub fn all(&self) -> &[Rank] {
        &self.cards
    }

    fn pair(&self, op: &str) -> [Rank; 2] {
        match self.cards.as_slice() {
            [a, b] => [*a, *b],
            other => panic!("Hand::{op} needs exactly 2 cards, hand is {other:?}"),
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
