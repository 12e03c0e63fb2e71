//! The shared draw pile and the set-aside revival card.
//!
//! The pile is drawn from the front. Returning cards always reshuffles the
//! whole remaining pile, so nobody can track where a returned card went.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::rank::{Rank, FULL_DECK};
use crate::core::GameRng;

/// Most cards a Sage follow-up draw takes.
pub const WISE_DRAW: usize = 3;

/// Draw pile plus the single revival card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Rank>,
    revival: Option<Rank>,
}

impl Deck {
    /// Shuffle the full 18-card composition and reserve the last card as
    /// the revival card.
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut cards = FULL_DECK.to_vec();
        rng.shuffle(&mut cards);
        let revival = cards.pop();

        Self {
            cards: cards.into(),
            revival,
        }
    }

    /// A deck with a fixed draw order. `revival: None` models a game whose
    /// revival card is already spent.
    pub fn stacked(cards: impl IntoIterator<Item = Rank>, revival: Option<Rank>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            revival,
        }
    }

    /// Remove and return the front card.
    ///
    /// Panics on an empty pile: the turn loop checks for exhaustion before
    /// every turn and every effect checks before drawing.
    pub fn draw(&mut self) -> Rank {
        self.cards
            .pop_front()
            .unwrap_or_else(|| panic!("draw from an empty deck"))
    }

    /// Draw up to `n` cards (capped at [`WISE_DRAW`]), fewer if the pile runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<Rank> {
        let n = n.min(WISE_DRAW).min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Put cards back and reshuffle everything that remains.
    pub fn return_and_shuffle(&mut self, cards: impl IntoIterator<Item = Rank>, rng: &mut GameRng) {
        self.cards.extend(cards);
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Take the revival card. Only the first call succeeds.
    pub fn take_revival_card(&mut self) -> Option<Rank> {
        self.revival.take()
    }

    /// Whether the revival card is still set aside.
    #[must_use]
    pub fn revival_available(&self) -> bool {
        self.revival.is_some()
    }

    /// No cards left to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards left to draw.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Remaining cards in draw order.
    pub fn cards(&self) -> impl Iterator<Item = Rank> + '_ {
        self.cards.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::rank::DECK_SIZE;

    #[test]
    fn test_shuffled_reserves_one_card() {
        let mut rng = GameRng::new(3);
        let mut deck = Deck::shuffled(&mut rng);

        assert_eq!(deck.count(), DECK_SIZE - 1);
        assert!(deck.revival_available());

        let mut all: Vec<_> = deck.cards().collect();
        all.push(deck.take_revival_card().unwrap());
        all.sort();
        assert_eq!(all, FULL_DECK.to_vec());
    }

    #[test]
    fn test_draw_front_to_back() {
        let mut deck = Deck::stacked([Rank::Reaper, Rank::Maiden], Some(Rank::Boy));

        assert_eq!(deck.draw(), Rank::Reaper);
        assert_eq!(deck.draw(), Rank::Maiden);
        assert!(deck.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty deck")]
    fn test_draw_empty_panics() {
        let mut deck = Deck::stacked([], None);
        deck.draw();
    }

    #[test]
    fn test_draw_n_caps() {
        let mut deck = Deck::stacked(
            [Rank::Spirit, Rank::Boy, Rank::Maiden, Rank::Sage],
            Some(Rank::Boy),
        );

        assert_eq!(deck.draw_n(5), vec![Rank::Spirit, Rank::Boy, Rank::Maiden]);
        assert_eq!(deck.draw_n(3), vec![Rank::Sage]);
        assert!(deck.draw_n(3).is_empty());
    }

    #[test]
    fn test_revival_only_once() {
        let mut deck = Deck::stacked([], Some(Rank::Noble));

        assert_eq!(deck.take_revival_card(), Some(Rank::Noble));
        assert_eq!(deck.take_revival_card(), None);
        assert!(!deck.revival_available());
    }

    #[test]
    fn test_return_and_shuffle_keeps_cards() {
        let mut rng = GameRng::new(11);
        let mut deck = Deck::stacked([Rank::Sage], Some(Rank::Boy));

        deck.return_and_shuffle([Rank::Spirit, Rank::Maiden], &mut rng);

        let mut cards: Vec<_> = deck.cards().collect();
        cards.sort();
        assert_eq!(cards, vec![Rank::Maiden, Rank::Sage, Rank::Spirit]);
    }

    #[test]
    fn test_return_and_shuffle_moves_returned_cards() {
        // Returned cards land at the back before the shuffle; over many trials
        // they must show up at the front about as often as anything else.
        let mut rng = GameRng::new(99);
        let trials = 3000;
        let mut returned_on_top = 0;

        for _ in 0..trials {
            let mut deck = Deck::stacked([Rank::Boy, Rank::Soldier, Rank::Maiden], None);
            deck.return_and_shuffle([Rank::Hero, Rank::Emperor], &mut rng);
            let top = deck.draw_n(1)[0];
            if top == Rank::Hero || top == Rank::Emperor {
                returned_on_top += 1;
            }
        }

        // Expected 2/5 of trials.
        let ratio = returned_on_top as f64 / trials as f64;
        assert!((0.35..0.45).contains(&ratio), "ratio {ratio}");
    }
}
