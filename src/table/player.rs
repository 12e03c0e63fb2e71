//! Per-seat game state.
//!
//! A `Player` owns its hand, its discard history and the three transient
//! flags. Decisions are not made here: the game asks the seat's
//! [`DecisionPolicy`](crate::policy::DecisionPolicy) and applies the answer
//! through the methods below.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Hand, Rank, MAX_HAND};
use crate::core::PlayerId;

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Hand,
    /// Append-only. Persistent vector so table snapshots clone in O(1).
    discarded: Vector<Rank>,
    protected: bool,
    called_wise: bool,
    dropped: bool,
    interactive: bool,
}

impl Player {
    /// Create a seat with an empty hand.
    pub fn new(id: PlayerId, name: impl Into<String>, interactive: bool) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            discarded: Vector::new(),
            protected: false,
            called_wise: false,
            dropped: false,
            interactive,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Direct hand access, for arranging positions before a game starts.
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Every card this player has put down, oldest first.
    #[must_use]
    pub fn discarded(&self) -> &Vector<Rank> {
        &self.discarded
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn set_protected(&mut self, protected: bool) {
        self.protected = protected;
    }

    #[must_use]
    pub fn called_wise(&self) -> bool {
        self.called_wise
    }

    pub fn set_called_wise(&mut self, called_wise: bool) {
        self.called_wise = called_wise;
    }

    /// Eliminated players keep their seat but take no more turns.
    #[must_use]
    pub fn is_dropped(&self) -> bool {
        self.dropped
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.dropped
    }

    /// Seat is driven by console input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Put a drawn card into the hand.
    pub fn take(&mut self, card: Rank) {
        self.hand.add(card);
    }

    /// Discard `card` from a two-card hand, keeping the other.
    pub fn discard_specified(&mut self, card: Rank) {
        assert_eq!(
            self.hand.count(),
            MAX_HAND,
            "{} must hold {MAX_HAND} cards to discard, holds {}",
            self.name,
            self.hand
        );
        let remain = self.hand.the_other(card);
        self.discarded.push_back(card);
        self.hand.set(remain);
    }

    /// The single held card, as revealed to a Fortune Teller.
    pub fn show_for_clairvoyance(&self) -> Rank {
        self.hand.single()
    }

    /// Eliminate: every held card goes to the discard history.
    pub fn dropout(&mut self) {
        self.discarded.extend(self.hand.all().iter().copied());
        self.hand.clear();
        self.dropped = true;
    }

    /// Discard what is left of the hand and continue with the revival card.
    pub fn reincarnate(&mut self, new_card: Rank) {
        self.discarded.extend(self.hand.all().iter().copied());
        self.hand.set(new_card);
    }

    /// Cards this seat accounts for: hand plus discard history.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.count() + self.discarded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_holding(cards: &[Rank]) -> Player {
        let mut p = Player::new(PlayerId::new(0), "Hikaru", false);
        for &c in cards {
            p.take(c);
        }
        p
    }

    #[test]
    fn test_discard_specified() {
        let mut p = player_holding(&[Rank::Sage, Rank::Reaper]);
        p.discard_specified(Rank::Reaper);

        assert_eq!(p.hand().all(), &[Rank::Sage]);
        assert_eq!(p.discarded().iter().copied().collect::<Vec<_>>(), vec![Rank::Reaper]);
    }

    #[test]
    #[should_panic(expected = "must hold 2 cards")]
    fn test_discard_specified_single() {
        let mut p = player_holding(&[Rank::Sage]);
        p.discard_specified(Rank::Sage);
    }

    #[test]
    fn test_dropout_moves_hand() {
        let mut p = player_holding(&[Rank::Hero]);
        p.dropout();

        assert!(p.is_dropped());
        assert!(p.hand().is_empty());
        assert_eq!(p.discarded().back(), Some(&Rank::Hero));
        assert_eq!(p.card_count(), 1);
    }

    #[test]
    fn test_reincarnate_keeps_player_in() {
        let mut p = player_holding(&[Rank::Spirit]);
        p.reincarnate(Rank::Soldier);

        assert!(!p.is_dropped());
        assert_eq!(p.hand().all(), &[Rank::Soldier]);
        assert_eq!(p.discarded().back(), Some(&Rank::Spirit));
    }

    #[test]
    fn test_show_for_clairvoyance() {
        assert_eq!(player_holding(&[Rank::Hero]).show_for_clairvoyance(), Rank::Hero);
    }

    #[test]
    fn test_flags() {
        let mut p = Player::new(PlayerId::new(1), "Nakata", true);
        assert!(p.is_interactive());
        assert!(p.is_alive());

        p.set_protected(true);
        p.set_called_wise(true);
        assert!(p.is_protected());
        assert!(p.called_wise());
    }
}
