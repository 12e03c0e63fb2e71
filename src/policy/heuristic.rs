//! The automated opponent.
//!
//! Plays a random legal card, picks random live targets, and remembers what
//! it has personally learned about opponents' hands so its Soldier can guess
//! from memory. Without a memory it guesses whichever rank has the most
//! copies still unseen.
//!
//! A memory is dropped as soon as that opponent's discard pile shows the
//! remembered rank, whether it was played, forced out by a Reaper or an
//! Emperor, or discarded on a revival. Exchanges seen on the table move
//! memories between the two seats.

use rustc_hash::FxHashMap;

use super::{CardEvent, DecisionPolicy};
use crate::cards::{Hand, Rank};
use crate::core::{GameRng, PlayerId};
use crate::table::TableView;

/// A remembered card and how long the holder's discard pile was when we
/// learned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Recollection {
    rank: Rank,
    discards: usize,
}

/// Heuristic decision policy with a private memory of opponents' cards.
#[derive(Clone, Debug, Default)]
pub struct HeuristicPolicy {
    /// Opponent -> rank known or strongly suspected to be in their hand.
    memory: FxHashMap<PlayerId, Recollection>,
}

impl HeuristicPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What this policy believes `opponent` is holding.
    #[must_use]
    pub fn remembered(&self, opponent: PlayerId) -> Option<Rank> {
        self.memory.get(&opponent).map(|r| r.rank)
    }

    /// Record a belief about an opponent's hand as of `table`.
    pub fn remember(&mut self, table: &TableView<'_>, opponent: PlayerId, rank: Rank) {
        let discards = table.player(opponent).discarded().len();
        self.memory.insert(opponent, Recollection { rank, discards });
    }

    /// Drop memories of eliminated seats and of cards their holder has
    /// since discarded.
    fn forget_stale(&mut self, table: &TableView<'_>) {
        self.memory.retain(|&id, memory| {
            let player = table.player(id);
            let gone = player
                .discarded()
                .iter()
                .skip(memory.discards)
                .any(|&r| r == memory.rank);
            if gone {
                tracing::debug!("forgetting {} for {}", memory.rank, id);
            }
            player.is_alive() && !gone
        });
    }

    /// Follow an exchange between two other seats. Only the actor's kept card
    /// and the target's card change hands, so the memories swap with them.
    fn follow_exchange(&mut self, table: &TableView<'_>, me: PlayerId, actor: PlayerId, target: PlayerId) {
        let from_actor = self.memory.remove(&actor);
        let from_target = self.memory.remove(&target);
        if target == me {
            // The actor now holds our old card, which we do not track.
            return;
        }
        if let Some(memory) = from_actor {
            self.remember(table, target, memory.rank);
        }
        if let Some(memory) = from_target {
            self.remember(table, actor, memory.rank);
        }
    }

    fn random_target(&self, table: &TableView<'_>, me: PlayerId, rng: &mut GameRng) -> Option<PlayerId> {
        rng.choose(&table.alive_opponents(me)).copied()
    }

    /// Target and guess for a Soldier.
    fn estimate_opponent_hand(
        &self,
        table: &TableView<'_>,
        me: PlayerId,
        rng: &mut GameRng,
    ) -> (Option<PlayerId>, Rank) {
        // Sorted so the pick only depends on the RNG.
        let mut known: Vec<(PlayerId, Rank)> = self
            .memory
            .iter()
            .filter(|(id, _)| **id != me && table.player(**id).is_alive())
            .map(|(id, memory)| (*id, memory.rank))
            .collect();
        known.sort_unstable();

        if let Some(&(target, rank)) = rng.choose(&known) {
            tracing::debug!("guessing {} from memory of {}", rank, target);
            return (Some(target), rank);
        }

        let hidden = hidden_counts(table, me);
        let most = hidden.iter().map(|(_, n)| *n).max().unwrap_or(0);
        let candidates: Vec<Rank> = hidden
            .iter()
            .filter(|(_, n)| *n == most)
            .map(|(rank, _)| *rank)
            .collect();
        tracing::debug!("hidden cards: {:?}, most likely: {:?}", hidden, candidates);

        let guess = rng.choose(&candidates).copied().unwrap_or(Rank::Hero);
        (self.random_target(table, me, rng), guess)
    }
}

/// An exchange against `target` goes through: a live, unprotected seat
/// holding a card.
fn exchange_lands(table: &TableView<'_>, target: PlayerId) -> bool {
    let player = table.player(target);
    player.is_alive() && !player.is_protected() && !player.hand().is_empty()
}

/// Copies of each rank not yet seen by `me`: the full composition minus
/// `me`'s hand and every discard on the table. Ranks in ascending order.
pub fn hidden_counts(table: &TableView<'_>, me: PlayerId) -> Vec<(Rank, usize)> {
    let seen: Vec<Rank> = table
        .player(me)
        .hand()
        .all()
        .iter()
        .copied()
        .chain(table.all_discards())
        .collect();

    Rank::ALL
        .iter()
        .map(|&rank| {
            let gone = seen.iter().filter(|&&r| r == rank).count();
            (rank, rank.copies().saturating_sub(gone))
        })
        .collect()
}

impl DecisionPolicy for HeuristicPolicy {
    fn select_discard(&mut self, table: &TableView<'_>, me: PlayerId, rng: &mut GameRng) -> CardEvent {
        self.forget_stale(table);
        let hand = table.player(me).hand();
        let discard = if hand.contains(Rank::Hero) {
            hand.the_other(Rank::Hero)
        } else {
            hand.random_one(rng)
        };

        match discard {
            Rank::Soldier => {
                let (target, guess) = self.estimate_opponent_hand(table, me, rng);
                CardEvent {
                    discarded: discard,
                    target,
                    guess: Some(guess),
                }
            }
            Rank::Spirit => {
                let target = self.random_target(table, me, rng);
                // The target ends up holding the card we keep now, unless the
                // exchange is blocked or fizzles.
                if let Some(t) = target.filter(|&t| exchange_lands(table, t)) {
                    self.remember(table, t, hand.the_other(discard));
                }
                CardEvent {
                    discarded: discard,
                    target,
                    guess: None,
                }
            }
            r if r.needs_target() => CardEvent {
                discarded: r,
                target: self.random_target(table, me, rng),
                guess: None,
            },
            r => CardEvent::untargeted(r),
        }
    }

    fn select_from_wise(
        &mut self,
        _table: &TableView<'_>,
        _me: PlayerId,
        candidates: &[Rank],
        rng: &mut GameRng,
    ) -> Rank {
        *rng
            .choose(candidates)
            .unwrap_or_else(|| panic!("select_from_wise called without candidates"))
    }

    fn select_on_public_execution(
        &mut self,
        _me: PlayerId,
        _target: PlayerId,
        revealed: &Hand,
        _rng: &mut GameRng,
    ) -> Rank {
        revealed.larger()
    }

    fn select_on_plague(&mut self, _me: PlayerId, _target: PlayerId, hidden: &Hand, rng: &mut GameRng) -> Rank {
        hidden.random_one(rng)
    }

    fn observe_clairvoyance(&mut self, table: &TableView<'_>, _me: PlayerId, target: PlayerId, seen: Rank) {
        self.remember(table, target, seen);
    }

    fn observe_opponent_event(
        &mut self,
        table: &TableView<'_>,
        me: PlayerId,
        opponent: PlayerId,
        event: &CardEvent,
    ) {
        if self.remembered(opponent) == Some(event.discarded) {
            self.memory.remove(&opponent);
        }
        self.forget_stale(table);
        // The table is seen after the effect resolved, so a protected target
        // means the exchange was blocked.
        if let (Rank::Spirit, Some(target)) = (event.discarded, event.target) {
            if target != opponent && exchange_lands(table, target) {
                self.follow_exchange(table, me, opponent, target);
            }
        }
    }
}
