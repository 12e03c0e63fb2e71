//! Rank effects.
//!
//! | Rank | Effect | Checks protection |
//! |------|--------|-------------------|
//! | 1 Boy | public execution from the second Boy on, Hero may revive | yes |
//! | 2 Soldier | exact guess eliminates the target | no |
//! | 3 Fortune Teller | target's card shown to the actor | no |
//! | 4 Maiden | actor protected until their next turn | - |
//! | 5 Reaper | target draws, actor discards one blind, Hero may revive | yes |
//! | 6 Noble | lower card eliminated, ties eliminate both | no |
//! | 7 Sage | actor draws three next turn | - |
//! | 8 Spirit | actor and target swap cards | yes |
//! | 9 Emperor | target draws, actor discards one face up, Hero eliminated | yes |
//! | 10 Hero | nothing | - |
//!
//! Soldier and Noble ignore protection; whether the rules intend that is
//! still an open question.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Game;
use crate::cards::Rank;
use crate::core::PlayerId;
use crate::policy::CardEvent;
use crate::table::TableView;

/// How a discarded card's effect played out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The seat is eliminated and sat the turn out.
    Skipped,
    /// Only one card in hand, nothing to discard.
    NoDiscard,
    /// The first Boy of the game does nothing.
    FirstRevolution,
    /// The effect could not be carried out.
    Fizzled(FizzleReason),
    /// The target was protected by a Maiden.
    Blocked { target: PlayerId },
    /// A Soldier's guess.
    Investigated { target: PlayerId, hit: bool },
    /// A Fortune Teller looked at the target's card.
    Revealed { target: PlayerId },
    /// The actor is now protected.
    Protected,
    /// A forced discard from Reaper, Emperor or a revolution.
    Forced {
        target: PlayerId,
        discarded: Rank,
        outcome: ForcedOutcome,
    },
    /// A Noble confrontation and who lost it.
    Confronted { target: PlayerId, eliminated: Vec<PlayerId> },
    /// The actor draws three next turn.
    WiseCalled,
    /// Actor and target swapped cards.
    Exchanged { target: PlayerId },
    /// The discarded card has no effect of its own.
    NoEffect,
}

/// Why an effect did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FizzleReason {
    /// No target given, or the target is the actor, out, or has not drawn yet.
    NoTarget,
    /// A Soldier discarded without a guess.
    NoGuess,
    /// The target would have to draw from an empty deck.
    DeckEmpty,
}

/// What a forced discard did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForcedOutcome {
    /// The target keeps playing with the other card.
    Kept,
    /// The Hero fell and the target came back holding the revival card.
    Revived(Rank),
    /// The target is out.
    Eliminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Execution {
    /// Face-up discard chosen by the actor. Losing the Hero is final.
    Emperor,
    /// Triggered by a later Boy. Losing the Hero may revive.
    Revolution,
}

impl Game {
    /// Apply the effect of `event`, discarded by `actor`.
    pub(crate) fn resolve(&mut self, actor: PlayerId, event: &CardEvent) -> Resolution {
        match event.discarded {
            Rank::Boy => self.revolution(actor, event.target),
            Rank::Soldier => self.investigation(actor, event.target, event.guess),
            Rank::FortuneTeller => self.clairvoyance(actor, event.target),
            Rank::Maiden => {
                tracing::info!("{} is protected until their next turn", self.players[actor].name());
                self.players[actor].set_protected(true);
                Resolution::Protected
            }
            Rank::Reaper => self.plague(actor, event.target),
            Rank::Noble => self.confrontation(actor, event.target),
            Rank::Sage => {
                tracing::info!("{} will draw three cards next turn", self.players[actor].name());
                self.players[actor].set_called_wise(true);
                Resolution::WiseCalled
            }
            Rank::Spirit => self.exchange(actor, event.target),
            Rank::Emperor => self.public_execution(actor, event.target, Execution::Emperor),
            Rank::Hero => {
                tracing::warn!("{} discarded the Hero by choice", self.players[actor].name());
                Resolution::NoEffect
            }
        }
    }

    /// A live opponent holding a card, or `None` with the fizzle logged.
    ///
    /// In the first round a seat may not have drawn yet; it cannot be
    /// targeted until it has.
    fn live_target(&self, actor: PlayerId, target: Option<PlayerId>) -> Option<PlayerId> {
        let valid = target.filter(|&t| {
            t != actor
                && t.index() < self.player_count()
                && self.players[t].is_alive()
                && !self.players[t].hand().is_empty()
        });
        if valid.is_none() {
            tracing::info!("no valid target, the effect fizzles");
        }
        valid
    }

    fn is_shielded(&self, target: PlayerId) -> bool {
        let shielded = self.players[target].is_protected();
        if shielded {
            tracing::info!("{} is protected, the effect is blocked", self.players[target].name());
        }
        shielded
    }

    fn revolution(&mut self, actor: PlayerId, target: Option<PlayerId>) -> Resolution {
        let first = !self.revolution_seen;
        self.revolution_seen = true;
        if first {
            tracing::info!("first Boy of the game, no effect");
            return Resolution::FirstRevolution;
        }
        tracing::info!("revolution: the Boy calls a public execution");
        self.public_execution(actor, target, Execution::Revolution)
    }

    fn investigation(&mut self, actor: PlayerId, target: Option<PlayerId>, guess: Option<Rank>) -> Resolution {
        let Some(target) = self.live_target(actor, target) else {
            return Resolution::Fizzled(FizzleReason::NoTarget);
        };
        let Some(guess) = guess else {
            tracing::warn!("Soldier played without a guess");
            return Resolution::Fizzled(FizzleReason::NoGuess);
        };

        tracing::info!(
            "{} investigates {}: {}?",
            self.players[actor].name(),
            self.players[target].name(),
            guess
        );
        let hit = self.players[target].hand().single() == guess;
        if hit {
            tracing::info!("correct, {} is out", self.players[target].name());
            self.players[target].dropout();
        } else {
            tracing::info!("wrong guess");
        }
        Resolution::Investigated { target, hit }
    }

    fn clairvoyance(&mut self, actor: PlayerId, target: Option<PlayerId>) -> Resolution {
        let Some(target) = self.live_target(actor, target) else {
            return Resolution::Fizzled(FizzleReason::NoTarget);
        };

        let seen = self.players[target].show_for_clairvoyance();
        tracing::info!(
            "{} looks at {}'s card",
            self.players[actor].name(),
            self.players[target].name()
        );
        tracing::debug!("{} sees {}", self.players[actor].name(), seen);

        let view = TableView::new(&self.players, &self.deck, self.turn);
        self.policies[actor].observe_clairvoyance(&view, actor, target, seen);
        Resolution::Revealed { target }
    }

    fn plague(&mut self, actor: PlayerId, target: Option<PlayerId>) -> Resolution {
        let Some(target) = self.live_target(actor, target) else {
            return Resolution::Fizzled(FizzleReason::NoTarget);
        };
        if self.is_shielded(target) {
            return Resolution::Blocked { target };
        }
        if self.deck.is_empty() {
            tracing::info!("no cards left to draw, the plague fizzles");
            return Resolution::Fizzled(FizzleReason::DeckEmpty);
        }

        let card = self.deck.draw();
        self.players[target].take(card);
        tracing::info!("plague: {} draws, holds [?][?]", self.players[target].name());
        tracing::debug!("concealed pair: {}", self.players[target].hand());

        let hidden = self.players[target].hand().clone();
        let discarded = self.policies[actor].select_on_plague(actor, target, &hidden, &mut self.rng);
        self.players[target].discard_specified(discarded);
        tracing::info!("{} loses {} {}", self.players[target].name(), discarded, discarded.label());

        let outcome = if discarded == Rank::Hero {
            self.revive_or_eliminate(target)
        } else {
            ForcedOutcome::Kept
        };
        Resolution::Forced {
            target,
            discarded,
            outcome,
        }
    }

    fn public_execution(&mut self, actor: PlayerId, target: Option<PlayerId>, kind: Execution) -> Resolution {
        let Some(target) = self.live_target(actor, target) else {
            return Resolution::Fizzled(FizzleReason::NoTarget);
        };
        if self.is_shielded(target) {
            return Resolution::Blocked { target };
        }
        if self.deck.is_empty() {
            tracing::info!("no cards left to draw, the execution fizzles");
            return Resolution::Fizzled(FizzleReason::DeckEmpty);
        }

        let card = self.deck.draw();
        self.players[target].take(card);
        tracing::info!(
            "public execution: {} reveals {}",
            self.players[target].name(),
            self.players[target].hand()
        );

        let revealed = self.players[target].hand().clone();
        let discarded = self.policies[actor].select_on_public_execution(actor, target, &revealed, &mut self.rng);
        self.players[target].discard_specified(discarded);
        tracing::info!("{} loses {} {}", self.players[target].name(), discarded, discarded.label());

        let outcome = match (discarded, kind) {
            (Rank::Hero, Execution::Emperor) => {
                tracing::info!("the Emperor caught the Hero, {} is out", self.players[target].name());
                self.players[target].dropout();
                ForcedOutcome::Eliminated
            }
            (Rank::Hero, Execution::Revolution) => self.revive_or_eliminate(target),
            _ => ForcedOutcome::Kept,
        };
        Resolution::Forced {
            target,
            discarded,
            outcome,
        }
    }

    fn revive_or_eliminate(&mut self, target: PlayerId) -> ForcedOutcome {
        match self.deck.take_revival_card() {
            Some(card) => {
                tracing::info!("the Hero is reincarnated, {} returns", self.players[target].name());
                tracing::debug!("revival card: {}", card);
                self.players[target].reincarnate(card);
                ForcedOutcome::Revived(card)
            }
            None => {
                tracing::info!("no revival card left, {} is out", self.players[target].name());
                self.players[target].dropout();
                ForcedOutcome::Eliminated
            }
        }
    }

    fn confrontation(&mut self, actor: PlayerId, target: Option<PlayerId>) -> Resolution {
        let Some(target) = self.live_target(actor, target) else {
            return Resolution::Fizzled(FizzleReason::NoTarget);
        };

        let mine = self.players[actor].hand().single();
        let theirs = self.players[target].hand().single();
        tracing::info!(
            "confrontation: {} {} vs {} {}",
            self.players[actor].name(),
            mine,
            self.players[target].name(),
            theirs
        );

        let eliminated = match mine.cmp(&theirs) {
            Ordering::Greater => vec![target],
            Ordering::Less => vec![actor],
            Ordering::Equal => vec![actor, target],
        };
        for &id in &eliminated {
            tracing::info!("{} is out", self.players[id].name());
            self.players[id].dropout();
        }
        Resolution::Confronted { target, eliminated }
    }

    fn exchange(&mut self, actor: PlayerId, target: Option<PlayerId>) -> Resolution {
        let Some(target) = self.live_target(actor, target) else {
            return Resolution::Fizzled(FizzleReason::NoTarget);
        };
        if self.is_shielded(target) {
            return Resolution::Blocked { target };
        }

        let (a, b) = self.players.pair_mut(actor, target);
        let (mine, theirs) = (a.hand().single(), b.hand().single());
        a.hand_mut().set(theirs);
        b.hand_mut().set(mine);
        tracing::info!(
            "{} and {} exchange cards",
            self.players[actor].name(),
            self.players[target].name()
        );
        Resolution::Exchanged { target }
    }
}
