//! Terminal conditions and endgame scoring.

use serde::{Deserialize, Serialize};

use super::Game;
use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Nobody left standing (a tied Noble confrontation took out the last two).
    Draw,
    /// Several players tied for the highest card.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    fn from_survivors(mut survivors: Vec<PlayerId>) -> Self {
        match survivors.len() {
            0 => GameResult::Draw,
            1 => GameResult::Winner(survivors.remove(0)),
            _ => GameResult::Winners(survivors),
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// All winning seats.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Winners(ps) => ps.clone(),
            GameResult::Draw => Vec::new(),
        }
    }
}

/// Why the game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The draw pile ran out; the highest card wins.
    DeckExhausted,
    /// Fewer than two players remain.
    LastStanding,
}

/// Final state of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    pub reason: EndReason,
    /// Turns processed, skipped seats included.
    pub turns: usize,
}

impl Game {
    /// Check the terminal conditions and settle the game if one holds.
    ///
    /// Idempotent: once settled, the stored outcome is returned.
    pub fn conclude(&mut self) -> Option<GameOutcome> {
        if let Some(outcome) = &self.outcome {
            return Some(outcome.clone());
        }

        let outcome = if self.alive_count() < 2 {
            let survivors = self.alive_players();
            tracing::info!("game over: {} player(s) left", survivors.len());
            GameOutcome {
                result: GameResult::from_survivors(survivors),
                reason: EndReason::LastStanding,
                turns: self.turn,
            }
        } else if self.deck.is_empty() {
            tracing::info!("deck exhausted, comparing hands");
            GameOutcome {
                result: self.score_exhausted_deck(),
                reason: EndReason::DeckExhausted,
                turns: self.turn,
            }
        } else {
            return None;
        };

        for id in outcome.result.winners() {
            tracing::info!("{} wins", self.players[id].name());
        }
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Highest held card wins; every other survivor is marked dropped.
    ///
    /// A seat that never drew (possible only with a short stacked deck)
    /// holds nothing and loses to any card.
    fn score_exhausted_deck(&mut self) -> GameResult {
        let alive = self.alive_players();
        let held = |game: &Self, id: PlayerId| game.players[id].hand().all().first().copied();
        let best = alive.iter().filter_map(|&id| held(self, id)).max();

        let mut winners = Vec::new();
        for id in alive {
            let card = held(self, id);
            match card {
                Some(card) => tracing::info!("{} holds {} {}", self.players[id].name(), card, card.label()),
                None => tracing::info!("{} holds nothing", self.players[id].name()),
            }
            if card.is_some() && card == best {
                winners.push(id);
            } else {
                self.players[id].dropout();
                tracing::info!("{} is out", self.players[id].name());
            }
        }
        GameResult::from_survivors(winners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));
        assert!(draw.winners().is_empty());

        let tie = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(tie.is_winner(PlayerId::new(0)));
        assert!(!tie.is_winner(PlayerId::new(1)));
        assert_eq!(tie.winners().len(), 2);
    }

    #[test]
    fn test_from_survivors() {
        assert_eq!(GameResult::from_survivors(vec![]), GameResult::Draw);
        assert_eq!(
            GameResult::from_survivors(vec![PlayerId::new(3)]),
            GameResult::Winner(PlayerId::new(3))
        );
    }
}
