//! # xeno
//!
//! Rule engine for Xeno, a small-deck elimination card game for 2 to 8
//! players.
//!
//! ## Rules in brief
//!
//! 1. **Deck**: 18 cards, ranks 1 to 10. One card is set aside as the
//!    revival card before play.
//!
//! 2. **Turns**: draw one card, then discard one of the two in hand and
//!    resolve its effect. A seat that called the Sage draws three and keeps
//!    one instead.
//!
//! 3. **End**: the game stops when fewer than two players remain, or when
//!    the deck runs out and the highest held card wins.
//!
//! ## Architecture
//!
//! - **Policies**: every choice a seat faces goes through a
//!   [`DecisionPolicy`] trait object bound at construction, so automated and
//!   console-driven seats are interchangeable.
//!
//! - **Single RNG**: the deck shuffle and every random policy choice draw
//!   from one seeded [`GameRng`]. The same seed with automated seats replays
//!   the same game.
//!
//! - **Persistent discards**: discard histories are `im` vectors so
//!   [`TableView`] snapshots stay cheap.
//!
//! ## Modules
//!
//! - `core`: seat ids, per-seat maps, RNG, configuration
//! - `cards`: ranks, the deck and the hand
//! - `table`: per-seat state and the read-only table view
//! - `policy`: the decision trait, heuristic and interactive policies
//! - `game`: turn loop, effect resolution, scoring, builder

pub mod cards;
pub mod core;
pub mod game;
pub mod policy;
pub mod table;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameConfig, GameRng, PlayerConfig, PlayerId, PlayerMap};

pub use crate::cards::{Deck, Hand, Rank, DECK_SIZE, FULL_DECK};

pub use crate::table::{Player, TableView};

pub use crate::policy::{CardEvent, DecisionPolicy, HeuristicPolicy, InteractivePolicy};

pub use crate::game::{
    EndReason, FizzleReason, ForcedOutcome, Game, GameBuilder, GameOutcome, GameResult, Resolution,
    TurnRecord,
};
