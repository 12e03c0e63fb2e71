//! Table configuration.
//!
//! A game is described by:
//! - `PlayerConfig`: one seat (display name, interactive or automated)
//! - `GameConfig`: the seats in turn order plus the RNG seed
//!
//! Both derive `serde` so a table can be loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest seats a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a game can start with.
pub const MAX_PLAYERS: usize = 8;

/// Errors raised while validating a `GameConfig`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least {MIN_PLAYERS} players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("at most {MAX_PLAYERS} players are supported, got {0}")]
    TooManyPlayers(usize),

    #[error("player name {0:?} is used by more than one seat")]
    DuplicateName(String),
}

/// Configuration for a single seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name. Empty names are replaced by `Player N`.
    #[serde(default)]
    pub name: String,

    /// Drive this seat from the console instead of the heuristic policy.
    #[serde(default)]
    pub interactive: bool,
}

impl PlayerConfig {
    /// An automated seat.
    pub fn automated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interactive: false,
        }
    }

    /// A seat driven by console input.
    pub fn interactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interactive: true,
        }
    }

    /// The name to display for the seat at `index`.
    #[must_use]
    pub fn display_name(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("Player {}", index + 1)
        } else {
            self.name.clone()
        }
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the single game RNG.
    #[serde(default)]
    pub seed: u64,

    /// Seats in turn order.
    pub players: Vec<PlayerConfig>,
}

impl GameConfig {
    /// Create an empty configuration with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            players: Vec::new(),
        }
    }

    /// Add a seat.
    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.players.push(player);
        self
    }

    /// Check seat count and name uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.players.len();
        if count < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(count));
        }
        if count > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(count));
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for (i, p) in self.players.iter().enumerate() {
            let name = p.display_name(i);
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateName(name));
            }
        }
        Ok(())
    }
}
