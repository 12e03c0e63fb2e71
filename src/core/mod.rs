//! Core engine types: seats, RNG, configuration.
//!
//! These are the building blocks shared by the card model, the policies
//! and the turn loop.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{ConfigError, GameConfig, PlayerConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
