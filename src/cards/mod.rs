//! Card model: ranks, the shared deck, and player hands.
//!
//! ## Key Types
//!
//! - `Rank`: one of the ten card identities (1..=10)
//! - `Deck`: draw pile plus the single revival card
//! - `Hand`: 0–2 cards held by one player

pub mod deck;
pub mod hand;
pub mod rank;

pub use deck::{Deck, WISE_DRAW};
pub use hand::{Hand, MAX_HAND};
pub use rank::{Rank, DECK_SIZE, FULL_DECK};
