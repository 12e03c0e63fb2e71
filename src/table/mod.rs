//! Seats at the table and the read-only view policies decide from.

pub mod player;
pub mod view;

pub use player::Player;
pub use view::TableView;
