//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are numbered in turn order, so the id
//! doubles as the player's position at the table.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier supporting up to 255 players.
///
/// Seat indices are 0-based: the first player to act is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat, in turn order.
///
/// ```
/// use xeno::core::{PlayerId, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
/// wins[PlayerId::new(2)] += 1;
/// assert_eq!(wins[PlayerId::new(2)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Wrap an already-ordered list of per-seat values.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable access to two distinct seats at once.
    ///
    /// Panics if `a == b`.
    pub fn pair_mut(&mut self, a: PlayerId, b: PlayerId) -> (&mut T, &mut T) {
        assert_ne!(a, b, "pair_mut needs two distinct seats");
        let (ia, ib) = (a.index(), b.index());
        if ia < ib {
            let (left, right) = self.data.split_at_mut(ib);
            (&mut left[ia], &mut right[0])
        } else {
            let (left, right) = self.data.split_at_mut(ia);
            (&mut right[0], &mut left[ib])
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all seat IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Seat 1");
        assert!(p0 < p1);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(4, |p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_from_vec_and_iter() {
        let map = PlayerMap::from_vec(vec!["a", "b", "c"]);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], (PlayerId::new(0), &"a"));
        assert_eq!(pairs[2], (PlayerId::new(2), &"c"));
        assert_eq!(map.player_ids().count(), 3);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut map = PlayerMap::from_vec(vec![1, 2, 3]);

        {
            let (a, b) = map.pair_mut(PlayerId::new(0), PlayerId::new(2));
            std::mem::swap(a, b);
        }
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![3, 2, 1]);

        let (a, b) = map.pair_mut(PlayerId::new(2), PlayerId::new(1));
        assert_eq!((*a, *b), (1, 2));
    }

    #[test]
    #[should_panic(expected = "two distinct seats")]
    fn test_pair_mut_same_seat() {
        let mut map = PlayerMap::from_vec(vec![1, 2]);
        let _ = map.pair_mut(PlayerId::new(1), PlayerId::new(1));
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::from_vec(vec![]);
    }
}
