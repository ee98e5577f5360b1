//! Seat identification and per-seat storage.
//!
//! ## PlayerId
//!
//! Seats are numbered clockwise from 0. "Left of" a seat is the next
//! seat in that order, which is how play and the dealer button rotate.
//!
//! ## PlayerMap
//!
//! One entry per seat, backed by a `Vec` and indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat at the table (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat to this player's left at a table of `player_count`.
    ///
    /// ```
    /// use kapow_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).left(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).left(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn left(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// All seats at a table of `player_count`, in seating order.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count <= 255, "At most 255 seats supported");
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Wrap an existing per-seat vector (index = seat).
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(data.len() <= 255, "At most 255 seats supported");
        Self { data }
    }

    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (seat, entry) pairs in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Entries in seating order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_wraps_around_table() {
        assert_eq!(PlayerId::new(0).left(2), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).left(2), PlayerId::new(0));
        assert_eq!(PlayerId::new(3).left(4), PlayerId::new(0));
        assert_eq!(format!("{}", PlayerId::new(2)), "Seat 2");
    }

    #[test]
    fn test_map_from_vec_indexes_by_seat() {
        let mut scores = PlayerMap::from_vec(vec![15, 10, 7]);

        assert_eq!(scores.player_count(), 3);
        assert_eq!(scores[PlayerId::new(1)], 10);

        scores[PlayerId::new(2)] += 3;
        assert_eq!(scores.as_slice(), &[15, 10, 10]);
        assert!(scores.get(PlayerId::new(3)).is_none());
    }

    #[test]
    fn test_map_iter_pairs() {
        let map: PlayerMap<usize> = PlayerMap::new(3, |p| p.index() * 2);
        let pairs: Vec<_> = map.iter().collect();

        assert_eq!(pairs[0], (PlayerId::new(0), &0));
        assert_eq!(pairs[2], (PlayerId::new(2), &4));
    }

    #[test]
    fn test_map_serialization() {
        let map: PlayerMap<Vec<i32>> = PlayerMap::from_vec(vec![vec![3], vec![]]);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
