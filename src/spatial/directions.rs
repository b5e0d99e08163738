use bitvec::prelude::*;
use std::fmt;

use crate::spatial::coordinate::Direction;

/// Fixed-size bitset recording which directions carry flow through a cell
///
/// Bit `i` corresponds to flow slot `i`. Only the low four bits are ever set,
/// so counts and iteration never see padding bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet {
    bits: BitArr!(for 4, in u8, Lsb0),
}

impl DirectionSet {
    /// Create a set with no directions present
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set containing all four directions
    pub fn all() -> Self {
        Direction::ALL.into_iter().collect()
    }

    /// Insert a direction
    pub fn insert(&mut self, direction: Direction) {
        self.bits.set(direction.index(), true);
    }

    /// Remove a direction
    pub fn remove(&mut self, direction: Direction) {
        self.bits.set(direction.index(), false);
    }

    /// Test direction membership
    pub fn contains(&self, direction: Direction) -> bool {
        self.bits.get(direction.index()).as_deref() == Some(&true)
    }

    /// Test if no directions are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count directions in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Directions in slot order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.bits.iter_ones().filter_map(Direction::from_index)
    }

    /// First direction in slot order, if any
    pub fn first(&self) -> Option<Direction> {
        self.bits.first_one().and_then(Direction::from_index)
    }

    /// The two members, in slot order, when the set has exactly two
    pub fn pair(&self) -> Option<(Direction, Direction)> {
        if self.len() != 2 {
            return None;
        }
        let mut members = self.iter();
        match (members.next(), members.next()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Exactly two directions sharing one axis
    pub fn is_opposite_pair(&self) -> bool {
        self.pair().is_some_and(|(a, b)| a.opposite() == b)
    }

    /// Exactly two directions on different axes
    pub fn is_adjacent_pair(&self) -> bool {
        self.pair().is_some_and(|(a, b)| a.opposite() != b)
    }

    /// The single direction absent from a three-member set
    pub fn missing(&self) -> Option<Direction> {
        if self.len() != 3 {
            return None;
        }
        Direction::ALL.into_iter().find(|d| !self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::new();
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, direction) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{direction}")?;
        }
        write!(f, "}}")
    }
}
