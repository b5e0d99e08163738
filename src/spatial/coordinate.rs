//! Grid coordinates and the fixed direction table shared by accumulation and decoding
//!
//! Directions are laid out clockwise starting at north, so that slot `i` and
//! slot `(i + 2) % 4` always share an axis:
//!
//! | slot | direction | delta    | rotation |
//! |------|-----------|----------|----------|
//! | 0    | `North`   | (0, -1)  | 90°      |
//! | 1    | `East`    | (+1, 0)  | 180°     |
//! | 2    | `South`   | (0, +1)  | 270°     |
//! | 3    | `West`    | (-1, 0)  | 0°       |
//!
//! Rotations are clockwise quarter turns of sprite art whose unrotated
//! orientation points west.

use std::fmt;

/// Rotation in degrees for each direction slot
pub const ROTATION_TABLE: [u16; 4] = [90, 180, 270, 0];

/// Integer grid cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    /// Column, growing east
    pub x: i32,
    /// Row, growing south
    pub y: i32,
}

impl Coordinate {
    /// Create a coordinate from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// Number of orthogonal steps between two cells
    pub const fn manhattan_distance(self, other: Self) -> u64 {
        self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64
    }

    /// Direction leading from `self` to an orthogonally adjacent `other`
    ///
    /// Returns `None` when the cells are identical, diagonal, or further apart.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One of the four cardinal directions, in flow slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Slot 0, towards decreasing `y`
    North = 0,
    /// Slot 1, towards increasing `x`
    East = 1,
    /// Slot 2, towards increasing `y`
    South = 2,
    /// Slot 3, towards decreasing `x`
    West = 3,
}

impl Direction {
    /// All directions in slot order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Flow slot index of this direction
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction stored in flow slot `index`, if any
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::South),
            3 => Some(Self::West),
            _ => None,
        }
    }

    /// Direction sharing this direction's axis
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Next direction clockwise
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Unit grid step `(dx, dy)`
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Rendering rotation in degrees
    pub const fn rotation(self) -> u16 {
        rotation_for_slot(self.index())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

/// Rotation in degrees for a raw flow slot index
///
/// Unknown slots map to 0.
pub const fn rotation_for_slot(slot: usize) -> u16 {
    match slot {
        0 => ROTATION_TABLE[0],
        1 => ROTATION_TABLE[1],
        2 => ROTATION_TABLE[2],
        3 => ROTATION_TABLE[3],
        _ => 0,
    }
}
