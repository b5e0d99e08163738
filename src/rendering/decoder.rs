//! Maps a cell's flow signature to the tile art that represents it
//!
//! Only the presence of flow matters, never its sign: a slot that is non-zero
//! means some route leg crosses that edge of the cell. The decision depends on
//! how many edges are active and, for two edges, whether they share an axis.
//!
//! Corner rotations follow the direction table. A corner joining `d` and the
//! next direction clockwise from `d` uses `d`'s rotation:
//!
//! | pair            | rotation |
//! |-----------------|----------|
//! | west + north    | 0°       |
//! | north + east    | 90°      |
//! | east + south    | 180°     |
//! | south + west    | 270°     |
//!
//! Straight pieces use the rotation of the lower slot of their axis: 90° for
//! north/south and 180° for east/west.

use crate::spatial::coordinate::Direction;
use crate::spatial::directions::DirectionSet;
use crate::spatial::grid::FlowSignature;

/// Shape of the path art for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// No flow; nothing to draw
    None,
    /// Flow on a single edge
    Endpoint,
    /// Flow on two edges of one axis
    Straight,
    /// Flow on two edges of different axes
    Corner,
    /// Flow on three or four edges
    Junction,
}

/// Decoded tile art and its orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileVisual {
    /// Art shape
    pub kind: TileKind,
    /// Clockwise rotation in degrees; always 0 for `None` and `Junction`
    pub rotation: u16,
    /// Edges that carry flow
    pub directions: DirectionSet,
}

impl TileVisual {
    /// Visual of a cell without flow
    pub fn none() -> Self {
        Self {
            kind: TileKind::None,
            rotation: 0,
            directions: DirectionSet::new(),
        }
    }

    /// Number of edges that carry flow
    pub fn arm_count(&self) -> usize {
        self.directions.len()
    }

    /// Test if this is a four-way junction
    pub fn is_cross(&self) -> bool {
        self.kind == TileKind::Junction && self.arm_count() == 4
    }

    /// Test if the visual draws anything
    pub fn is_visible(&self) -> bool {
        self.kind != TileKind::None
    }
}

/// Rotation of a corner joining two directions on different axes
///
/// Returns `None` for identical or opposite directions.
pub fn corner_rotation(a: Direction, b: Direction) -> Option<u16> {
    if a.clockwise() == b {
        Some(a.rotation())
    } else if b.clockwise() == a {
        Some(b.rotation())
    } else {
        None
    }
}

/// Decode a flow signature into tile art
///
/// Total and stateless: every input, including signatures no well-formed
/// accumulation could produce, yields a visual, and equal inputs always yield
/// equal outputs.
pub fn decode(signature: FlowSignature) -> TileVisual {
    let directions = signature.active_directions();

    let (kind, rotation) = match directions.len() {
        0 => (TileKind::None, 0),
        1 => (
            TileKind::Endpoint,
            directions.first().map_or(0, Direction::rotation),
        ),
        2 => match directions.pair() {
            Some((a, b)) if a.opposite() == b => (TileKind::Straight, a.rotation()),
            Some((a, b)) => (TileKind::Corner, corner_rotation(a, b).unwrap_or(0)),
            None => (TileKind::None, 0),
        },
        _ => (TileKind::Junction, 0),
    };

    TileVisual {
        kind,
        rotation,
        directions,
    }
}
