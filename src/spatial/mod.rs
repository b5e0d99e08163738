//! Spatial data structures for route flow
//!
//! This module contains spatial-related functionality including:
//! - Grid coordinates and the fixed direction table
//! - Direction presence sets
//! - Per-cell tile type and flow signature storage

/// Coordinates, directions and rotation angles
pub mod coordinate;
/// Bitset of directions carrying flow
pub mod directions;
/// Bounds-checked tile type and flow storage
pub mod grid;

pub use coordinate::{Coordinate, Direction};
pub use directions::DirectionSet;
pub use grid::{FlowSignature, GridFlowMap, TileType};
