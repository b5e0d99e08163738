//! Incremental route flow accumulation and path tile decoding for grid worlds
//!
//! Routes between buildings are recorded per cell as signed counters, one per
//! cardinal direction. Each frame the counters of a cell are decoded into the
//! path art it needs (endpoint, straight, corner or junction) and its
//! rotation, so overlapping routes can be added and removed without ever
//! recomputing the grid from scratch.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Tile decoding, per-route render passes and sprite lookup
pub mod rendering;
/// Routes and the bookkeeping that applies them to the grid
pub mod routing;
/// Coordinates, directions and per-cell flow storage
pub mod spatial;

pub use io::error::{PathError, Result};
pub use rendering::decoder::{TileKind, TileVisual, decode};
pub use routing::network::PathNetwork;
pub use routing::route::{Route, RouteId};
pub use spatial::coordinate::{Coordinate, Direction};
pub use spatial::grid::{FlowSignature, GridFlowMap, TileType};
