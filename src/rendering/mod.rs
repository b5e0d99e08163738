//! Turning accumulated flow into draw intents

/// Flow signature to tile visual decoding
pub mod decoder;
/// Tile visual to sprite handle lookup
pub mod sprites;
/// Per-frame draw intents for routes and whole grids
pub mod visitor;

pub use decoder::{TileKind, TileVisual, decode};
pub use visitor::{DrawIntent, PathRenderVisitor, RenderPasses, TileSink};
