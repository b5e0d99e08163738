//! Per-frame draw intents for a single route
//!
//! The visitor re-reads the flow map every time it runs; it keeps no state
//! between frames, so overlapping or removed routes are reflected as soon as
//! the map changes.

use crate::rendering::decoder::{TileKind, TileVisual, decode};
use crate::routing::route::Route;
use crate::spatial::coordinate::Coordinate;
use crate::spatial::grid::{GridFlowMap, TileType};

/// One tile for the external renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawIntent<P> {
    /// Grid cell the tile belongs to
    pub cell: Coordinate,
    /// Caller-defined world position of the cell
    pub position: P,
    /// Art and orientation to draw
    pub visual: TileVisual,
}

/// Consumer of draw intents, implemented by the renderer
pub trait TileSink<P> {
    /// Draw one tile
    fn draw(&mut self, intent: &DrawIntent<P>);
}

impl<P, F> TileSink<P> for F
where
    F: FnMut(&DrawIntent<P>),
{
    fn draw(&mut self, intent: &DrawIntent<P>) {
        self(intent);
    }
}

/// Draw intents split into render layers
///
/// `base` holds endpoint, straight and corner tiles; `junctions` holds the
/// crossing overlays drawn on top of them. Both keep route order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPasses<P> {
    /// Path art drawn first
    pub base: Vec<DrawIntent<P>>,
    /// Junction overlays drawn second
    pub junctions: Vec<DrawIntent<P>>,
}

impl<P> Default for RenderPasses<P> {
    fn default() -> Self {
        Self {
            base: Vec::new(),
            junctions: Vec::new(),
        }
    }
}

impl<P> RenderPasses<P> {
    /// Total number of intents in both layers
    pub fn len(&self) -> usize {
        self.base.len() + self.junctions.len()
    }

    /// Test if nothing is drawn
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.junctions.is_empty()
    }

    /// Intents in draw order: base layer, then junctions
    pub fn iter(&self) -> impl Iterator<Item = &DrawIntent<P>> {
        self.base.iter().chain(self.junctions.iter())
    }

    /// Feed every intent to a sink in draw order
    pub fn submit<S: TileSink<P>>(&self, sink: &mut S) {
        for intent in self.iter() {
            sink.draw(intent);
        }
    }

    fn push(&mut self, intent: DrawIntent<P>) {
        if intent.visual.kind == TileKind::Junction {
            self.junctions.push(intent);
        } else {
            self.base.push(intent);
        }
    }
}

/// Read-only render pass over a flow map
#[derive(Debug, Clone, Copy)]
pub struct PathRenderVisitor<'a> {
    map: &'a GridFlowMap,
}

impl<'a> PathRenderVisitor<'a> {
    /// Borrow a map for one render pass
    pub const fn new(map: &'a GridFlowMap) -> Self {
        Self { map }
    }

    /// Test if a cell is inside the grid and currently a path
    pub fn can_draw(&self, coordinate: Coordinate) -> bool {
        self.map.tile_type(coordinate).ok() == Some(TileType::Path)
    }

    /// Decoded visual of a drawable cell
    pub fn visual_at(&self, coordinate: Coordinate) -> Option<TileVisual> {
        if !self.can_draw(coordinate) {
            return None;
        }
        self.map.flow_signature(coordinate).ok().map(decode)
    }

    /// Draw intents for a route's interior cells, in route order
    ///
    /// Endpoints, cells that are not paths, cells outside the grid and cells
    /// that decode to nothing are skipped.
    pub fn visit<P, F>(&self, route: &Route, mut to_world: F) -> RenderPasses<P>
    where
        F: FnMut(Coordinate) -> P,
    {
        let mut passes = RenderPasses::default();
        for &cell in route.interior() {
            let Some(visual) = self.visual_at(cell) else {
                continue;
            };
            if !visual.is_visible() {
                continue;
            }
            passes.push(DrawIntent {
                cell,
                position: to_world(cell),
                visual,
            });
        }
        passes
    }

    /// Draw intents for every path cell of the map, in row-major order
    pub fn visit_all<P, F>(&self, mut to_world: F) -> RenderPasses<P>
    where
        F: FnMut(Coordinate) -> P,
    {
        let mut passes = RenderPasses::default();
        for cell in self.map.path_cells() {
            let Ok(signature) = self.map.flow_signature(cell) else {
                continue;
            };
            let visual = decode(signature);
            if visual.is_visible() {
                passes.push(DrawIntent {
                    cell,
                    position: to_world(cell),
                    visual,
                });
            }
        }
        passes
    }
}
