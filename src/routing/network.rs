//! Single owner of a flow map and the routes connected to it
//!
//! `PathNetwork` is the unit a game loop holds: connects and disconnects for a
//! frame go through `&mut self`, and the render pass borrows the map through
//! `visitor()`. The borrow checker enforces that the two never overlap; a
//! caller sharing the network across threads wraps the whole value in one lock.

use crate::io::error::{PathError, Result};
use crate::rendering::visitor::{PathRenderVisitor, RenderPasses};
use crate::routing::accumulator::FlowAccumulator;
use crate::routing::route::{Route, RouteId};
use crate::spatial::coordinate::Coordinate;
use crate::spatial::grid::{GridFlowMap, TileType};

/// Grid plus route bookkeeping, kept in lockstep
#[derive(Debug, Clone)]
pub struct PathNetwork {
    map: GridFlowMap,
    accumulator: FlowAccumulator,
}

impl PathNetwork {
    /// Create an empty network
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` for a non-positive or oversized grid
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Ok(Self {
            map: GridFlowMap::new(width, height)?,
            accumulator: FlowAccumulator::new(),
        })
    }

    /// Read-only view of the grid
    pub const fn map(&self) -> &GridFlowMap {
        &self.map
    }

    /// Read-only view of the route bookkeeping
    pub const fn accumulator(&self) -> &FlowAccumulator {
        &self.accumulator
    }

    /// Connect a route
    ///
    /// # Errors
    ///
    /// See [`FlowAccumulator::connect`]
    pub fn connect(&mut self, route: &Route) -> Result<()> {
        self.accumulator.connect(&mut self.map, route)
    }

    /// Disconnect a route by identity
    ///
    /// # Errors
    ///
    /// See [`FlowAccumulator::disconnect`]
    pub fn disconnect(&mut self, route: RouteId) -> Result<()> {
        self.accumulator.disconnect(&mut self.map, route)
    }

    /// Replace the grid; every connected route is dropped
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` and leaves the network unchanged on a bad request
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        self.map.resize(width, height)?;
        self.accumulator.reset();
        Ok(())
    }

    /// Mark a cell as a building
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if the cell is outside the grid
    /// - `CellOccupied` if a connected route passes through the cell
    pub fn place_building(&mut self, coordinate: Coordinate) -> Result<()> {
        let claims = self.accumulator.claim_count(coordinate);
        if claims > 0 {
            return Err(PathError::CellOccupied { coordinate, claims });
        }
        self.map.set_tile_type(coordinate, TileType::Building)
    }

    /// Remove a building
    ///
    /// The cell becomes a path if connected routes still pass through it and
    /// empty otherwise. Cells that do not hold a building are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the cell is outside the grid
    pub fn clear_building(&mut self, coordinate: Coordinate) -> Result<()> {
        if self.map.tile_type(coordinate)? == TileType::Building {
            let uncovered = if self.accumulator.claim_count(coordinate) > 0 {
                TileType::Path
            } else {
                TileType::Empty
            };
            self.map.set_tile_type(coordinate, uncovered)?;
        }
        Ok(())
    }

    /// Render pass over the current grid state
    pub const fn visitor(&self) -> PathRenderVisitor<'_> {
        PathRenderVisitor::new(&self.map)
    }

    /// Draw intents for one route in the current frame
    pub fn render_route<P, F>(&self, route: &Route, to_world: F) -> RenderPasses<P>
    where
        F: FnMut(Coordinate) -> P,
    {
        self.visitor().visit(route, to_world)
    }
}
