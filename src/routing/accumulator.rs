//! Applies and reverts route flow on a `GridFlowMap`
//!
//! Connecting a route adds `+1` to the incoming slot and `-1` to the outgoing
//! slot of every interior cell, and claims the cell. Disconnecting replays the
//! legs recorded at connect time with the signs flipped, so the net
//! contribution of a connect/disconnect pair is exactly zero regardless of
//! what the caller did to its `Route` in between.
//!
//! A per-cell claim count drives the `Path`/`Empty` toggle: the first claim
//! marks the cell as a path, releasing the last claim empties it again.

use std::collections::HashMap;

use crate::io::error::{PathError, Result};
use crate::routing::route::{Leg, Route, RouteId};
use crate::spatial::coordinate::Coordinate;
use crate::spatial::grid::{GridFlowMap, TileType};

/// Route bookkeeping for one `GridFlowMap`
#[derive(Debug, Default, Clone)]
pub struct FlowAccumulator {
    /// Legs applied for each connected route
    connected: HashMap<RouteId, Vec<Leg>>,
    /// Number of legs currently passing through each claimed cell
    claims: HashMap<Coordinate, u32>,
    /// Map generation the bookkeeping belongs to
    generation: u64,
}

impl FlowAccumulator {
    /// Create an accumulator with no connected routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a route's flow to the map
    ///
    /// Either every leg is applied or none is.
    ///
    /// # Errors
    ///
    /// - `AlreadyConnected` if the route is connected
    /// - `InvalidRoute` if it has fewer than 2 steps or a non-adjacent pair
    /// - `OutOfBounds` if an interior step lies outside the grid
    pub fn connect(&mut self, map: &mut GridFlowMap, route: &Route) -> Result<()> {
        self.sync(map);

        let id = route.id();
        if self.connected.contains_key(&id) {
            return Err(PathError::AlreadyConnected { route: id });
        }

        let legs = route.legs()?;
        if let Some(outside) = legs.iter().find(|leg| !map.contains(leg.cell)) {
            return Err(PathError::OutOfBounds {
                coordinate: outside.cell,
                width: map.width(),
                height: map.height(),
            });
        }

        for leg in &legs {
            map.add_flow(leg.cell, leg.incoming, 1)?;
            map.add_flow(leg.cell, leg.outgoing, -1)?;
            self.claim(map, leg.cell)?;
        }

        tracing::debug!(route = %id, legs = legs.len(), "route connected");
        self.connected.insert(id, legs);
        Ok(())
    }

    /// Revert exactly what `connect` applied for a route
    ///
    /// # Errors
    ///
    /// Returns `RouteNotConnected` if the route is not connected, including
    /// routes that were connected before the map was last resized
    pub fn disconnect(&mut self, map: &mut GridFlowMap, route: RouteId) -> Result<()> {
        self.sync(map);

        let legs = self
            .connected
            .remove(&route)
            .ok_or(PathError::RouteNotConnected { route })?;

        for leg in &legs {
            map.add_flow(leg.cell, leg.incoming, -1)?;
            map.add_flow(leg.cell, leg.outgoing, 1)?;
            self.release(map, leg.cell)?;
        }

        tracing::debug!(route = %route, legs = legs.len(), "route disconnected");
        Ok(())
    }

    /// Test if a route is currently connected
    pub fn is_connected(&self, route: RouteId) -> bool {
        self.connected.contains_key(&route)
    }

    /// Number of connected routes
    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    /// Number of route legs passing through a cell
    pub fn claim_count(&self, coordinate: Coordinate) -> u32 {
        self.claims.get(&coordinate).copied().unwrap_or(0)
    }

    /// Forget every connected route without touching any map
    pub fn reset(&mut self) {
        self.connected.clear();
        self.claims.clear();
    }

    // A resize wipes the map, so bookkeeping from an older generation no longer
    // describes anything stored in it.
    fn sync(&mut self, map: &GridFlowMap) {
        if self.generation == map.generation() {
            return;
        }
        if !self.connected.is_empty() {
            tracing::warn!(
                routes = self.connected.len(),
                generation = map.generation(),
                "discarding routes connected before grid resize"
            );
        }
        self.reset();
        self.generation = map.generation();
    }

    fn claim(&mut self, map: &mut GridFlowMap, cell: Coordinate) -> Result<()> {
        let count = self.claims.entry(cell).or_insert(0);
        *count += 1;
        if *count == 1 && map.tile_type(cell)? == TileType::Empty {
            map.set_tile_type(cell, TileType::Path)?;
        }
        Ok(())
    }

    fn release(&mut self, map: &mut GridFlowMap, cell: Coordinate) -> Result<()> {
        let remaining = match self.claims.get_mut(&cell) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };

        if remaining == 0 {
            self.claims.remove(&cell);
            if map.tile_type(cell)? == TileType::Path {
                map.set_tile_type(cell, TileType::Empty)?;
            }
            map.clear_flow(cell)?;
        }
        Ok(())
    }
}
