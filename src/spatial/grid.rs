//! Per-cell tile type and directional flow storage
//!
//! The grid owns two parallel 2D arrays indexed `[row, col]` (that is
//! `[y, x]`): the tile type of each cell and its four-slot flow signature.
//! Every accessor is bounds checked and reports `OutOfBounds` rather than
//! touching storage outside the grid.

use ndarray::Array2;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{PathError, Result};
use crate::spatial::coordinate::{Coordinate, Direction};
use crate::spatial::directions::DirectionSet;

/// What currently occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileType {
    /// Nothing placed
    #[default]
    Empty,
    /// At least one route passes through
    Path,
    /// Occupied by a building; never drawn as a path tile
    Building,
}

/// Signed per-direction flow counters for one cell
///
/// A route leg entering from direction `d` adds 1 to slot `d`; a leg leaving
/// towards `d` subtracts 1. Slot arithmetic wraps, so subtracting a delta
/// always restores exactly the value that existed before adding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlowSignature([i32; 4]);

impl FlowSignature {
    /// Signature with every slot at zero
    pub const ZERO: Self = Self([0; 4]);

    /// Build a signature from raw slot values in direction order
    pub const fn new(slots: [i32; 4]) -> Self {
        Self(slots)
    }

    /// Raw slot values in direction order
    pub const fn slots(&self) -> [i32; 4] {
        self.0
    }

    /// Value of one direction's slot
    pub fn get(&self, direction: Direction) -> i32 {
        self.0.get(direction.index()).copied().unwrap_or_default()
    }

    /// Add `delta` to one direction's slot
    pub fn add(&mut self, direction: Direction, delta: i32) {
        if let Some(slot) = self.0.get_mut(direction.index()) {
            *slot = slot.wrapping_add(delta);
        }
    }

    /// Test if every slot is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&slot| slot == 0)
    }

    /// Directions whose slot is non-zero, regardless of sign
    pub fn active_directions(&self) -> DirectionSet {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.get(direction) != 0)
            .collect()
    }
}

/// Fixed-size rectangular grid of tile types and flow signatures
#[derive(Debug, Clone)]
pub struct GridFlowMap {
    tiles: Array2<TileType>,
    flows: Array2<FlowSignature>,
    /// Current dimensions (width, height)
    dimensions: (usize, usize),
    /// Incremented on every successful resize
    generation: u64,
}

impl GridFlowMap {
    /// Create a grid with every cell empty and every signature zero
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is not positive or
    /// exceeds `MAX_GRID_DIMENSION`
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let (cols, rows) = validate_dimensions(width, height)?;
        Ok(Self {
            tiles: Array2::from_elem((rows, cols), TileType::Empty),
            flows: Array2::from_elem((rows, cols), FlowSignature::ZERO),
            dimensions: (cols, rows),
            generation: 0,
        })
    }

    /// Replace the grid, discarding every tile type and signature
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` on a non-positive or oversized request; the
    /// existing grid is left untouched in that case
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        let (cols, rows) = validate_dimensions(width, height)?;
        self.tiles = Array2::from_elem((rows, cols), TileType::Empty);
        self.flows = Array2::from_elem((rows, cols), FlowSignature::ZERO);
        self.dimensions = (cols, rows);
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(width = cols, height = rows, generation = self.generation, "grid resized");
        Ok(())
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.dimensions.0
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.dimensions.1
    }

    /// Resize counter, used to detect bookkeeping that predates a resize
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Test if a coordinate lies within `[0, width) x [0, height)`
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.index_of(coordinate).is_some()
    }

    /// Set the tile type of a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate is outside the grid
    pub fn set_tile_type(&mut self, coordinate: Coordinate, tile_type: TileType) -> Result<()> {
        let index = self.checked_index(coordinate)?;
        if let Some(cell) = self.tiles.get_mut(index) {
            *cell = tile_type;
        }
        Ok(())
    }

    /// Tile type of a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate is outside the grid
    pub fn tile_type(&self, coordinate: Coordinate) -> Result<TileType> {
        let index = self.checked_index(coordinate)?;
        self.tiles
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(coordinate))
    }

    /// Add `delta` to one flow slot of a cell
    ///
    /// Any delta is accepted, including zero, negative and multi-unit values.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate is outside the grid
    pub fn add_flow(
        &mut self,
        coordinate: Coordinate,
        direction: Direction,
        delta: i32,
    ) -> Result<()> {
        let index = self.checked_index(coordinate)?;
        if let Some(signature) = self.flows.get_mut(index) {
            signature.add(direction, delta);
        }
        Ok(())
    }

    /// Copy of a cell's flow signature
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate is outside the grid
    pub fn flow_signature(&self, coordinate: Coordinate) -> Result<FlowSignature> {
        let index = self.checked_index(coordinate)?;
        self.flows
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(coordinate))
    }

    /// Reset a cell's flow signature to zero
    pub(crate) fn clear_flow(&mut self, coordinate: Coordinate) -> Result<()> {
        let index = self.checked_index(coordinate)?;
        if let Some(signature) = self.flows.get_mut(index) {
            *signature = FlowSignature::ZERO;
        }
        Ok(())
    }

    /// Coordinates of every `Path` cell in row-major order
    pub fn path_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells_of_type(TileType::Path)
    }

    /// Coordinates of every cell holding `tile_type` in row-major order
    pub fn cells_of_type(&self, tile_type: TileType) -> impl Iterator<Item = Coordinate> + '_ {
        self.tiles
            .indexed_iter()
            .filter(move |(_, tile)| **tile == tile_type)
            .map(|((row, col), _)| Coordinate::new(col as i32, row as i32))
    }

    // Converts to `[row, col]`, rejecting negative or out-of-range components
    fn index_of(&self, coordinate: Coordinate) -> Option<[usize; 2]> {
        let col = usize::try_from(coordinate.x).ok()?;
        let row = usize::try_from(coordinate.y).ok()?;
        (col < self.width() && row < self.height()).then_some([row, col])
    }

    fn checked_index(&self, coordinate: Coordinate) -> Result<[usize; 2]> {
        self.index_of(coordinate)
            .ok_or_else(|| self.out_of_bounds(coordinate))
    }

    const fn out_of_bounds(&self, coordinate: Coordinate) -> PathError {
        PathError::OutOfBounds {
            coordinate,
            width: self.width(),
            height: self.height(),
        }
    }
}

fn validate_dimensions(width: i32, height: i32) -> Result<(usize, usize)> {
    let limit = MAX_GRID_DIMENSION as i32;
    if width <= 0 || height <= 0 || width > limit || height > limit {
        return Err(PathError::InvalidDimension { width, height });
    }
    Ok((width as usize, height as usize))
}
