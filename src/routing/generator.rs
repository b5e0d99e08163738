//! Seeded random route generation for stress tests and benchmarks
//!
//! Routes are monotone staircases: every step moves one cell closer to the
//! destination along either axis, so steps are always adjacent and never
//! revisit a cell.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::io::error::{Result, invalid_parameter};
use crate::routing::route::{Route, RouteId};
use crate::spatial::coordinate::{Coordinate, Direction};

/// Produces valid routes inside a `width x height` grid
pub struct RouteGenerator {
    rng: StdRng,
    width: i32,
    height: i32,
    next_id: u64,
}

impl RouteGenerator {
    /// Create a generator with a fixed seed
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless the grid holds at least two cells
    pub fn new(seed: u64, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 || i64::from(width) * i64::from(height) < 2 {
            return Err(invalid_parameter(
                "grid",
                &format!("{width}x{height}"),
                &"route generation needs at least two cells",
            ));
        }

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            width,
            height,
            next_id: 0,
        })
    }

    /// Random route between two distinct cells
    pub fn random_route(&mut self) -> Route {
        let source = self.random_cell();
        let mut destination = self.random_cell();
        while destination == source {
            destination = self.random_cell();
        }
        self.route_between(source, destination)
    }

    /// Random staircase from `source` to `destination`
    ///
    /// Identical endpoints give a single-step route, which `connect` rejects.
    pub fn route_between(&mut self, source: Coordinate, destination: Coordinate) -> Route {
        let horizontal = if destination.x >= source.x {
            Direction::East
        } else {
            Direction::West
        };
        let vertical = if destination.y >= source.y {
            Direction::South
        } else {
            Direction::North
        };

        let mut remaining_x = u64::from(source.x.abs_diff(destination.x));
        let mut remaining_y = u64::from(source.y.abs_diff(destination.y));
        let capacity =
            usize::try_from(source.manhattan_distance(destination) + 1).unwrap_or_default();
        let mut steps = Vec::with_capacity(capacity);
        let mut current = source;
        steps.push(current);

        while remaining_x + remaining_y > 0 {
            let total = remaining_x + remaining_y;
            let step_x = self.rng.random_range(0..total) < remaining_x;
            if step_x {
                current = current.offset(horizontal);
                remaining_x -= 1;
            } else {
                current = current.offset(vertical);
                remaining_y -= 1;
            }
            steps.push(current);
        }

        let id = RouteId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Route::new(id, steps)
    }

    fn random_cell(&mut self) -> Coordinate {
        Coordinate::new(
            self.rng.random_range(0..self.width),
            self.rng.random_range(0..self.height),
        )
    }
}
