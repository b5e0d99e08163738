//! Caller-owned routes and their interior legs

use std::fmt;

use crate::io::error::{Result, invalid_route};
use crate::spatial::coordinate::{Coordinate, Direction};

/// Identity used to track whether a route is connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub u64);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered sequence of grid cells from a source building to a destination
///
/// The first and last steps are building endpoints; only the steps in
/// between carry flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    id: RouteId,
    steps: Vec<Coordinate>,
}

/// One interior step of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    /// Cell the route passes through
    pub cell: Coordinate,
    /// Direction of the previous step, seen from `cell`
    pub incoming: Direction,
    /// Direction of the next step, seen from `cell`
    pub outgoing: Direction,
}

impl Route {
    /// Create a route; validity is checked when it is connected
    pub const fn new(id: RouteId, steps: Vec<Coordinate>) -> Self {
        Self { id, steps }
    }

    /// Route identity
    pub const fn id(&self) -> RouteId {
        self.id
    }

    /// Every step including both endpoints
    pub fn steps(&self) -> &[Coordinate] {
        &self.steps
    }

    /// Steps excluding the two building endpoints
    pub fn interior(&self) -> &[Coordinate] {
        match self.steps.len() {
            0..=2 => &[],
            len => self.steps.get(1..len - 1).unwrap_or(&[]),
        }
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Test if the route has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check the route has at least two steps and no teleports
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoute` naming the first offending step
    pub fn validate(&self) -> Result<()> {
        if self.steps.len() < 2 {
            return Err(invalid_route(
                self.id,
                &format!("needs at least 2 steps, got {}", self.steps.len()),
            ));
        }

        for (index, pair) in self.steps.windows(2).enumerate() {
            if let [from, to] = pair {
                if from.direction_to(*to).is_none() {
                    return Err(invalid_route(
                        self.id,
                        &format!("step {index} {from} is not adjacent to step {} {to}", index + 1),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Validate and decompose into interior legs in route order
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoute` if validation fails
    pub fn legs(&self) -> Result<Vec<Leg>> {
        self.validate()?;

        let legs = self
            .steps
            .windows(3)
            .filter_map(|window| match window {
                [previous, cell, next] => Some(Leg {
                    cell: *cell,
                    incoming: cell.direction_to(*previous)?,
                    outgoing: cell.direction_to(*next)?,
                }),
                _ => None,
            })
            .collect();

        Ok(legs)
    }
}
