//! Routes and flow accumulation
//!
//! Key components:
//! - `route`: caller-owned routes, validation and interior legs
//! - `accumulator`: applies and reverts route flow on the grid
//! - `network`: single owner of a grid and its connected routes
//! - `generator`: seeded random routes for stress testing

/// Applies and reverts route flow with per-cell claim counting
pub mod accumulator;
/// Seeded random route generation
pub mod generator;
/// Grid and route bookkeeping owned together
pub mod network;
/// Route identity, steps and legs
pub mod route;

pub use accumulator::FlowAccumulator;
pub use network::PathNetwork;
pub use route::{Leg, Route, RouteId};
