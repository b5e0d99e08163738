//! Input/output operations and error handling
//!
//! This module contains:
//! - Command-line interface and scenario batch processing
//! - Scenario file parsing and replay
//! - PNG rendering and GIF step animation
//! - Progress display
//! - Error types and configuration constants

/// Command-line interface for scenario rendering
pub mod cli;
/// Limits, palette and output naming constants
pub mod configuration;
/// Error types and context management
pub mod error;
/// Raster rendering and PNG export
pub mod image;
/// Progress tracking for batch processing
pub mod progress;
/// Scenario file parsing and replay
pub mod scenario;
/// GIF export of scenario steps
pub mod visualization;
