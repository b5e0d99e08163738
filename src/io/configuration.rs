//! Grid limits, rendering constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Side length of one rendered tile in pixels
pub const DEFAULT_TILE_SIZE: u32 = 9;

/// Smallest tile that still shows arm, body and marker distinctly
pub const MIN_TILE_SIZE: u32 = 5;

/// Largest tile size accepted from the command line
pub const MAX_TILE_SIZE: u32 = 64;

// Palette used by the raster renderer
/// Background colour of empty cells
pub const EMPTY_COLOR: [u8; 4] = [24, 26, 32, 255];
/// Fill colour of building cells
pub const BUILDING_COLOR: [u8; 4] = [148, 112, 72, 255];
/// Colour of path art
pub const PATH_COLOR: [u8; 4] = [210, 206, 190, 255];
/// Colour of the junction overlay marker
pub const JUNCTION_COLOR: [u8; 4] = [232, 96, 64, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Input and output settings
/// Extension of scenario files picked up from a directory
pub const SCENARIO_EXTENSION: &str = "routes";
/// Suffix added to rendered PNG filenames
pub const OUTPUT_SUFFIX: &str = "_tiles";
/// Suffix added to animated GIF filenames
pub const ANIMATION_SUFFIX: &str = "_steps";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
/// Multiplier applied to the last frame's delay so the final state lingers
pub const FINAL_FRAME_HOLD: u32 = 5;
