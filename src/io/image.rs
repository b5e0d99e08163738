//! Raster rendering of a flow map and PNG export
//!
//! Each cell becomes a `tile_size` square. Path art comes from a sprite sheet
//! of boolean masks drawn in their unrotated orientation (arms pointing west,
//! corners joining west and north, tees missing east) and turned clockwise by
//! the decoded rotation. Junction overlays are drawn in a second pass.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use ndarray::Array2;

use crate::io::configuration::{
    BUILDING_COLOR, EMPTY_COLOR, JUNCTION_COLOR, MAX_TILE_SIZE, MIN_TILE_SIZE, PATH_COLOR,
};
use crate::io::error::{PathError, Result, invalid_parameter};
use crate::rendering::decoder::{TileKind, TileVisual};
use crate::rendering::sprites::{SpriteKey, SpriteSheet};
use crate::rendering::visitor::{DrawIntent, PathRenderVisitor, TileSink};
use crate::spatial::coordinate::{Coordinate, Direction};
use crate::spatial::grid::{GridFlowMap, TileType};

/// Largest rendered image side in pixels
pub const MAX_IMAGE_DIMENSION: u64 = 16_384;

/// Square boolean sprite mask indexed `[row, col]`
pub type Mask = Array2<bool>;

/// Renders flow maps to RGBA images
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    tile_size: u32,
    sheet: SpriteSheet<Mask>,
}

impl RasterRenderer {
    /// Create a renderer with square tiles of `tile_size` pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the size is outside
    /// `MIN_TILE_SIZE..=MAX_TILE_SIZE`
    pub fn new(tile_size: u32) -> Result<Self> {
        if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&tile_size) {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &format!("must be between {MIN_TILE_SIZE} and {MAX_TILE_SIZE}"),
            ));
        }

        let size = tile_size as usize;
        let mut sheet = SpriteSheet::new();
        sheet.insert(SpriteKey::Endpoint, arm_mask(size, &[Direction::West]));
        sheet.insert(
            SpriteKey::Straight,
            arm_mask(size, &[Direction::West, Direction::East]),
        );
        sheet.insert(
            SpriteKey::Corner,
            arm_mask(size, &[Direction::West, Direction::North]),
        );
        sheet.insert(
            SpriteKey::Tee,
            arm_mask(size, &[Direction::West, Direction::North, Direction::South]),
        );
        sheet.insert(SpriteKey::Cross, arm_mask(size, &Direction::ALL));

        Ok(Self { tile_size, sheet })
    }

    /// Side length of one tile in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Top-left pixel of a cell
    pub const fn pixel_origin(&self, cell: Coordinate) -> (u32, u32) {
        (
            cell.x.unsigned_abs() * self.tile_size,
            cell.y.unsigned_abs() * self.tile_size,
        )
    }

    /// Render the whole map
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the image would exceed `MAX_IMAGE_DIMENSION`
    pub fn render(&self, map: &GridFlowMap) -> Result<RgbaImage> {
        let width = map.width() as u64 * u64::from(self.tile_size);
        let height = map.height() as u64 * u64::from(self.tile_size);
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(invalid_parameter(
                "image",
                &format!("{width}x{height}"),
                &format!("rendered image may not exceed {MAX_IMAGE_DIMENSION} pixels per side"),
            ));
        }

        let mut canvas = Canvas {
            image: RgbaImage::from_pixel(width as u32, height as u32, Rgba(EMPTY_COLOR)),
            renderer: self,
        };

        for cell in map.cells_of_type(TileType::Building) {
            canvas.fill_tile(self.pixel_origin(cell), Rgba(BUILDING_COLOR));
        }

        PathRenderVisitor::new(map)
            .visit_all(|cell| self.pixel_origin(cell))
            .submit(&mut canvas);

        Ok(canvas.image)
    }

    /// Render the map and save it as a PNG
    ///
    /// # Errors
    ///
    /// Returns an error if the image is too large, the parent directory cannot
    /// be created, or the PNG cannot be written
    pub fn export_png(&self, map: &GridFlowMap, output_path: &Path) -> Result<()> {
        let image = self.render(map)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PathError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        image
            .save_with_format(output_path, ImageFormat::Png)
            .map_err(|e| PathError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }

    // Sprite mask turned to match the visual
    fn oriented_mask(&self, visual: &TileVisual) -> Option<Mask> {
        let mask = self.sheet.lookup(visual)?;
        Some(rotate_clockwise(mask, quarter_turns(visual)))
    }
}

// Draw target for one render call
struct Canvas<'a> {
    image: RgbaImage,
    renderer: &'a RasterRenderer,
}

impl Canvas<'_> {
    fn fill_tile(&mut self, origin: (u32, u32), color: Rgba<u8>) {
        let size = self.renderer.tile_size;
        for dy in 0..size {
            for dx in 0..size {
                if let Some(pixel) = self.image.get_pixel_mut_checked(origin.0 + dx, origin.1 + dy)
                {
                    *pixel = color;
                }
            }
        }
    }

    fn blit(&mut self, origin: (u32, u32), mask: &Mask, color: Rgba<u8>) {
        for ((row, col), &set) in mask.indexed_iter() {
            if !set {
                continue;
            }
            if let Some(pixel) = self
                .image
                .get_pixel_mut_checked(origin.0 + col as u32, origin.1 + row as u32)
            {
                *pixel = color;
            }
        }
    }
}

impl TileSink<(u32, u32)> for Canvas<'_> {
    fn draw(&mut self, intent: &DrawIntent<(u32, u32)>) {
        let Some(mask) = self.renderer.oriented_mask(&intent.visual) else {
            return;
        };

        if intent.visual.kind == TileKind::Junction {
            self.blit(intent.position, &mask, Rgba(PATH_COLOR));
            let marker = arm_mask(self.renderer.tile_size as usize, &[]);
            self.blit(intent.position, &marker, Rgba(JUNCTION_COLOR));
        } else {
            self.blit(intent.position, &mask, Rgba(PATH_COLOR));
        }
    }
}

/// Clockwise quarter turns needed to draw a visual from its unrotated sprite
pub fn quarter_turns(visual: &TileVisual) -> usize {
    match visual.kind {
        // Unrotated tee art is missing its east arm
        TileKind::Junction => visual
            .directions
            .missing()
            .map_or(0, |missing| (missing.index() + 3) % 4),
        _ => usize::from(visual.rotation / 90) % 4,
    }
}

/// Mask with a centre body and one arm per listed direction
pub fn arm_mask(size: usize, arms: &[Direction]) -> Mask {
    let band = (size / 3).max(1);
    let start = (size - band) / 2;
    let end = start + band;
    let in_band = |value: usize| (start..end).contains(&value);

    Array2::from_shape_fn((size, size), |(row, col)| {
        let body = in_band(row) && in_band(col);
        body || arms.iter().any(|arm| match arm {
            Direction::North => in_band(col) && row < end,
            Direction::South => in_band(col) && row >= start,
            Direction::West => in_band(row) && col < end,
            Direction::East => in_band(row) && col >= start,
        })
    })
}

/// Rotate a square mask clockwise by `turns` quarter turns
pub fn rotate_clockwise(mask: &Mask, turns: usize) -> Mask {
    let mut rotated = mask.clone();
    for _ in 0..turns % 4 {
        let size = rotated.nrows();
        rotated = Array2::from_shape_fn((size, size), |(row, col)| {
            rotated
                .get([size - 1 - col, row])
                .copied()
                .unwrap_or(false)
        });
    }
    rotated
}
