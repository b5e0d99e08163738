//! Frame capture and GIF export of scenario replays

use std::path::Path;

use crate::io::configuration::FINAL_FRAME_HOLD;
use crate::io::error::{PathError, Result};
use crate::io::image::RasterRenderer;
use crate::spatial::grid::GridFlowMap;
use image::{Delay, Frame, RgbaImage};

/// Captures one rendered frame per applied scenario command
///
/// Frames are rendered eagerly so that a later resize does not change what
/// earlier frames show.
pub struct StepRecorder {
    renderer: RasterRenderer,
    frames: Vec<RgbaImage>,
}

impl StepRecorder {
    /// Create a recorder that renders frames with `renderer`
    pub const fn new(renderer: RasterRenderer) -> Self {
        Self {
            renderer,
            frames: Vec::new(),
        }
    }

    /// Render and store the current state of `map`
    ///
    /// # Errors
    ///
    /// Returns an error if the map is too large to render
    pub fn capture(&mut self, map: &GridFlowMap) -> Result<()> {
        let frame = self.renderer.render(map)?;
        self.frames.push(frame);
        Ok(())
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export captured frames as an animated GIF
    ///
    /// Frames smaller than the largest one (because of a resize) are padded
    /// at the bottom and right. The last frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(PathError::InvalidParameter {
                parameter: "frames",
                value: "0".to_string(),
                reason: "No frames captured for animation".to_string(),
            });
        }

        let width = self.frames.iter().map(RgbaImage::width).max().unwrap_or(1);
        let height = self.frames.iter().map(RgbaImage::height).max().unwrap_or(1);
        let last = self.frames.len() - 1;

        let frames = self.frames.iter().enumerate().map(|(index, image)| {
            let delay_ms = if index == last {
                frame_delay_ms.saturating_mul(FINAL_FRAME_HOLD)
            } else {
                frame_delay_ms
            };
            Frame::from_parts(
                pad_to(image, width, height),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            )
        });

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PathError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| PathError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| PathError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}

fn pad_to(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }
    let mut padded = RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        if let Some(target) = padded.get_pixel_mut_checked(x, y) {
            *target = *pixel;
        }
    }
    padded
}
