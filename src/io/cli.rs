//! Command-line interface for rendering scenario files to tile images

use crate::io::configuration::{
    ANIMATION_SUFFIX, DEFAULT_TILE_SIZE, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, SCENARIO_EXTENSION,
};
use crate::io::error::{PathError, Result};
use crate::io::image::RasterRenderer;
use crate::io::progress::ProgressManager;
use crate::io::scenario::Scenario;
use crate::io::visualization::StepRecorder;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pathtile")]
#[command(
    author,
    version,
    about = "Replay route scenarios and render the resulting path tiles"
)]
/// Command-line arguments for the scenario renderer
pub struct Cli {
    /// Scenario file or directory of `.routes` files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Side length of one rendered tile in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Also export an animated GIF with one frame per command
    #[arg(short, long)]
    pub animate: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process scenarios even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates replay and export of scenario files with progress tracking
pub struct ScenarioProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ScenarioProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process every scenario selected by the CLI target
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid, a scenario fails to parse
    /// or replay, or an output cannot be written
    pub fn process(&mut self) -> Result<()> {
        let renderer = RasterRenderer::new(self.cli.tile_size)?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(pm) = &mut self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&renderer, file, index)?;
        }

        if let Some(pm) = &self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            return Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            });
        }

        if !target.is_dir() {
            return Err(PathError::InvalidParameter {
                parameter: "target",
                value: target.display().to_string(),
                reason: "must be a scenario file or a directory".to_string(),
            });
        }

        let entries = std::fs::read_dir(target).map_err(|e| PathError::FileSystem {
            path: target.clone(),
            operation: "read directory",
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| PathError::FileSystem {
                    path: target.clone(),
                    operation: "read directory entry",
                    source: e,
                })?
                .path();
            if is_scenario_file(&path) && self.should_process_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn should_process_file(&self, path: &Path) -> bool {
        !self.cli.skip_existing() || !output_path(path).exists()
    }

    fn process_file(&mut self, renderer: &RasterRenderer, path: &Path, index: usize) -> Result<()> {
        let scenario = Scenario::load(path)?;
        let total_steps = scenario.commands().len();

        if let Some(pm) = &mut self.progress_manager {
            pm.start_scenario(index, path, total_steps);
        }

        let mut recorder = self
            .cli
            .animate
            .then(|| StepRecorder::new(renderer.clone()));
        let mut capture_result = Ok(());
        let mut applied = 0;
        let progress = &mut self.progress_manager;

        let network = scenario.run_with(|network, _| {
            applied += 1;
            if let Some(pm) = progress.as_mut() {
                pm.update_step(index, applied);
            }
            if capture_result.is_ok() {
                if let Some(recorder) = recorder.as_mut() {
                    capture_result = recorder.capture(network.map());
                }
            }
        })?;
        capture_result?;

        renderer.export_png(network.map(), &output_path(path))?;

        if let Some(recorder) = &recorder {
            recorder.export_gif(&animation_path(path), GIF_FRAME_DELAY_MS)?;
        }

        if let Some(pm) = &mut self.progress_manager {
            pm.complete_scenario(index);
        }

        Ok(())
    }
}

fn is_scenario_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(SCENARIO_EXTENSION)
}

/// PNG path rendered for a scenario file
pub fn output_path(scenario_path: &Path) -> PathBuf {
    sibling_with_suffix(scenario_path, OUTPUT_SUFFIX, "png")
}

/// GIF path animated for a scenario file
pub fn animation_path(scenario_path: &Path) -> PathBuf {
    sibling_with_suffix(scenario_path, ANIMATION_SUFFIX, "gif")
}

fn sibling_with_suffix(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
