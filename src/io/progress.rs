//! Scenario replay progress with automatic batching for large file sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:<24} [{bar:30.green/white}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Scenarios: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

// Display state of one scenario: name, applied steps, total steps
#[derive(Debug, Clone, Default)]
struct ScenarioState {
    name: String,
    applied: usize,
    total: usize,
}

/// Progress display for a run over one or more scenario files
///
/// Shows one bar per scenario for small runs. Larger runs get an overall
/// batch bar plus a rolling window of the most recent scenarios.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    scenario_bars: Vec<ProgressBar>,
    states: Vec<ScenarioState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            scenario_bars: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Create bars for `scenario_count` files
    pub fn initialize(&mut self, scenario_count: usize) {
        if scenario_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(scenario_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..scenario_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(STEP_STYLE.clone());
            self.scenario_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register a scenario about to be replayed
    pub fn start_scenario(&mut self, index: usize, path: &Path, total_steps: usize) {
        if index >= self.states.len() {
            self.states.resize(index + 1, ScenarioState::default());
        }
        if let Some(state) = self.states.get_mut(index) {
            *state = ScenarioState {
                name: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
                applied: 0,
                total: total_steps,
            };
        }
        self.update_bars();
    }

    /// Report the number of commands applied so far
    pub fn update_step(&mut self, index: usize, applied: usize) {
        if let Some(state) = self.states.get_mut(index) {
            state.applied = applied.min(state.total);
        }
        self.update_bars();
    }

    /// Mark a scenario as rendered
    pub fn complete_scenario(&mut self, index: usize) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.applied = state.total;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All scenarios rendered");
        }
        if let Err(error) = self.multi_progress.clear() {
            tracing::debug!(%error, "failed to clear progress bars");
        }
    }

    // Shows the most recent scenarios in the available bars
    fn update_bars(&self) {
        let active: Vec<&ScenarioState> = self
            .states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (slot, bar) in self.scenario_bars.iter().enumerate() {
            match visible.get(slot) {
                Some(state) => {
                    bar.set_length(state.total as u64);
                    bar.set_position(state.applied as u64);
                    bar.set_message(format!("{}/{} steps", state.applied, state.total));
                    bar.set_prefix(state.name.clone());
                }
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_message(String::new());
                    bar.set_prefix(String::new());
                }
            }
        }
    }
}
