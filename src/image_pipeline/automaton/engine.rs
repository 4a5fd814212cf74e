//! Generation loop

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::automaton::neighbors::get_moore_neighbors_alive;
use crate::image_pipeline::automaton::progress::{CancelToken, ProgressSink};
use crate::image_pipeline::automaton::types::{ColorPair, NeighborRule};
use crate::image_pipeline::common::config::{DEFAULT_MAX_ITERATIONS, PipelineConfig};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::types::{Color, RasterImage};

/// Runs a fixed number of automaton generations over an image.
///
/// Every generation reads the previous image and writes a freshly allocated
/// one; the input image is never modified.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    max_iterations: Option<usize>,
    parallel: bool,
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self {
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            parallel: false,
        }
    }
}

impl GenerationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            parallel: config.parallel,
        }
    }

    pub fn with_max_iterations(mut self, max: Option<usize>) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Checks every precondition of a transform without running it.
    pub fn validate(
        &self,
        image: &RasterImage,
        colors: ColorPair,
        rule: &NeighborRule,
        iterations: usize,
    ) -> Result<()> {
        if image.is_empty() {
            return Err(PipelineError::InvalidImage(format!(
                "cannot transform a {}x{} image",
                image.width(),
                image.height()
            )));
        }
        colors.validate()?;
        rule.validate()?;
        if let Some(max) = self.max_iterations {
            if iterations > max {
                warn!("Requested {} iterations, maximum is {}", iterations, max);
                return Err(PipelineError::InvalidIterationCount {
                    requested: iterations,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Runs `iterations` generations to completion.
    ///
    /// `progress` receives `1..=iterations * height`, one tick per row.
    /// With zero iterations the result is a copy of `image`.
    pub fn run(
        &self,
        image: &RasterImage,
        colors: ColorPair,
        rule: &NeighborRule,
        iterations: usize,
        progress: &mut dyn ProgressSink,
    ) -> Result<RasterImage> {
        self.execute(image, colors, rule, iterations, progress, None)
    }

    /// Like [`run`](Self::run), but stops with [`PipelineError::Cancelled`]
    /// once `cancel` is set. The token is checked before every row, or before
    /// every generation in parallel mode.
    pub fn run_with_cancel(
        &self,
        image: &RasterImage,
        colors: ColorPair,
        rule: &NeighborRule,
        iterations: usize,
        progress: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<RasterImage> {
        self.execute(image, colors, rule, iterations, progress, Some(cancel))
    }

    #[instrument(
        skip(self, image, colors, rule, progress, cancel),
        fields(width = image.width(), height = image.height(), parallel = self.parallel)
    )]
    fn execute(
        &self,
        image: &RasterImage,
        colors: ColorPair,
        rule: &NeighborRule,
        iterations: usize,
        progress: &mut dyn ProgressSink,
        cancel: Option<&CancelToken>,
    ) -> Result<RasterImage> {
        self.validate(image, colors, rule, iterations)?;

        info!(
            alive = %colors.alive,
            dead = %colors.dead,
            survival = rule.alive_survival_threshold,
            birth = rule.dead_birth_threshold,
            invert = rule.invert_output_colors,
            "Starting transform"
        );

        let mut current = image.clone();
        let mut tick = 0u64;

        for generation in 0..iterations {
            let _span = tracing::debug_span!("generation", index = generation).entered();

            current = if self.parallel {
                if cancel.is_some_and(CancelToken::is_cancelled) {
                    return Err(PipelineError::Cancelled);
                }
                let next = step_parallel(&current, colors, rule);
                for _ in 0..current.height() {
                    tick += 1;
                    progress.report(tick);
                }
                next
            } else {
                step_sequential(&current, colors, rule, progress, &mut tick, cancel)?
            };

            debug!("Generation {} complete", generation + 1);
        }

        info!(iterations, ticks = tick, "Transform complete");
        Ok(current)
    }
}

/// Evaluates row `y` of `prev` into `row`.
fn evolve_row(prev: &RasterImage, y: usize, colors: ColorPair, rule: &NeighborRule, row: &mut [Color]) {
    let (out_alive, out_dead) = rule.output_colors(colors);
    let src = prev.row(y);

    for (x, out) in row.iter_mut().enumerate() {
        let alive_cells = get_moore_neighbors_alive(prev, colors.alive, x, y) as i32;

        *out = if src[x] == colors.alive {
            if alive_cells < rule.alive_survival_threshold {
                out_dead
            } else {
                out_alive
            }
        } else if alive_cells > rule.dead_birth_threshold {
            out_alive
        } else {
            out_dead
        };
    }
}

fn step_sequential(
    prev: &RasterImage,
    colors: ColorPair,
    rule: &NeighborRule,
    progress: &mut dyn ProgressSink,
    tick: &mut u64,
    cancel: Option<&CancelToken>,
) -> Result<RasterImage> {
    let width = prev.width();
    let mut next = RasterImage::new(width, prev.height(), colors.dead);

    for (y, row) in next.pixels_mut().chunks_mut(width).enumerate() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(PipelineError::Cancelled);
        }
        evolve_row(prev, y, colors, rule, row);
        *tick += 1;
        progress.report(*tick);
    }

    Ok(next)
}

fn step_parallel(prev: &RasterImage, colors: ColorPair, rule: &NeighborRule) -> RasterImage {
    let width = prev.width();
    let mut next = RasterImage::new(width, prev.height(), colors.dead);

    next.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| evolve_row(prev, y, colors, rule, row));

    next
}
