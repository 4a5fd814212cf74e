//! Background transform thread

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::image_pipeline::automaton::engine::GenerationEngine;
use crate::image_pipeline::automaton::progress::{CancelToken, ChannelProgress, total_ticks};
use crate::image_pipeline::automaton::types::{ColorPair, NeighborRule};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::types::RasterImage;

/// A transform running on its own thread.
pub struct TransformHandle {
    progress: Receiver<u64>,
    total: u64,
    cancel: CancelToken,
    thread: JoinHandle<Result<RasterImage>>,
}

impl TransformHandle {
    /// Progress ticks in order; the channel closes when the worker finishes.
    pub fn progress(&self) -> &Receiver<u64> {
        &self.progress
    }

    /// Tick value reached when every generation is done.
    pub fn total_ticks(&self) -> u64 {
        self.total
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the worker and returns the final image.
    pub fn join(self) -> Result<RasterImage> {
        self.thread.join().map_err(|_| PipelineError::WorkerPanicked)?
    }
}

/// Starts `engine.run` on a new thread, taking ownership of `image`.
///
/// The worker runs to completion unless [`TransformHandle::cancel`] is called.
pub fn spawn_transform(
    engine: GenerationEngine,
    image: RasterImage,
    colors: ColorPair,
    rule: NeighborRule,
    iterations: usize,
) -> TransformHandle {
    let (tx, rx) = mpsc::channel();
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let total = total_ticks(iterations, image.height());

    let thread = thread::spawn(move || {
        debug!("Transform worker started");
        let mut sink = ChannelProgress(tx);
        engine.run_with_cancel(&image, colors, &rule, iterations, &mut sink, &token)
    });

    TransformHandle {
        progress: rx,
        total,
        cancel,
        thread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raster::types::Color;

    #[test]
    fn test_worker_streams_progress_and_returns_image() {
        let image = RasterImage::new(2, 2, Color::BLACK);
        let handle = spawn_transform(
            GenerationEngine::new(),
            image,
            ColorPair::new(Color::WHITE, Color::BLACK),
            NeighborRule::new(2, 3),
            3,
        );

        assert_eq!(handle.total_ticks(), 6);
        let ticks: Vec<u64> = handle.progress().iter().collect();
        assert_eq!(ticks, vec![1, 2, 3, 4, 5, 6]);

        let output = handle.join().unwrap();
        assert_eq!(output.width(), 2);
        assert_eq!(output.height(), 2);
    }

    #[test]
    fn test_worker_reports_validation_errors() {
        let handle = spawn_transform(
            GenerationEngine::new(),
            RasterImage::new(2, 2, Color::BLACK),
            ColorPair::new(Color::WHITE, Color::BLACK),
            NeighborRule::new(-1, 3),
            1,
        );

        assert!(matches!(handle.join(), Err(PipelineError::InvalidRule(_))));
    }

    #[test]
    fn test_cancelled_before_start() {
        let handle = spawn_transform(
            GenerationEngine::new().with_max_iterations(None),
            RasterImage::new(64, 64, Color::BLACK),
            ColorPair::new(Color::WHITE, Color::BLACK),
            NeighborRule::new(2, 3),
            100_000,
        );
        handle.cancel();

        assert!(matches!(handle.join(), Err(PipelineError::Cancelled)));
    }
}
