//! Undo/redo snapshots of transformed images
//!
//! The history is a caller-side model: the generation engine never sees it.
//! Snapshots are immutable and shared through `Arc`, so taking the current
//! image for the next transform does not copy pixels.

use std::sync::Arc;

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::types::RasterImage;

/// Ordered image snapshots with a cursor on the current one.
#[derive(Debug, Clone)]
pub struct ImageHistory {
    snapshots: Vec<Arc<RasterImage>>,
    position: usize,
    capacity: Option<usize>,
}

impl ImageHistory {
    /// Starts a history whose current image is `initial`.
    pub fn new(initial: RasterImage) -> Self {
        Self {
            snapshots: vec![Arc::new(initial)],
            position: 0,
            capacity: None,
        }
    }

    /// Keeps at most `capacity` snapshots, evicting the oldest first.
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity.max(1));
        self.evict();
        self
    }

    pub fn current(&self) -> Arc<RasterImage> {
        Arc::clone(&self.snapshots[self.position])
    }

    /// Records `image` as the new current snapshot, dropping any redo steps.
    pub fn push(&mut self, image: RasterImage) {
        self.snapshots.truncate(self.position + 1);
        self.snapshots.push(Arc::new(image));
        self.position = self.snapshots.len() - 1;
        self.evict();
        debug!(position = self.position, len = self.snapshots.len(), "History push");
    }

    pub fn undo(&mut self) -> Result<Arc<RasterImage>> {
        if !self.can_undo() {
            return Err(PipelineError::NothingToUndo);
        }
        self.position -= 1;
        Ok(self.current())
    }

    pub fn redo(&mut self) -> Result<Arc<RasterImage>> {
        if !self.can_redo() {
            return Err(PipelineError::NothingToRedo);
        }
        self.position += 1;
        Ok(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn evict(&mut self) {
        if let Some(capacity) = self.capacity {
            if self.snapshots.len() > capacity {
                let excess = self.snapshots.len() - capacity;
                self.snapshots.drain(..excess);
                self.position = self.position.saturating_sub(excess);
            }
        }
    }
}
