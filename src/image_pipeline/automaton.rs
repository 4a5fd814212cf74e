//! Two-color cellular automaton over raster images
//!
//! Classification decides which of an image's colors is alive and which is dead,
//! and the generation engine repeatedly applies the neighbor-count rule to the
//! pixel grid.

pub mod types;
pub mod classify;
pub mod neighbors;
pub mod progress;
pub mod engine;
pub mod worker;

pub use types::{ColorPair, NeighborRule, Classification};
pub use classify::{ColorClassifier, distinct_colors};
pub use neighbors::get_moore_neighbors_alive;
pub use progress::{CancelToken, ChannelProgress, NoProgress, ProgressSink, total_ticks};
pub use engine::GenerationEngine;
pub use worker::{TransformHandle, spawn_transform};
