//! Alive/dead color detection

use tracing::{debug, instrument};

use crate::image_pipeline::automaton::types::{Classification, ColorPair};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::types::{Color, RasterImage};

/// Collects up to `limit` distinct colors in row-major first-encounter order.
///
/// Scanning stops as soon as `limit` colors have been found, so the result
/// only tells whether the image has *at least* `limit` colors.
pub fn distinct_colors(image: &RasterImage, limit: usize) -> Vec<Color> {
    let mut found: Vec<Color> = Vec::with_capacity(limit);
    for &pixel in image.pixels() {
        if found.len() == limit {
            break;
        }
        if !found.contains(&pixel) {
            found.push(pixel);
        }
    }
    found
}

/// Decides the alive/dead color pair of a loaded image.
pub struct ColorClassifier;

impl ColorClassifier {
    /// Classifies `image` as a two-state automaton.
    ///
    /// * two colors: the first one met in a row-major scan is the alive
    ///   candidate, the second the dead candidate
    /// * one color: paired with black, or with white when the color is black
    /// * more than two colors: [`Classification::Unsupported`]
    ///
    /// The candidates are then swapped if the dead one is brighter, so a
    /// supported result always has `luminance(dead) <= luminance(alive)`.
    ///
    /// Zero-area images fail with [`PipelineError::InvalidImage`].
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn classify(&self, image: &RasterImage) -> Result<Classification> {
        let colors = distinct_colors(image, 3);
        debug!("Image colors: {}{}", colors.len(), if colors.len() == 3 { "+" } else { "" });

        let (mut alive, mut dead) = match colors.as_slice() {
            [] => {
                return Err(PipelineError::InvalidImage(format!(
                    "image has no pixels ({}x{})",
                    image.width(),
                    image.height()
                )));
            }
            [only] if *only == Color::BLACK => (*only, Color::WHITE),
            [only] => (*only, Color::BLACK),
            [first, second] => (*first, *second),
            _ => return Ok(Classification::Unsupported),
        };

        if dead.luminance() > alive.luminance() {
            std::mem::swap(&mut alive, &mut dead);
        }

        debug!(alive = %alive, dead = %dead, "Classified image colors");
        Ok(Classification::Supported(ColorPair::new(alive, dead)))
    }
}
