//! Automaton parameter types

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::types::Color;

/// The two reference colors of a bitonal image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    /// Color of living cells
    pub alive: Color,
    /// Color of dead cells
    pub dead: Color,
}

impl ColorPair {
    pub fn new(alive: Color, dead: Color) -> Self {
        Self { alive, dead }
    }

    /// Swaps the alive and dead roles.
    pub fn reversed(self) -> Self {
        Self {
            alive: self.dead,
            dead: self.alive,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.alive == self.dead {
            return Err(PipelineError::InvalidColorPair);
        }
        Ok(())
    }
}

/// Neighbor-count thresholds for one transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborRule {
    /// A living cell with fewer alive neighbors than this dies
    pub alive_survival_threshold: i32,
    /// A dead cell with more alive neighbors than this is born
    pub dead_birth_threshold: i32,
    /// Write living cells with the dead color and vice versa
    pub invert_output_colors: bool,
}

impl Default for NeighborRule {
    fn default() -> Self {
        Self {
            alive_survival_threshold: 4,
            dead_birth_threshold: 4,
            invert_output_colors: false,
        }
    }
}

impl NeighborRule {
    pub fn new(alive_survival_threshold: i32, dead_birth_threshold: i32) -> Self {
        Self {
            alive_survival_threshold,
            dead_birth_threshold,
            invert_output_colors: false,
        }
    }

    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert_output_colors = invert;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.alive_survival_threshold < 0 {
            return Err(PipelineError::InvalidRule(format!(
                "alive survival threshold is negative: {}",
                self.alive_survival_threshold
            )));
        }
        if self.dead_birth_threshold < 0 {
            return Err(PipelineError::InvalidRule(format!(
                "dead birth threshold is negative: {}",
                self.dead_birth_threshold
            )));
        }
        Ok(())
    }

    /// Colors written for surviving/born and dying/staying-dead cells.
    pub(crate) fn output_colors(&self, colors: ColorPair) -> (Color, Color) {
        if self.invert_output_colors {
            (colors.dead, colors.alive)
        } else {
            (colors.alive, colors.dead)
        }
    }
}

/// Outcome of classifying an image's colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The image has at most two colors and can run as an automaton
    Supported(ColorPair),
    /// The image has more than two colors
    Unsupported,
}

impl Classification {
    pub fn colors(&self) -> Option<ColorPair> {
        match self {
            Classification::Supported(colors) => Some(*colors),
            Classification::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Classification::Supported(_))
    }
}
