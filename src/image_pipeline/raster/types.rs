//! In-memory raster image types

use std::fmt;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// An RGBA8 pixel value, compared by exact equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black, `0xFF000000` in ARGB8888
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white, `0xFFFFFFFF` in ARGB8888
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Builds a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Relative luminance on the 0..=255 scale. Alpha is ignored.
    pub fn luminance(self) -> f64 {
        0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

/// A width x height grid of pixels stored in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl RasterImage {
    /// Creates an image with every pixel set to `fill`.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(PipelineError::InvalidImage(format!(
                "expected {} pixels for {}x{}, got {}",
                width * height,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Builds an image from interleaved RGBA8 bytes.
    pub fn from_rgba8(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if data.len() != width * height * 4 {
            return Err(PipelineError::InvalidImage(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                width * height * 4,
                width,
                height,
                data.len()
            )));
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Color::rgba(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self { width, height, pixels })
    }

    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn row(&self, y: usize) -> &[Color] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        let idx = y * self.width + x;
        self.pixels[idx] = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_packing() {
        assert_eq!(Color::from_argb(0xFF000000), Color::BLACK);
        assert_eq!(Color::from_argb(0xFFFFFFFF), Color::WHITE);
        assert_eq!(Color::rgba(0x12, 0x34, 0x56, 0x78).to_argb(), 0x78123456);
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#FF010203");
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(Color::BLACK.luminance(), 0.0);
        assert!((Color::WHITE.luminance() - 255.0).abs() < 1e-9);
        assert!(Color::rgb(0, 255, 0).luminance() > Color::rgb(255, 0, 0).luminance());
        assert!(Color::rgb(255, 0, 0).luminance() > Color::rgb(0, 0, 255).luminance());
    }

    #[test]
    fn test_from_pixels_rejects_wrong_length() {
        let result = RasterImage::from_pixels(2, 2, vec![Color::BLACK; 3]);
        assert!(matches!(result, Err(PipelineError::InvalidImage(_))));
    }

    #[test]
    fn test_rgba8_conversion() {
        let bytes = [255, 0, 0, 255, 0, 0, 255, 128];
        let image = RasterImage::from_rgba8(2, 1, &bytes).unwrap();

        assert_eq!(image.get(0, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(image.get(1, 0), Some(Color::rgba(0, 0, 255, 128)));
        assert_eq!(image.get(2, 0), None);
        assert_eq!(image.to_rgba8(), bytes);
    }

    #[test]
    fn test_set_and_row() {
        let mut image = RasterImage::new(3, 2, Color::WHITE);
        image.set(1, 1, Color::BLACK);

        assert_eq!(image.row(0), &[Color::WHITE; 3]);
        assert_eq!(image.row(1), &[Color::WHITE, Color::BLACK, Color::WHITE]);
    }
}
