//! Moore neighborhood counting

use crate::image_pipeline::raster::types::{Color, RasterImage};

/// Counts the alive cells among the 8 Moore neighbors of `(x, y)`.
///
/// Positions outside the image count as alive. Inside the image a neighbor is
/// alive iff its color is exactly `alive`.
pub fn get_moore_neighbors_alive(image: &RasterImage, alive: Color, x: usize, y: usize) -> u8 {
    let width = image.width() as isize;
    let height = image.height() as isize;
    let (x, y) = (x as isize, y as isize);

    let mut count = 0u8;
    for dy in -1isize..=1 {
        for dx in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                count += 1;
                continue;
            }

            if image.pixels()[(ny * width + nx) as usize] == alive {
                count += 1;
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_sees_eight_alive() {
        let dead_pixel = RasterImage::new(1, 1, Color::BLACK);
        let alive_pixel = RasterImage::new(1, 1, Color::WHITE);

        assert_eq!(get_moore_neighbors_alive(&dead_pixel, Color::WHITE, 0, 0), 8);
        assert_eq!(get_moore_neighbors_alive(&alive_pixel, Color::WHITE, 0, 0), 8);
    }

    #[test]
    fn test_interior_counts_only_alive_color() {
        let mut image = RasterImage::new(3, 3, Color::BLACK);
        image.set(0, 0, Color::WHITE);
        image.set(2, 1, Color::WHITE);
        image.set(1, 2, Color::rgb(1, 1, 1));
        // Own color never counts
        image.set(1, 1, Color::WHITE);

        assert_eq!(get_moore_neighbors_alive(&image, Color::WHITE, 1, 1), 2);
    }

    #[test]
    fn test_corner_and_edge_out_of_bounds() {
        let image = RasterImage::new(3, 3, Color::BLACK);

        assert_eq!(get_moore_neighbors_alive(&image, Color::WHITE, 0, 0), 5);
        assert_eq!(get_moore_neighbors_alive(&image, Color::WHITE, 1, 0), 3);
        assert_eq!(get_moore_neighbors_alive(&image, Color::WHITE, 2, 2), 5);
        assert_eq!(get_moore_neighbors_alive(&image, Color::WHITE, 1, 1), 0);
    }

    #[test]
    fn test_single_row_strip() {
        let image = RasterImage::new(4, 1, Color::BLACK);

        // Rows above and below are outside the image
        assert_eq!(get_moore_neighbors_alive(&image, Color::WHITE, 1, 0), 6);
        assert_eq!(get_moore_neighbors_alive(&image, Color::WHITE, 0, 0), 7);
    }
}
