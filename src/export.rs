//! Raster rendering of pipeline stages.
//!
//! Presentation-side helpers: every function turns a grid (or point set)
//! into an [`RgbImage`] the caller can save or compose. The core pipeline
//! never touches this module.

use image::{imageops, ImageBuffer, Rgb, RgbImage};

use crate::grid::Grid;
use crate::pipeline::MapData;
use crate::points::Point;
use crate::raster::RegionId;

/// Render an RGB grid one pixel per cell.
pub fn render_color_map(grid: &Grid<[u8; 3]>) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(grid.size as u32, grid.size as u32);
    for (x, y, &rgb) in grid.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(rgb));
    }
    img
}

/// Render a region grid with ids spread across the spectral colormap.
/// Sentinel cells come out black.
pub fn render_region_map(grid: &Grid<RegionId>, region_count: usize) -> RgbImage {
    let span = region_count.saturating_sub(1).max(1) as f32;
    let mut img: RgbImage = ImageBuffer::new(grid.size as u32, grid.size as u32);
    for (x, y, &id) in grid.iter() {
        let color = if id.is_none() {
            [0, 0, 0]
        } else {
            spectral_colormap((id.0 as f32 / span).clamp(0.0, 1.0))
        };
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
    img
}

/// Render a scalar field, mapping ≈[-1, 1] onto the spectral colormap.
pub fn render_scalar_map(grid: &Grid<f32>) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(grid.size as u32, grid.size as u32);
    for (x, y, &value) in grid.iter() {
        let t = ((value + 1.0) * 0.5).clamp(0.0, 1.0);
        img.put_pixel(x as u32, y as u32, Rgb(spectral_colormap(t)));
    }
    img
}

/// Render a boolean mask in two tones of blue (set = deep, unset = pale).
pub fn render_mask(grid: &Grid<bool>) -> RgbImage {
    let set_color = Rgb([25u8, 60, 140]);
    let unset_color = Rgb([214u8, 228, 244]);
    let mut img: RgbImage = ImageBuffer::new(grid.size as u32, grid.size as u32);
    for (x, y, &set) in grid.iter() {
        img.put_pixel(x as u32, y as u32, if set { set_color } else { unset_color });
    }
    img
}

/// Scatter plot of a point set on a white canvas, one 2×2 dot per point.
pub fn render_points(points: &[Point], size: usize) -> RgbImage {
    let mut img: RgbImage =
        ImageBuffer::from_pixel(size as u32, size as u32, Rgb([255u8, 255, 255]));
    let dot = Rgb([20u8, 20, 20]);
    let limit = size.saturating_sub(1) as f64;
    for point in points {
        let px = point.x.clamp(0.0, limit) as u32;
        let py = point.y.clamp(0.0, limit) as u32;
        for dy in 0..2u32 {
            for dx in 0..2u32 {
                let x = (px + dx).min(size as u32 - 1);
                let y = (py + dy).min(size as u32 - 1);
                img.put_pixel(x, y, dot);
            }
        }
    }
    img
}

/// Compose the 3×2 contact sheet of every raster stage: region grid, warped
/// grid, biome bands, sea mask, sea-carved map, final map.
pub fn render_contact_sheet(data: &MapData) -> RgbImage {
    let size = data.final_map.size as u32;
    let region_count = data.voronoi.regions().len();

    let tiles = [
        render_region_map(&data.region_grid, region_count),
        render_region_map(&data.warped_grid, region_count),
        render_color_map(&crate::biomes::color_map(&data.biome_map)),
        render_mask(&data.sea_mask),
        render_color_map(&data.sea_map),
        render_color_map(&data.final_map),
    ];

    let mut sheet: RgbImage = ImageBuffer::new(size * 2, size * 3);
    for (i, tile) in tiles.iter().enumerate() {
        let col = (i % 2) as i64;
        let row = (i / 2) as i64;
        imageops::replace(&mut sheet, tile, col * size as i64, row * size as i64);
    }
    sheet
}

/// Spectral colormap: dark blue through green and yellow to dark red.
fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64],
        [0.20, 0.53, 0.74],
        [0.40, 0.76, 0.65],
        [0.67, 0.87, 0.64],
        [0.90, 0.96, 0.60],
        [1.00, 1.00, 0.75],
        [1.00, 0.88, 0.55],
        [0.99, 0.68, 0.38],
        [0.96, 0.43, 0.26],
        [0.84, 0.24, 0.31],
        [0.62, 0.00, 0.26],
    ];

    let t_scaled = t * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{generate, GenerationConfig};

    #[test]
    fn test_color_map_pixels_match_grid() {
        let mut grid = Grid::new_with(2, [0u8, 0, 0]);
        grid.set(1, 0, [10, 20, 30]);
        let img = render_color_map(&grid);
        assert_eq!(img.get_pixel(1, 0).0, [10, 20, 30]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_contact_sheet_dimensions() {
        let config = GenerationConfig {
            seed: 0,
            point_count: 256,
            blend: true,
            map_size: 64,
            relax_iterations: 1,
        };
        let data = generate(&config).unwrap();
        let sheet = render_contact_sheet(&data);
        assert_eq!(sheet.width(), 128);
        assert_eq!(sheet.height(), 192);
    }
}
