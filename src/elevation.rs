//! Sea-level carving and elevation shading.

use crate::biomes::Biome;
use crate::grid::Grid;
use crate::noise_field::{noise_field, NoiseParams};

// Elevation field: same frequency as the boundary-warp field, more octaves
// for finer coastline detail.
const ELEVATION_OCTAVES: u32 = 8;

/// Everything below this elevation is sea.
pub const SEA_LEVEL: f32 = 0.0;

/// Brightness drops by one step per this much absolute elevation.
const SHADE_STEP: f32 = 0.1;

/// Sample the elevation field for a map. Shares the generation seed with the
/// boundary-warp field, so toggling the blend option never changes the
/// coastline.
pub fn elevation_field(size: usize, seed: u32) -> Grid<f32> {
    noise_field(size, seed, &NoiseParams::with_octaves(ELEVATION_OCTAVES))
}

/// Cells below [`SEA_LEVEL`].
pub fn sea_mask(elevation: &Grid<f32>) -> Grid<bool> {
    let mut mask = Grid::new_with(elevation.size, false);
    for (x, y, &height) in elevation.iter() {
        mask.set(x, y, height < SEA_LEVEL);
    }
    mask
}

/// Recolor masked cells to water, leaving land biomes untouched.
pub fn carve_sea(biomes: &Grid<Biome>, mask: &Grid<bool>) -> Grid<Biome> {
    let mut carved = biomes.clone();
    for (x, y, &is_sea) in mask.iter() {
        if is_sea {
            carved.set(x, y, Biome::Water);
        }
    }
    carved
}

/// Darken each cell by 10% per 0.1 of absolute elevation, in discrete steps.
/// The factor bottoms out at zero, so deep cells fade to black rather than
/// wrapping.
pub fn shade_by_elevation(colors: &Grid<[u8; 3]>, elevation: &Grid<f32>) -> Grid<[u8; 3]> {
    let mut shaded = Grid::new_with(colors.size, [0u8; 3]);
    for (x, y, &rgb) in colors.iter() {
        let height = *elevation.get(x, y);
        let factor = (1.0 - SHADE_STEP * (height.abs() / SHADE_STEP).floor()).clamp(0.0, 1.0);
        shaded.set(
            x,
            y,
            [
                (rgb[0] as f32 * factor).round() as u8,
                (rgb[1] as f32 * factor).round() as u8,
                (rgb[2] as f32 * factor).round() as u8,
            ],
        );
    }
    shaded
}
