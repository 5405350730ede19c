//! Biome palette and normalized-region-id classification.

use crate::grid::Grid;
use crate::raster::RegionId;

/// The fixed biome palette: eight land bands ordered by the normalized
/// region-id threshold that selects them, plus water. Band boundaries and
/// colors are a contract, not tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Taiga,
    Forest,
    Beach,
    Sand,
    Green,
    Greeny,
    Mountain,
    Snow,
    Water,
}

impl Biome {
    /// Every palette entry, land bands in threshold order, water last.
    pub fn all() -> &'static [Biome; 9] {
        &[
            Biome::Taiga,
            Biome::Forest,
            Biome::Beach,
            Biome::Sand,
            Biome::Green,
            Biome::Greeny,
            Biome::Mountain,
            Biome::Snow,
            Biome::Water,
        ]
    }

    /// Bucket a normalized region id into its land band. Boundary values
    /// belong to the band that starts there; everything at or above 0.8 is
    /// snow, so the bands partition `[0, ∞)`.
    pub fn classify(value: f32) -> Biome {
        if value < 0.10 {
            Biome::Taiga
        } else if value < 0.20 {
            Biome::Forest
        } else if value < 0.30 {
            Biome::Beach
        } else if value < 0.40 {
            Biome::Sand
        } else if value < 0.50 {
            Biome::Green
        } else if value < 0.65 {
            Biome::Greeny
        } else if value < 0.80 {
            Biome::Mountain
        } else {
            Biome::Snow
        }
    }

    pub fn color(self) -> [u8; 3] {
        match self {
            Biome::Taiga => [51, 102, 0],
            Biome::Forest => [51, 204, 51],
            Biome::Beach => [238, 214, 175],
            Biome::Sand => [255, 255, 102],
            Biome::Green => [36, 143, 36],
            Biome::Greeny => [191, 255, 128],
            Biome::Mountain => [155, 155, 155],
            Biome::Snow => [255, 255, 255],
            Biome::Water => [0, 0, 179],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Taiga => "taiga",
            Biome::Forest => "forest",
            Biome::Beach => "beach",
            Biome::Sand => "sand",
            Biome::Green => "green",
            Biome::Greeny => "greeny",
            Biome::Mountain => "mountain",
            Biome::Snow => "snow",
            Biome::Water => "water",
        }
    }
}

/// Classify every cell of a region grid by its id normalized against the
/// requested point count.
///
/// The divisor is the count the caller asked for, not the post-relaxation
/// survivor count: surviving ids are always below the request, keeping
/// normalized values under 1. Sentinel cells normalize to 0 and land in the
/// first band.
pub fn classify_regions(regions: &Grid<RegionId>, point_count: usize) -> Grid<Biome> {
    let divisor = point_count as f32;
    let mut biomes = Grid::new_with(regions.size, Biome::Taiga);
    for (x, y, &id) in regions.iter() {
        let value = if id.is_none() {
            0.0
        } else {
            id.0 as f32 / divisor
        };
        biomes.set(x, y, Biome::classify(value));
    }
    biomes
}

/// Resolve a biome grid into its palette colors.
pub fn color_map(biomes: &Grid<Biome>) -> Grid<[u8; 3]> {
    let mut colors = Grid::new_with(biomes.size, [0u8; 3]);
    for (x, y, &biome) in biomes.iter() {
        colors.set(x, y, biome.color());
    }
    colors
}
