//! Noise-driven boundary blurring of the region grid.

use crate::grid::Grid;
use crate::noise_field::{noise_field, NoiseParams};
use crate::raster::RegionId;

/// Blur hard Voronoi edges by re-sampling the grid through noise-displaced
/// coordinates.
///
/// One noise field (default parameters) supplies a scalar per cell; the
/// cell's sampling coordinate shifts by `disp × noise` on both axes, is
/// clamped into the grid, truncated to a cell index, and the region id found
/// there replaces the cell's own. Straight polygon edges come out organically
/// ragged while region interiors survive intact.
pub fn blur_boundaries(regions: &Grid<RegionId>, disp: f64, seed: u32) -> Grid<RegionId> {
    let size = regions.size;
    debug_assert!(size > 0);
    let field = noise_field(size, seed, &NoiseParams::default());
    let limit = (size - 1) as f64;

    let mut blurred = Grid::new_with(size, RegionId::NONE);
    for y in 0..size {
        for x in 0..size {
            let shift = disp * *field.get(x, y) as f64;
            let sx = (x as f64 + shift).clamp(0.0, limit) as usize;
            let sy = (y as f64 + shift).clamp(0.0, limit) as usize;
            blurred.set(x, y, *regions.get(sx, sy));
        }
    }
    blurred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::scatter_points;
    use crate::raster::rasterize_regions;
    use crate::voronoi::VoronoiDiagram;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_region_grid(size: usize, count: usize, seed: u64) -> Grid<RegionId> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let points = scatter_points(count, size as f64, &mut rng).unwrap();
        let diagram = VoronoiDiagram::build(&points).unwrap();
        rasterize_regions(&diagram, size)
    }

    #[test]
    fn test_zero_displacement_is_identity() {
        let grid = sample_region_grid(64, 40, 2);
        let blurred = blur_boundaries(&grid, 0.0, 0);
        assert_eq!(grid, blurred);
    }

    #[test]
    fn test_blur_perturbs_boundaries() {
        let grid = sample_region_grid(64, 40, 2);
        let blurred = blur_boundaries(&grid, 8.0, 0);
        assert_ne!(grid, blurred);
    }

    #[test]
    fn test_blur_only_redistributes_existing_ids() {
        let grid = sample_region_grid(64, 40, 4);
        let blurred = blur_boundaries(&grid, 12.0, 3);
        let known: std::collections::HashSet<RegionId> =
            grid.iter().map(|(_, _, &id)| id).collect();
        for (_, _, &id) in blurred.iter() {
            assert!(known.contains(&id));
        }
    }
}
