//! The generation pipeline: configuration in, every stage's output back.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::biomes::{self, Biome};
use crate::elevation;
use crate::error::GenerationError;
use crate::grid::Grid;
use crate::points::{self, Point};
use crate::raster::{self, RegionId};
use crate::voronoi::VoronoiDiagram;
use crate::warp;

/// Boundary-blur displacement as a fraction of the point count.
const BLEND_DISPLACEMENT_FACTOR: f64 = 0.03;

/// Point counts the presentation layer offers.
pub const POINT_COUNT_CHOICES: [usize; 5] = [256, 512, 1024, 2048, 4096];

/// Immutable parameters of one generation run. Passed by value into
/// [`generate`]; nothing about a run lives in shared mutable state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seed for point sampling and both noise fields.
    pub seed: u32,
    /// Number of Voronoi seed points to scatter.
    pub point_count: usize,
    /// Whether to blur region boundaries with noise displacement.
    pub blend: bool,
    /// Side length of the square output grids, in cells.
    pub map_size: usize,
    /// Lloyd relaxation passes over the scattered points.
    pub relax_iterations: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            point_count: 1024,
            blend: true,
            map_size: 512,
            relax_iterations: 2,
        }
    }
}

/// Every artifact of one run, so the presentation layer can display any
/// stage without re-running the pipeline.
pub struct MapData {
    pub config: GenerationConfig,
    /// Points as scattered, before relaxation.
    pub points: Vec<Point>,
    /// Relaxed points; may be fewer than requested (hull cells drop out).
    pub relaxed_points: Vec<Point>,
    pub voronoi: VoronoiDiagram,
    pub region_grid: Grid<RegionId>,
    /// Boundary-blurred region grid, or a copy of `region_grid` when the
    /// blend option is off.
    pub warped_grid: Grid<RegionId>,
    /// Land-band classification, before sea carving.
    pub biome_map: Grid<Biome>,
    pub elevation: Grid<f32>,
    pub sea_mask: Grid<bool>,
    /// Biome colors with sea carved in.
    pub sea_map: Grid<[u8; 3]>,
    /// Sea-carved colors with elevation shading applied.
    pub final_map: Grid<[u8; 3]>,
}

/// Run the full pipeline, keeping every intermediate stage.
pub fn generate(config: &GenerationConfig) -> Result<MapData, GenerationError> {
    validate(config)?;
    let size = config.map_size;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed as u64);
    let points = points::scatter_points(config.point_count, size as f64, &mut rng)?;

    let relaxed_points = points::relax_points(&points, size as f64, config.relax_iterations)?;
    log::debug!(
        "relaxation kept {} of {} points",
        relaxed_points.len(),
        points.len()
    );

    let voronoi = VoronoiDiagram::build(&relaxed_points)?;
    let region_grid = raster::rasterize_regions(&voronoi, size);

    let warped_grid = if config.blend {
        let disp = BLEND_DISPLACEMENT_FACTOR * config.point_count as f64;
        warp::blur_boundaries(&region_grid, disp, config.seed)
    } else {
        region_grid.clone()
    };

    let biome_map = biomes::classify_regions(&warped_grid, config.point_count);

    let elevation = elevation::elevation_field(size, config.seed);
    let sea_mask = elevation::sea_mask(&elevation);
    let carved = elevation::carve_sea(&biome_map, &sea_mask);
    let sea_map = biomes::color_map(&carved);
    let final_map = elevation::shade_by_elevation(&sea_map, &elevation);
    log::debug!("pipeline complete for seed {}", config.seed);

    Ok(MapData {
        config: config.clone(),
        points,
        relaxed_points,
        voronoi,
        region_grid,
        warped_grid,
        biome_map,
        elevation,
        sea_mask,
        sea_map,
        final_map,
    })
}

/// Single-shot mode: run the pipeline and keep only the final map.
pub fn generate_final(config: &GenerationConfig) -> Result<Grid<[u8; 3]>, GenerationError> {
    Ok(generate(config)?.final_map)
}

fn validate(config: &GenerationConfig) -> Result<(), GenerationError> {
    if config.point_count == 0 {
        return Err(GenerationError::InvalidParameter {
            name: "point_count",
            reason: "must be at least 1".to_string(),
        });
    }
    if config.map_size == 0 {
        return Err(GenerationError::InvalidParameter {
            name: "map_size",
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_config(seed: u32, blend: bool) -> GenerationConfig {
        GenerationConfig {
            seed,
            point_count: 256,
            blend,
            map_size: 128,
            relax_iterations: 2,
        }
    }

    #[test]
    fn test_zero_point_count_is_rejected() {
        let config = GenerationConfig {
            point_count: 0,
            ..GenerationConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(GenerationError::InvalidParameter { name: "point_count", .. })
        ));
    }

    #[test]
    fn test_zero_map_size_is_rejected() {
        let config = GenerationConfig {
            map_size: 0,
            ..GenerationConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(GenerationError::InvalidParameter { name: "map_size", .. })
        ));
    }

    #[test]
    fn test_reference_run_shape_and_reproducibility() {
        let config = GenerationConfig {
            seed: 0,
            point_count: 256,
            blend: false,
            map_size: 512,
            relax_iterations: 2,
        };
        let first = generate(&config).unwrap();
        assert_eq!(first.final_map.size, 512);

        // Before shading, every color comes from the fixed palette.
        let palette: HashSet<[u8; 3]> = Biome::all().iter().map(|b| b.color()).collect();
        for (_, _, rgb) in first.sea_map.iter() {
            assert!(palette.contains(rgb));
        }

        let second = generate(&config).unwrap();
        assert_eq!(first.final_map, second.final_map);
        assert_eq!(first.region_grid, second.region_grid);
        assert_eq!(first.elevation, second.elevation);
    }

    #[test]
    fn test_blend_toggle_changes_warp_but_not_elevation() {
        let with_blend = generate(&small_config(77, true)).unwrap();
        let without = generate(&small_config(77, false)).unwrap();
        assert_eq!(with_blend.elevation, without.elevation);
        assert_eq!(with_blend.region_grid, without.region_grid);
        assert_ne!(with_blend.warped_grid, without.warped_grid);
    }

    #[test]
    fn test_blend_off_passes_region_grid_through() {
        let data = generate(&small_config(5, false)).unwrap();
        assert_eq!(data.region_grid, data.warped_grid);
    }

    #[test]
    fn test_relaxation_loss_is_visible_in_result() {
        let data = generate(&small_config(1, true)).unwrap();
        assert!(data.relaxed_points.len() <= data.points.len());
        assert_eq!(data.voronoi.regions().len(), data.relaxed_points.len());
    }

    #[test]
    fn test_single_shot_matches_full_history() {
        let config = small_config(9, true);
        let full = generate(&config).unwrap();
        let single = generate_final(&config).unwrap();
        assert_eq!(full.final_map, single);
    }
}
