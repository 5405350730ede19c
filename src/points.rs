//! Seed-point sampling and Lloyd relaxation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::voronoi::VoronoiDiagram;

/// A 2D coordinate in map space, `[0, size)` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Draw `count` points with coordinates uniform in `[0, size)`.
pub fn scatter_points(
    count: usize,
    size: f64,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Point>, GenerationError> {
    if count == 0 {
        return Err(GenerationError::InvalidParameter {
            name: "point_count",
            reason: "must be at least 1".to_string(),
        });
    }
    if !(size > 0.0) {
        return Err(GenerationError::InvalidParameter {
            name: "map_size",
            reason: "must be positive".to_string(),
        });
    }

    Ok((0..count)
        .map(|_| Point::new(rng.gen_range(0.0..size), rng.gen_range(0.0..size)))
        .collect())
}

/// Lloyd relaxation: move each point to the mean of its Voronoi cell's
/// vertices, `iterations` times, clamping into `[0, size]`.
///
/// Points whose cells are unbounded contribute no replacement, so the result
/// may be shorter than the input. This lossy behavior is intentional: hull
/// cells have no finite centroid, and dropping them thins the crowded map
/// border. `iterations == 0` returns the input unchanged.
pub fn relax_points(
    points: &[Point],
    size: f64,
    iterations: usize,
) -> Result<Vec<Point>, GenerationError> {
    let mut current = points.to_vec();
    for _ in 0..iterations {
        let diagram = VoronoiDiagram::build(&current)?;
        let mut next = Vec::with_capacity(current.len());
        for (index, region) in diagram.regions().iter().enumerate() {
            if !region.bounded {
                continue;
            }
            let polygon = diagram.region_polygon(index);
            let n = polygon.len() as f64;
            let cx: f64 = polygon.iter().map(|p| p.x).sum::<f64>() / n;
            let cy: f64 = polygon.iter().map(|p| p.y).sum::<f64>() / n;
            next.push(Point::new(cx.clamp(0.0, size), cy.clamp(0.0, size)));
        }
        current = next;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_rejects_zero_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            scatter_points(0, 512.0, &mut rng),
            Err(GenerationError::InvalidParameter { name: "point_count", .. })
        ));
    }

    #[test]
    fn test_scatter_is_deterministic_and_in_bounds() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);
        let a = scatter_points(64, 100.0, &mut rng_a).unwrap();
        let b = scatter_points(64, 100.0, &mut rng_b).unwrap();
        assert_eq!(a, b);
        for p in &a {
            assert!(p.x >= 0.0 && p.x < 100.0);
            assert!(p.y >= 0.0 && p.y < 100.0);
        }
    }

    #[test]
    fn test_relax_zero_iterations_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = scatter_points(32, 64.0, &mut rng).unwrap();
        let relaxed = relax_points(&points, 64.0, 0).unwrap();
        assert_eq!(points, relaxed);
    }

    #[test]
    fn test_relax_never_grows_the_point_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let points = scatter_points(128, 256.0, &mut rng).unwrap();
        let relaxed = relax_points(&points, 256.0, 3).unwrap();
        assert!(relaxed.len() <= points.len());
        // Hull cells are always unbounded, so some points must drop.
        assert!(relaxed.len() < points.len());
    }

    #[test]
    fn test_relax_clamps_into_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let points = scatter_points(96, 128.0, &mut rng).unwrap();
        let relaxed = relax_points(&points, 128.0, 2).unwrap();
        for p in &relaxed {
            assert!(p.x >= 0.0 && p.x <= 128.0);
            assert!(p.y >= 0.0 && p.y <= 128.0);
        }
    }
}
