//! Voronoi diagram construction on top of a Delaunay triangulation.
//!
//! Each input point owns one region; a region's boundary vertices are the
//! circumcenters of the Delaunay triangles incident to the point, ordered
//! counter-clockwise. Points on the convex hull own unbounded regions, which
//! carry no vertices and are skipped by every downstream consumer.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::GenerationError;
use crate::points::Point;

/// Coordinate quantization for deduplicating shared circumcenters.
const VERTEX_KEY_SCALE: f64 = 1e7;

/// One Voronoi cell. `vertices` indexes into [`VoronoiDiagram::vertices`] in
/// counter-clockwise order; unbounded regions have an empty vertex list.
#[derive(Clone, Debug)]
pub struct Region {
    pub vertices: Vec<usize>,
    pub bounded: bool,
}

/// Voronoi diagram of a point set.
///
/// Invariant: `regions().len()` equals the input point count, and region `i`
/// belongs to input point `i`.
#[derive(Clone, Debug)]
pub struct VoronoiDiagram {
    vertices: Vec<Point>,
    regions: Vec<Region>,
}

impl VoronoiDiagram {
    /// Build the diagram for `points`.
    ///
    /// Fails with [`GenerationError::DegenerateGeometry`] when fewer than 4
    /// distinct points are supplied or when every point lies on one line.
    pub fn build(points: &[Point]) -> Result<Self, GenerationError> {
        if points.len() < 4 {
            return Err(GenerationError::DegenerateGeometry(format!(
                "need at least 4 points, got {}",
                points.len()
            )));
        }

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        let mut handles = Vec::with_capacity(points.len());
        for point in points {
            let handle = triangulation
                .insert(Point2::new(point.x, point.y))
                .map_err(|err| GenerationError::InvalidParameter {
                    name: "points",
                    reason: err.to_string(),
                })?;
            handles.push(handle);
        }

        if triangulation.num_vertices() < 4 {
            return Err(GenerationError::DegenerateGeometry(format!(
                "only {} distinct points after deduplication",
                triangulation.num_vertices()
            )));
        }
        if triangulation.num_inner_faces() == 0 {
            return Err(GenerationError::DegenerateGeometry(
                "all points are collinear".to_string(),
            ));
        }

        let mut vertices: Vec<Point> = Vec::new();
        let mut vertex_ids: HashMap<(i64, i64), usize> = HashMap::new();
        let mut regions = Vec::with_capacity(points.len());

        for &handle in &handles {
            let vertex = triangulation.vertex(handle);
            let generator = vertex.position();

            let mut bounded = true;
            let mut cell: Vec<(f64, usize)> = Vec::new();
            let mut seen: HashSet<(i64, i64)> = HashSet::new();

            for edge in vertex.out_edges() {
                let face = edge.face();
                if face.is_outer() {
                    // Hull generator: the cell extends to infinity.
                    bounded = false;
                    continue;
                }

                // The face left of an out-edge is a Delaunay triangle whose
                // circumcenter is one corner of this Voronoi cell.
                let a = edge.from().position();
                let b = edge.to().position();
                let c = edge.next().to().position();
                let Some(center) = circumcenter(a, b, c) else {
                    continue;
                };

                let key = vertex_key(center);
                if !seen.insert(key) {
                    continue;
                }
                let id = *vertex_ids.entry(key).or_insert_with(|| {
                    vertices.push(Point::new(center.x, center.y));
                    vertices.len() - 1
                });
                let angle = (center.y - generator.y).atan2(center.x - generator.x);
                cell.push((angle, id));
            }

            if !bounded || cell.len() < 3 {
                regions.push(Region {
                    vertices: Vec::new(),
                    bounded: false,
                });
                continue;
            }

            // Increasing angle around the generator gives CCW order; the
            // signed-area check normalizes any near-degenerate exceptions.
            cell.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            let mut indices: Vec<usize> = cell.into_iter().map(|(_, id)| id).collect();
            if signed_area(&vertices, &indices) < 0.0 {
                indices.reverse();
            }
            regions.push(Region {
                vertices: indices,
                bounded: true,
            });
        }

        Ok(Self { vertices, regions })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Resolve a region's vertex indices into coordinates.
    /// Empty for unbounded regions.
    pub fn region_polygon(&self, index: usize) -> Vec<Point> {
        self.regions[index]
            .vertices
            .iter()
            .map(|&vi| self.vertices[vi])
            .collect()
    }
}

fn vertex_key(point: Point2<f64>) -> (i64, i64) {
    (
        (point.x * VERTEX_KEY_SCALE).round() as i64,
        (point.y * VERTEX_KEY_SCALE).round() as i64,
    )
}

/// Circumcenter of a triangle, or `None` for collinear corners.
fn circumcenter(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Option<Point2<f64>> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }

    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Some(Point2::new(ux, uy))
}

/// Twice-signed-area sum over the polygon; positive means CCW.
fn signed_area(vertices: &[Point], indices: &[usize]) -> f64 {
    let mut area = 0.0;
    for i in 0..indices.len() {
        let p = vertices[indices[i]];
        let q = vertices[indices[(i + 1) % indices.len()]];
        area += p.x * q.y - q.x * p.y;
    }
    area * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Four corners of a square plus its center: the center's cell is the
    /// only bounded one.
    fn plus_shape() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0),
        ]
    }

    #[test]
    fn test_too_few_points_is_degenerate() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        assert!(matches!(
            VoronoiDiagram::build(&points),
            Err(GenerationError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let points: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
        assert!(matches!(
            VoronoiDiagram::build(&points),
            Err(GenerationError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_region_count_matches_point_count() {
        let points = plus_shape();
        let diagram = VoronoiDiagram::build(&points).unwrap();
        assert_eq!(diagram.regions().len(), points.len());
    }

    #[test]
    fn test_hull_points_own_unbounded_regions() {
        let diagram = VoronoiDiagram::build(&plus_shape()).unwrap();
        for corner in 0..4 {
            assert!(!diagram.regions()[corner].bounded);
            assert!(diagram.regions()[corner].vertices.is_empty());
        }
        assert!(diagram.regions()[4].bounded);
    }

    #[test]
    fn test_bounded_regions_wind_counter_clockwise() {
        let diagram = VoronoiDiagram::build(&plus_shape()).unwrap();
        let polygon = diagram.region_polygon(4);
        assert!(polygon.len() >= 3);
        let mut area = 0.0;
        for i in 0..polygon.len() {
            let p = polygon[i];
            let q = polygon[(i + 1) % polygon.len()];
            area += p.x * q.y - q.x * p.y;
        }
        assert!(area > 0.0, "expected CCW winding, signed area {area}");
    }

    #[test]
    fn test_center_cell_vertices_surround_generator() {
        let diagram = VoronoiDiagram::build(&plus_shape()).unwrap();
        // The center point's cell is the square formed by the four triangle
        // circumcenters; every vertex stays within the outer square.
        for vertex in diagram.region_polygon(4) {
            assert!(vertex.x >= 0.0 && vertex.x <= 10.0);
            assert!(vertex.y >= 0.0 && vertex.y <= 10.0);
        }
    }
}
