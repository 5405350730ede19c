//! Rasterization of Voronoi cells into a region-id grid.

use std::cmp::Ordering;

use crate::grid::Grid;
use crate::points::Point;
use crate::voronoi::VoronoiDiagram;

/// Identifier of a rasterized Voronoi region. Index `i` refers to region `i`
/// of the diagram that produced the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(pub u32);

impl RegionId {
    /// Sentinel for cells no bounded region covers. Distinct from every
    /// valid id, so id 0 stays usable for the first region.
    pub const NONE: RegionId = RegionId(u32::MAX);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Fill a `size`×`size` grid with the owning region id of every covered cell.
///
/// Each bounded region's polygon is scanline-filled and clipped to the grid;
/// unbounded regions are skipped entirely. True Voronoi cells are disjoint,
/// so overlap can only arise from rasterization precision at shared edges;
/// the last region written wins there. Uncovered cells keep
/// [`RegionId::NONE`].
pub fn rasterize_regions(diagram: &VoronoiDiagram, size: usize) -> Grid<RegionId> {
    let mut grid = Grid::new_with(size, RegionId::NONE);
    for (index, region) in diagram.regions().iter().enumerate() {
        if !region.bounded {
            continue;
        }
        fill_polygon(&mut grid, &diagram.region_polygon(index), RegionId(index as u32));
    }
    grid
}

/// Scanline fill: for each grid row the polygon spans, intersect the row's
/// center line with the polygon edges and stamp the even-odd interior spans.
fn fill_polygon(grid: &mut Grid<RegionId>, polygon: &[Point], id: RegionId) {
    if polygon.len() < 3 || grid.size == 0 {
        return;
    }
    let size = grid.size;

    let min_y = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = polygon.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    if max_y < 0.0 || min_y >= size as f64 {
        return;
    }
    let row_start = min_y.floor().max(0.0) as usize;
    let row_end = (max_y.ceil() as usize).min(size - 1);

    let mut crossings: Vec<f64> = Vec::with_capacity(polygon.len());
    for y in row_start..=row_end {
        let scan = y as f64 + 0.5;
        crossings.clear();
        for i in 0..polygon.len() {
            let p = polygon[i];
            let q = polygon[(i + 1) % polygon.len()];
            // Half-open span test: counts each crossing once, skips
            // horizontal edges.
            if (p.y <= scan) != (q.y <= scan) {
                let t = (scan - p.y) / (q.y - p.y);
                crossings.push(p.x + t * (q.x - p.x));
            }
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        for pair in crossings.chunks(2) {
            let [left, right] = pair else { break };
            // Cells whose center lies inside the span, clipped to the grid.
            let start = (left - 0.5).ceil().max(0.0) as usize;
            let end_f = (right - 0.5).floor();
            if end_f < 0.0 || start >= size {
                continue;
            }
            let end = (end_f as usize).min(size - 1);
            for x in start..=end {
                grid.set(x, y, id);
            }
        }
    }
}
