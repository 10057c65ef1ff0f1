//! Point-in-convex-polygon tests.
//!
//! Polygons may be wound either way; the winding is taken from the signed
//! area. Each edge becomes a half-plane `normal · p <= offset` with an
//! outward unit normal, so the tolerance is a distance in content units.

use crate::geometry::Vec2;

/// Half-plane bounding a convex polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvexEdge {
    /// Outward unit normal.
    pub normal: Vec2,
    /// `normal · p` for any point `p` on the edge.
    pub offset: f64,
}

impl ConvexEdge {
    /// Signed distance from the edge, positive outside.
    #[inline]
    pub fn distance(&self, point: Vec2) -> f64 {
        self.normal.dot(point) - self.offset
    }
}

/// Twice the signed area; positive for the top-left, top-right, bottom-right,
/// bottom-left order in y-down coordinates.
pub fn signed_area2(polygon: &[Vec2]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| polygon[i].perp_dot(polygon[(i + 1) % n]))
        .sum()
}

/// Half-planes of a convex polygon, or `None` if it has no area.
pub fn convex_edges(polygon: &[Vec2]) -> Option<Vec<ConvexEdge>> {
    let area = signed_area2(polygon);
    if !area.is_finite() || area.abs() < 1e-12 {
        return None;
    }
    let sign = area.signum();
    let n = polygon.len();
    let mut edges = Vec::with_capacity(n);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let edge = b - a;
        let len = edge.length();
        if len < 1e-12 {
            continue;
        }
        let normal = Vec2::new(edge.y, -edge.x) * (sign / len);
        edges.push(ConvexEdge {
            normal,
            offset: normal.dot(a),
        });
    }
    Some(edges)
}

/// Whether `point` is inside or within `tolerance` of the convex `polygon`.
pub fn point_in_convex_polygon(point: Vec2, polygon: &[Vec2], tolerance: f64) -> bool {
    match convex_edges(polygon) {
        Some(edges) => edges.iter().all(|e| e.distance(point) <= tolerance),
        None => false,
    }
}

/// Whether every vertex of `inner` lies inside the convex `outer` polygon.
pub fn polygon_contains_polygon(inner: &[Vec2], outer: &[Vec2], tolerance: f64) -> bool {
    let Some(edges) = convex_edges(outer) else {
        return false;
    };
    inner
        .iter()
        .all(|p| p.is_finite() && edges.iter().all(|e| e.distance(*p) <= tolerance))
}
