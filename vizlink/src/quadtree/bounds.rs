//! Axis-aligned boxes used by the quadtree.

use serde::{Deserialize, Serialize};

/// A 2D position `[x, y]`.
pub type Point = [f64; 2];

/// Cell covered by a quadtree node, edges inclusive.
///
/// Edges are stored rather than derived from a side length, so a child
/// shares its parent's outer edges and its siblings' split line exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// West edge
    pub x0: f64,
    /// North edge
    pub y0: f64,
    /// East edge
    pub x1: f64,
    /// South edge
    pub y1: f64,
}

impl Bounds {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Square anchored at the minimum corner that covers every point.
    ///
    /// The far edges never fall short of the largest coordinates, even
    /// when `min + side` rounds down. Returns `None` for an empty iterator.
    pub fn covering<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let [first_x, first_y] = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first_x, first_y, first_x, first_y);
        for [x, y] in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let side = (max_x - min_x).max(max_y - min_y);
        Some(Self {
            x0: min_x,
            y0: min_y,
            x1: (min_x + side).max(max_x),
            y1: (min_y + side).max(max_y),
        })
    }

    /// Longest side length.
    pub fn size(&self) -> f64 {
        (self.x1 - self.x0).max(self.y1 - self.y0)
    }

    /// Split point of the cell, always within its edges.
    pub fn center(&self) -> Point {
        let cx = (self.x0 + (self.x1 - self.x0) / 2.0).clamp(self.x0, self.x1);
        let cy = (self.y0 + (self.y1 - self.y0) / 2.0).clamp(self.y0, self.y1);
        [cx, cy]
    }

    /// Child quadrant: 0 = NW, 1 = NE, 2 = SW, 3 = SE.
    pub fn quadrant(&self, index: usize) -> Self {
        let [cx, cy] = self.center();
        let (x0, x1) = if index & 1 == 1 { (cx, self.x1) } else { (self.x0, cx) };
        let (y0, y1) = if index & 2 == 2 { (cy, self.y1) } else { (self.y0, cy) };
        Self { x0, y0, x1, y1 }
    }

    /// Quadrant index a point falls into.
    ///
    /// Points on a center line go to the east/south quadrant.
    pub fn quadrant_of(&self, point: Point) -> usize {
        let [cx, cy] = self.center();
        let east = usize::from(point[0] >= cx);
        let south = usize::from(point[1] >= cy);
        east | (south << 1)
    }

    /// Whether the cell overlaps a region (edges inclusive).
    pub fn intersects(&self, region: &Region) -> bool {
        self.x0 <= region.max_x
            && self.x1 >= region.min_x
            && self.y0 <= region.max_y
            && self.y1 >= region.min_y
    }

    /// Squared distance from a point to the nearest point of the cell.
    pub fn distance_squared(&self, point: Point) -> f64 {
        let dx = (self.x0 - point[0]).max(0.0).max(point[0] - self.x1);
        let dy = (self.y0 - point[1]).max(0.0).max(point[1] - self.y1);
        dx * dx + dy * dy
    }
}

/// Axis-aligned query rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Minimum X
    pub min_x: f64,
    /// Minimum Y
    pub min_y: f64,
    /// Maximum X
    pub max_x: f64,
    /// Maximum Y
    pub max_y: f64,
}

impl Region {
    /// Create a region from its corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Region spanning two arbitrary corners (e.g. a drag rectangle).
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a[0].min(b[0]),
            min_y: a[1].min(b[1]),
            max_x: a[0].max(b[0]),
            max_y: a[1].max(b[1]),
        }
    }

    /// Whether the region is well formed: no NaN and min ≤ max.
    ///
    /// Infinite edges are allowed for half-open queries.
    pub fn is_valid(&self) -> bool {
        let no_nan = ![self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .any(|v| v.is_nan());
        no_nan && self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Whether a point lies inside (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point[0] >= self.min_x
            && point[0] <= self.max_x
            && point[1] >= self.min_y
            && point[1] <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covering_is_square() {
        let b = Bounds::covering([[0.0, 0.0], [10.0, 4.0], [2.0, -1.0]]).unwrap();
        assert_eq!(b, Bounds::new(0.0, -1.0, 10.0, 9.0));
        assert_eq!(b.size(), 10.0);
    }

    #[test]
    fn test_covering_empty() {
        assert!(Bounds::covering(Vec::<Point>::new()).is_none());
    }

    #[test]
    fn test_covering_reaches_max_despite_rounding() {
        // min + (max - min) rounds one ulp below max for this pair
        let (min, max) = (-938.8200339328929, 802.8549152229671);
        let b = Bounds::covering([[min, 0.0], [max, 0.0]]).unwrap();
        assert!(b.x1 >= max);
        assert!(b.distance_squared([max, 0.0]) == 0.0);
        assert!(b.intersects(&Region::new(max, 0.0, max, 0.0)));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let parent = Bounds::new(0.0, 0.0, 8.0, 8.0);
        assert_eq!(parent.quadrant(0), Bounds::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(parent.quadrant(1), Bounds::new(4.0, 0.0, 8.0, 4.0));
        assert_eq!(parent.quadrant(2), Bounds::new(0.0, 4.0, 4.0, 8.0));
        assert_eq!(parent.quadrant(3), Bounds::new(4.0, 4.0, 8.0, 8.0));
    }

    #[test]
    fn test_children_share_parent_edges_exactly() {
        let mut cell = Bounds::new(-938.8200339328929, 0.1, 802.8549152229671, 1741.775);
        for _ in 0..40 {
            let east = cell.quadrant(3);
            assert_eq!(east.x1, cell.x1);
            assert_eq!(east.y1, cell.y1);
            assert_eq!(cell.quadrant(0).x1, east.x0);
            cell = east;
        }
    }

    #[test]
    fn test_quadrant_of_matches_quadrant_bounds() {
        let parent = Bounds::new(0.0, 0.0, 8.0, 8.0);
        for point in [[1.0, 1.0], [6.0, 1.0], [1.0, 6.0], [6.0, 6.0], [4.0, 4.0], [8.0, 8.0]] {
            let q = parent.quadrant_of(point);
            let child = parent.quadrant(q);
            assert!(
                point[0] >= child.x0 && point[0] <= child.x1,
                "{:?} not in quadrant {}",
                point,
                q
            );
            assert!(point[1] >= child.y0 && point[1] <= child.y1);
        }
    }

    #[test]
    fn test_intersects() {
        let b = Bounds::new(0.0, 0.0, 4.0, 4.0);
        assert!(b.intersects(&Region::new(3.0, 3.0, 10.0, 10.0)));
        assert!(b.intersects(&Region::new(4.0, 0.0, 5.0, 1.0)));
        assert!(!b.intersects(&Region::new(4.5, 0.0, 5.0, 1.0)));
    }

    #[test]
    fn test_distance_squared() {
        let b = Bounds::new(0.0, 0.0, 2.0, 2.0);
        assert_eq!(b.distance_squared([1.0, 1.0]), 0.0);
        assert_eq!(b.distance_squared([5.0, 1.0]), 9.0);
        assert_eq!(b.distance_squared([5.0, 6.0]), 25.0);
    }

    #[test]
    fn test_region_validity() {
        assert!(Region::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(Region::new(f64::NEG_INFINITY, f64::NEG_INFINITY, 5.0, 5.0).is_valid());
        assert!(!Region::new(2.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Region::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_from_corners_normalizes() {
        let r = Region::from_corners([5.0, -1.0], [1.0, 3.0]);
        assert_eq!(r, Region::new(1.0, -1.0, 5.0, 3.0));
    }
}
