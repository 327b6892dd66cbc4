//! Region quadtree over caller-owned entries.
//!
//! The tree stores entry indices only. Coordinates are always derived
//! through the accessor supplied at build time, so entries are never
//! copied or re-encoded into the tree.

use std::sync::Arc;

use tracing::debug;

use super::bounds::{Bounds, Point, Region};
use super::error::SpatialQueryError;

/// Default minimum node side length. Zero splits until positions separate.
pub const DEFAULT_MIN_CELL_SIZE: f64 = 0.0;

/// Hard limit on subdivision depth for nearly-coincident floats.
const MAX_DEPTH: usize = 48;

type Accessor<T> = Arc<dyn Fn(&T) -> Option<Point> + Send + Sync>;

enum Node {
    Leaf(Vec<usize>),
    Internal(Box<[Node; 4]>),
}

struct Tree<T> {
    entries: Vec<T>,
    accessor: Accessor<T>,
    root: Node,
    bounds: Bounds,
    indexed: usize,
}

impl<T> Tree<T> {
    /// Depth-first walk over located entries inside `region`.
    fn walk<F>(&self, region: &Region, mut f: F)
    where
        F: FnMut(usize, Point),
    {
        debug_assert!(region.is_valid(), "malformed query region {:?}", region);
        if !region.is_valid() {
            return;
        }
        let mut stack = vec![(&self.root, self.bounds)];
        while let Some((node, bounds)) = stack.pop() {
            if !bounds.intersects(region) {
                continue;
            }
            match node {
                Node::Leaf(indices) => {
                    for &i in indices {
                        if let Some(point) = (self.accessor)(&self.entries[i]) {
                            if region.contains(point) {
                                f(i, point);
                            }
                        }
                    }
                }
                Node::Internal(children) => {
                    // Reverse push keeps NW, NE, SW, SE visiting order
                    for q in (0..4).rev() {
                        stack.push((&children[q], bounds.quadrant(q)));
                    }
                }
            }
        }
    }
}

/// Configures and builds a [`QuadtreeIndex`].
#[derive(Debug, Clone)]
pub struct QuadtreeBuilder {
    min_cell_size: f64,
}

impl Default for QuadtreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadtreeBuilder {
    pub fn new() -> Self {
        Self {
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
        }
    }

    /// Nodes at or below this side length are never split.
    pub fn min_cell_size(mut self, size: f64) -> Self {
        self.min_cell_size = if size.is_finite() { size.max(0.0) } else { 0.0 };
        self
    }

    /// Build an index over `entries`.
    ///
    /// Returns the empty handle when `entries` is empty or the accessor
    /// yields no finite coordinates for the first entry. Later entries
    /// without coordinates are skipped and counted in
    /// [`QuadtreeIndex::skipped`].
    pub fn build<T, F>(&self, entries: Vec<T>, accessor: F) -> QuadtreeIndex<T>
    where
        F: Fn(&T) -> Option<Point> + Send + Sync + 'static,
    {
        let first_has_coords = entries
            .first()
            .and_then(|first| accessor(first))
            .is_some_and(is_finite_point);
        if !first_has_coords {
            debug!(entries = entries.len(), "Quadtree build skipped, no spatial data");
            return QuadtreeIndex::empty();
        }

        let located: Vec<(usize, Point)> = entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| accessor(entry).filter(|p| is_finite_point(*p)).map(|p| (i, p)))
            .collect();
        let skipped = entries.len() - located.len();

        let bounds = match Bounds::covering(located.iter().map(|(_, p)| *p)) {
            Some(bounds) => bounds,
            None => return QuadtreeIndex::empty(),
        };
        let indexed = located.len();
        let root = self.split(bounds, located, 0);

        debug!(
            indexed,
            skipped,
            size = bounds.size(),
            "Quadtree built"
        );

        QuadtreeIndex {
            tree: Some(Tree {
                entries,
                accessor: Arc::new(accessor),
                root,
                bounds,
                indexed,
            }),
            skipped,
        }
    }

    fn split(&self, bounds: Bounds, located: Vec<(usize, Point)>, depth: usize) -> Node {
        let coincident = located.windows(2).all(|w| w[0].1 == w[1].1);
        if coincident || bounds.size() <= self.min_cell_size || depth >= MAX_DEPTH {
            return Node::Leaf(located.into_iter().map(|(i, _)| i).collect());
        }

        let mut quadrants: [Vec<(usize, Point)>; 4] = Default::default();
        for (i, point) in located {
            quadrants[bounds.quadrant_of(point)].push((i, point));
        }
        let [nw, ne, sw, se] = quadrants;
        Node::Internal(Box::new([
            self.split(bounds.quadrant(0), nw, depth + 1),
            self.split(bounds.quadrant(1), ne, depth + 1),
            self.split(bounds.quadrant(2), sw, depth + 1),
            self.split(bounds.quadrant(3), se, depth + 1),
        ]))
    }
}

fn is_finite_point(point: Point) -> bool {
    point[0].is_finite() && point[1].is_finite()
}

/// Spatial index for region and nearest-neighbour queries.
///
/// Built once per point set and queried many times; rebuild only when
/// the point set itself changes. An index built without spatial data is
/// the *empty handle*: every query returns an empty result, which lets
/// callers tell "no data yet" ([`is_available`](Self::is_available) is
/// false) apart from "no matches".
pub struct QuadtreeIndex<T> {
    tree: Option<Tree<T>>,
    skipped: usize,
}

impl<T> QuadtreeIndex<T> {
    /// Build with default settings. See [`QuadtreeBuilder::build`].
    pub fn build<F>(entries: Vec<T>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<Point> + Send + Sync + 'static,
    {
        QuadtreeBuilder::new().build(entries, accessor)
    }

    /// The empty handle.
    pub fn empty() -> Self {
        Self {
            tree: None,
            skipped: 0,
        }
    }

    /// Whether spatial data was available at build time.
    pub fn is_available(&self) -> bool {
        self.tree.is_some()
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.tree.as_ref().map_or(0, |t| t.indexed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries left out because they had no finite coordinates.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Root cell, `None` for the empty handle.
    pub fn bounds(&self) -> Option<Bounds> {
        self.tree.as_ref().map(|t| t.bounds)
    }

    /// All entries, indexed or not, in build order.
    pub fn entries(&self) -> &[T] {
        match &self.tree {
            Some(tree) => &tree.entries,
            None => &[],
        }
    }

    /// Call `visitor` for every entry inside `region` (edges inclusive).
    ///
    /// Subtrees whose cell cannot intersect the region are never entered.
    /// A malformed region is a caller bug: it trips a debug assertion and
    /// visits nothing in release builds. Use [`try_visit`](Self::try_visit)
    /// for untrusted input.
    pub fn visit<V>(&self, region: &Region, mut visitor: V)
    where
        V: FnMut(&T, Point),
    {
        if let Some(tree) = &self.tree {
            tree.walk(region, |i, point| visitor(&tree.entries[i], point));
        }
    }

    /// Checked form of [`visit`](Self::visit).
    pub fn try_visit<V>(&self, region: &Region, visitor: V) -> Result<(), SpatialQueryError>
    where
        V: FnMut(&T, Point),
    {
        SpatialQueryError::check_region(region)?;
        self.visit(region, visitor);
        Ok(())
    }

    /// Entries inside `region`, in traversal order.
    pub fn query_region(&self, region: &Region) -> Vec<&T> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let mut found = Vec::new();
        tree.walk(region, |i, _| found.push(&tree.entries[i]));
        found
    }

    /// Nearest entry to `(x, y)` within `radius` (inclusive).
    ///
    /// Equidistant candidates resolve to the one built first. Pass
    /// `f64::INFINITY` for an unbounded search.
    pub fn find_nearest(&self, x: f64, y: f64, radius: f64) -> Option<&T> {
        debug_assert!(
            SpatialQueryError::check_point(x, y, radius).is_ok(),
            "malformed nearest query ({}, {}) r={}",
            x,
            y,
            radius
        );
        if SpatialQueryError::check_point(x, y, radius).is_err() {
            return None;
        }
        let tree = self.tree.as_ref()?;
        let target = [x, y];
        let mut best: Option<(usize, f64)> = None;
        let limit = radius * radius;

        let mut stack = vec![(&tree.root, tree.bounds)];
        while let Some((node, bounds)) = stack.pop() {
            let bound = best.map_or(limit, |(_, d)| d);
            if bounds.distance_squared(target) > bound {
                continue;
            }
            match node {
                Node::Leaf(indices) => {
                    for &i in indices {
                        let Some(point) = (tree.accessor)(&tree.entries[i]) else {
                            continue;
                        };
                        let dx = point[0] - x;
                        let dy = point[1] - y;
                        let d = dx * dx + dy * dy;
                        let better = match best {
                            None => d <= limit,
                            Some((best_i, best_d)) => d < best_d || (d == best_d && i < best_i),
                        };
                        if better {
                            best = Some((i, d));
                        }
                    }
                }
                Node::Internal(children) => {
                    // Quadrant holding the target is searched first (pushed last)
                    let first = bounds.quadrant_of(target);
                    for q in (0..4).filter(|&q| q != first) {
                        stack.push((&children[q], bounds.quadrant(q)));
                    }
                    stack.push((&children[first], bounds.quadrant(first)));
                }
            }
        }

        best.map(|(i, _)| &tree.entries[i])
    }

    /// Checked form of [`find_nearest`](Self::find_nearest).
    pub fn try_find_nearest(&self, x: f64, y: f64, radius: f64) -> Result<Option<&T>, SpatialQueryError> {
        SpatialQueryError::check_point(x, y, radius)?;
        Ok(self.find_nearest(x, y, radius))
    }

    #[cfg(test)]
    fn leaf_entry_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf(indices) => indices.len(),
                Node::Internal(children) => children.iter().map(count).sum(),
            }
        }
        self.tree.as_ref().map_or(0, |t| count(&t.root))
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf(_) => 0,
                Node::Internal(children) => 1 + children.iter().map(depth).max().unwrap_or(0),
            }
        }
        self.tree.as_ref().map_or(0, |t| depth(&t.root))
    }
}

impl<T> Default for QuadtreeIndex<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> std::fmt::Debug for QuadtreeIndex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadtreeIndex")
            .field("available", &self.is_available())
            .field("len", &self.len())
            .field("skipped", &self.skipped)
            .field("bounds", &self.bounds())
            .finish()
    }
}
