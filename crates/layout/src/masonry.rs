//! Greedy shortest-column balancing.

use crate::breakpoint::ColumnGeometry;
use common::geometry::{Point, Rect, Size};
use ordered_float::OrderedFloat;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, warn};

/// Where one item landed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Placement {
    /// Index into the sequence passed to the balancer.
    pub index: usize,
    pub column: usize,
    pub rect: Rect,
}

impl Placement {
    #[inline]
    pub fn position(&self) -> Point {
        self.rect.origin()
    }
}

/// Result of one balancing pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MasonryLayout {
    pub geometry: ColumnGeometry,
    pub gutter: f32,
    /// One entry per input item, in input order.
    pub placements: Vec<Placement>,
    /// Running column heights at the end of the pass, gutters included.
    pub column_heights: Vec<f32>,
    pub container_height: f32,
}

impl MasonryLayout {
    pub fn empty(geometry: ColumnGeometry, gutter: f32) -> Self {
        Self {
            geometry,
            gutter,
            placements: Vec::new(),
            column_heights: vec![0.0; geometry.columns],
            container_height: 0.0,
        }
    }

    /// Indices of the items assigned to `column`, top to bottom.
    pub fn column_items(&self, column: usize) -> Vec<usize> {
        self.placements
            .iter()
            .filter(|p| p.column == column)
            .map(|p| p.index)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Per-pass running heights. Never outlives a pass.
struct ColumnState {
    heights: SmallVec<[f32; 4]>,
}

impl ColumnState {
    fn new(columns: usize) -> Self {
        Self {
            heights: SmallVec::from_elem(0.0, columns.max(1)),
        }
    }

    /// Shortest column; the leftmost one wins ties.
    fn shortest(&self) -> usize {
        self.heights
            .iter()
            .enumerate()
            .min_by_key(|(_, h)| OrderedFloat(**h))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Stack an item on `column` and return its top edge.
    fn push(&mut self, column: usize, height: f32, gutter: f32) -> f32 {
        let y = self.heights[column];
        self.heights[column] += height + gutter;
        y
    }

    fn max(&self) -> f32 {
        self.heights.iter().copied().fold(0.0, f32::max)
    }
}

/// Packs items into columns in order, always onto the shortest column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnBalancer {
    geometry: ColumnGeometry,
    gutter: f32,
}

impl ColumnBalancer {
    pub fn new(geometry: ColumnGeometry, gutter: f32) -> Self {
        Self {
            geometry,
            gutter: gutter.max(0.0),
        }
    }

    pub fn geometry(&self) -> ColumnGeometry {
        self.geometry
    }

    /// Balance `items`, measuring each one at the resolved item width.
    ///
    /// `measure` is called exactly once per item, in order, and must return
    /// the item's rendered height at the given width. Hosts that need to apply
    /// the width before they can measure do so inside the closure.
    pub fn balance<I>(
        &self,
        items: &[I],
        mut measure: impl FnMut(&I, f32) -> f32,
    ) -> MasonryLayout {
        if items.is_empty() {
            return MasonryLayout::empty(self.geometry, self.gutter);
        }

        let item_width = self.geometry.item_width;
        let mut columns = ColumnState::new(self.geometry.columns);
        let mut placements = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let mut height = measure(item, item_width);
            if !height.is_finite() || height < 0.0 {
                warn!(index, height, "invalid measured height, using 0");
                height = 0.0;
            }

            let column = columns.shortest();
            let x = self.geometry.column_x(column, self.gutter);
            let y = columns.push(column, height, self.gutter);

            placements.push(Placement {
                index,
                column,
                rect: Rect::from_origin_size(Point::new(x, y), Size::new(item_width, height)),
            });
        }

        let container_height = (columns.max() - self.gutter).max(0.0);
        debug!(
            items = items.len(),
            columns = self.geometry.columns,
            container_height,
            "masonry pass complete"
        );

        MasonryLayout {
            geometry: self.geometry,
            gutter: self.gutter,
            placements,
            column_heights: columns.heights.to_vec(),
            container_height,
        }
    }

    /// Balance items whose heights are already known.
    pub fn balance_heights(&self, heights: &[f32]) -> MasonryLayout {
        self.balance(heights, |h, _| *h)
    }
}
