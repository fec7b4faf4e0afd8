//! Responsive column geometry.

use serde::Serialize;
use tracing::warn;

/// Widths at or below this are laid out in a single column.
pub const SMALL_BREAKPOINT: f32 = 640.0;
/// Widths at or below this (and above [`SMALL_BREAKPOINT`]) get two columns.
pub const MEDIUM_BREAKPOINT: f32 = 768.0;

/// Resolved column count and per-item width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColumnGeometry {
    /// Always at least 1.
    pub columns: usize,
    pub item_width: f32,
}

impl ColumnGeometry {
    pub fn new(columns: usize, item_width: f32) -> Self {
        Self {
            columns: columns.max(1),
            item_width: item_width.max(0.0),
        }
    }

    /// Horizontal offset of a column's left edge.
    #[inline]
    pub fn column_x(&self, column: usize, gutter: f32) -> f32 {
        column as f32 * (self.item_width + gutter)
    }
}

/// Maps a container width to a [`ColumnGeometry`].
///
/// The tier table is fixed. A configured column width replaces it entirely:
/// the override is used as the item width and the column count is however
/// many such columns fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakpointResolver {
    gutter: f32,
    column_width: Option<f32>,
}

impl BreakpointResolver {
    pub fn new(gutter: f32, column_width: Option<f32>) -> Self {
        Self {
            gutter: gutter.max(0.0),
            column_width: column_width.filter(|w| w.is_finite() && *w > 0.0),
        }
    }

    pub fn gutter(&self) -> f32 {
        self.gutter
    }

    /// Resolve with a width that is only read when needed.
    pub fn resolve_with(&self, width: impl FnOnce() -> f32) -> ColumnGeometry {
        self.resolve(width())
    }

    pub fn resolve(&self, width: f32) -> ColumnGeometry {
        let width = if width.is_finite() && width > 0.0 {
            width
        } else {
            warn!(width, "degenerate container width, clamping to 0");
            0.0
        };
        let gutter = self.gutter;

        if let Some(column_width) = self.column_width {
            let columns = ((width + gutter) / (column_width + gutter)).floor() as usize;
            return ColumnGeometry::new(columns, column_width);
        }

        if width <= SMALL_BREAKPOINT {
            ColumnGeometry::new(1, width)
        } else if width <= MEDIUM_BREAKPOINT {
            ColumnGeometry::new(2, ((width - gutter) / 2.0).floor())
        } else {
            ColumnGeometry::new(3, ((width - 2.0 * gutter) / 3.0).floor())
        }
    }
}
