//! Masonry layout.
//!
//! This crate resolves responsive column geometry from a container width and
//! packs variable-height items into columns with a greedy shortest-column
//! pass. Both steps are pure; measuring item heights is delegated to the
//! caller through a closure so the host decides how content is sized.

pub mod breakpoint;
pub mod masonry;

pub use breakpoint::{BreakpointResolver, ColumnGeometry, MEDIUM_BREAKPOINT, SMALL_BREAKPOINT};
pub use masonry::{ColumnBalancer, MasonryLayout, Placement};
