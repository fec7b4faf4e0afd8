//! Mosaic - masonry layout and category filtering for portfolio grids.
//!
//! This crate ties the workspace together:
//! - the [`Masonry`] engine handle and its filter/resize sequencing
//! - configuration
//! - the [`MasonryHost`] boundary and a document-backed host
//! - filter buttons and the image-load gate
//! - JSON scenes and reports for the `mosaic` binary

pub mod config;
pub mod engine;
pub mod filter;
pub mod filter_bar;
pub mod host;
pub mod images;
pub mod report;
pub mod scene;

pub use config::MasonryConfig;
pub use engine::{FilterPhase, ItemState, Masonry, Visibility};
pub use filter::{Filter, Partition};
pub use filter_bar::FilterBar;
pub use host::{DocumentHost, MasonryHost};
pub use images::{ImageGate, ImageWaitOutcome};
pub use report::LayoutReport;
pub use scene::Scene;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
