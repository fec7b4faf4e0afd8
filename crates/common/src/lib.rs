//! Common utilities and types shared by the mosaic crates.

pub mod error;
pub mod geometry;

pub use error::{MosaicError, MosaicResult};
pub use geometry::{Point, Rect, Size};
