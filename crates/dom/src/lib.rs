//! Minimal in-memory element tree.
//!
//! This crate models just enough of a document for the masonry engine to run
//! against: elements with class lists and attributes, typed inline style,
//! simple selectors, and intrinsic content that can be measured at a width.

pub mod attributes;
pub mod content;
pub mod element;
pub mod selector;
pub mod style;
pub mod tree;

pub use attributes::AttributeMap;
pub use content::IntrinsicContent;
pub use element::{ElementData, TagName};
pub use selector::{CompoundSelector, SimpleSelector};
pub use style::{
    InlineStyle, StyleProperty, StyleValue, TransformFunction, TransformList, Transition,
};
pub use tree::{DomTree, NodeId};
