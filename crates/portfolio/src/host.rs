//! The environment the engine runs against.
//!
//! The engine never touches a document directly. Everything it needs from
//! the outside (finding items, reading widths, measuring heights, writing
//! styles) goes through [`MasonryHost`].

use animation::StyleSink;
use dom::style::{StyleProperty, StyleValue};
use dom::{CompoundSelector, DomTree, NodeId};
use std::fmt;
use tracing::warn;

/// Capabilities the masonry engine depends on.
pub trait MasonryHost {
    /// Handle to one item.
    type Item: Clone + PartialEq + fmt::Debug;

    /// Whether the container exists. Without one the engine stays inert.
    fn has_container(&self) -> bool;

    /// Current container width in pixels.
    fn container_width(&self) -> f32;

    /// Enumerate items in the container, in document order.
    fn discover_items(&self, selector: &str) -> Vec<Self::Item>;

    /// Whether an item carries a category tag.
    fn has_tag(&self, item: &Self::Item, tag: &str) -> bool;

    /// Rendered height of an item at `width`.
    ///
    /// This must be synchronous and must reflect a width the engine has just
    /// written: the engine sets `width` and measures immediately after.
    fn measure_height(&self, item: &Self::Item, width: f32) -> f32;

    fn set_item_style(&mut self, item: &Self::Item, property: StyleProperty, value: StyleValue);
    fn clear_item_style(&mut self, item: &Self::Item, property: StyleProperty);

    fn set_container_style(&mut self, property: StyleProperty, value: StyleValue);
    fn clear_container_style(&mut self, property: StyleProperty);
}

/// Adapts a host's item styling to the animator's [`StyleSink`].
pub(crate) struct ItemStyles<'a, H>(pub(crate) &'a mut H);

impl<H: MasonryHost> StyleSink<H::Item> for ItemStyles<'_, H> {
    fn set_style(&mut self, item: &H::Item, property: StyleProperty, value: StyleValue) {
        self.0.set_item_style(item, property, value);
    }

    fn clear_style(&mut self, item: &H::Item, property: StyleProperty) {
        self.0.clear_item_style(item, property);
    }
}

/// A [`DomTree`] with one element acting as the masonry container.
#[derive(Clone, Debug)]
pub struct DocumentHost {
    tree: DomTree,
    container: Option<NodeId>,
}

impl DocumentHost {
    pub fn new(tree: DomTree, container: Option<NodeId>) -> Self {
        Self { tree, container }
    }

    /// Use the first element matching `selector` as the container.
    pub fn with_container_selector(tree: DomTree, selector: &str) -> Self {
        let container = match selector.parse::<CompoundSelector>() {
            Ok(sel) => tree.query_selector(tree.root(), &sel),
            Err(e) => {
                warn!(selector, error = %e, "invalid container selector");
                None
            }
        };
        Self { tree, container }
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Simulate the container being resized.
    pub fn set_container_width(&mut self, width: f32) {
        if let Some(elem) = self.container.and_then(|c| self.tree.get_element_mut(c)) {
            elem.rendered_width = Some(width);
        }
    }

    /// Inline style value of an element, rendered as CSS text.
    pub fn css(&self, node: NodeId, property: StyleProperty) -> Option<String> {
        self.tree
            .get_element(node)
            .and_then(|e| e.style.get(property))
            .map(|v| v.to_string())
    }

    pub fn container_css(&self, property: StyleProperty) -> Option<String> {
        self.container.and_then(|c| self.css(c, property))
    }

    fn set_style(&mut self, node: NodeId, property: StyleProperty, value: StyleValue) {
        if let Some(elem) = self.tree.get_element_mut(node) {
            elem.style.set(property, value);
        }
    }

    fn clear_style(&mut self, node: NodeId, property: StyleProperty) {
        if let Some(elem) = self.tree.get_element_mut(node) {
            elem.style.remove(property);
        }
    }
}

impl MasonryHost for DocumentHost {
    type Item = NodeId;

    fn has_container(&self) -> bool {
        self.container.map(|c| self.tree.contains(c)).unwrap_or(false)
    }

    fn container_width(&self) -> f32 {
        self.container
            .and_then(|c| self.tree.get_element(c))
            .and_then(|e| e.rendered_width)
            .unwrap_or(0.0)
    }

    fn discover_items(&self, selector: &str) -> Vec<NodeId> {
        let Some(container) = self.container else {
            return Vec::new();
        };
        match selector.parse::<CompoundSelector>() {
            Ok(sel) => self.tree.query_selector_all(container, &sel),
            Err(e) => {
                warn!(selector, error = %e, "invalid item selector");
                Vec::new()
            }
        }
    }

    fn has_tag(&self, item: &NodeId, tag: &str) -> bool {
        self.tree
            .get_element(*item)
            .map(|e| e.has_class(tag))
            .unwrap_or(false)
    }

    /// Measures at the element's inline width when one has been applied,
    /// the way a browser reflows after a style write.
    fn measure_height(&self, item: &NodeId, width: f32) -> f32 {
        self.tree
            .get_element(*item)
            .map(|e| {
                let applied = e
                    .style
                    .get(StyleProperty::Width)
                    .and_then(StyleValue::as_px)
                    .unwrap_or(width);
                e.content.height_at(applied)
            })
            .unwrap_or(0.0)
    }

    fn set_item_style(&mut self, item: &NodeId, property: StyleProperty, value: StyleValue) {
        self.set_style(*item, property, value);
    }

    fn clear_item_style(&mut self, item: &NodeId, property: StyleProperty) {
        self.clear_style(*item, property);
    }

    fn set_container_style(&mut self, property: StyleProperty, value: StyleValue) {
        if let Some(container) = self.container {
            self.set_style(container, property, value);
        }
    }

    fn clear_container_style(&mut self, property: StyleProperty) {
        if let Some(container) = self.container {
            self.clear_style(container, property);
        }
    }
}
