//! DOM Tree implementation.

use crate::element::{ElementData, TagName};
use crate::selector::CompoundSelector;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::{debug, warn};

new_key_type! {
    /// Handle to an element in a [`DomTree`].
    pub struct NodeId;
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
    data: ElementData,
}

/// The DOM tree structure.
#[derive(Clone, Debug)]
pub struct DomTree {
    /// All nodes in the tree.
    nodes: SlotMap<NodeId, Node>,
    /// Root node (`body`).
    root: NodeId,
    /// ID to node mapping for fast lookups.
    id_map: HashMap<String, NodeId>,
}

impl DomTree {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            parent: None,
            children: SmallVec::new(),
            data: ElementData::new(TagName::new("body")),
        });
        Self {
            nodes,
            root,
            id_map: HashMap::new(),
        }
    }

    /// Get the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get element data for a node.
    pub fn get_element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).map(|n| &n.data)
    }

    /// Get mutable element data for a node.
    pub fn get_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).map(|n| &mut n.data)
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        let id_value = data.id.clone();
        let id = self.nodes.insert(Node {
            parent: None,
            children: SmallVec::new(),
            data,
        });

        if let Some(elem_id) = id_value {
            self.id_map.insert(elem_id.to_string(), id);
        }

        id
    }

    /// Append a child to a parent node, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }

        self.detach(child);

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    /// Create an element and append it in one step.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = self.create_element(data);
        self.append_child(parent, id);
        id
    }

    /// Remove a node and its subtree from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            warn!("refusing to remove the document root");
            return;
        }
        self.detach(id);

        let mut removed = 0usize;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                if let Some(elem_id) = node.data.id.as_deref() {
                    self.id_map.remove(elem_id);
                }
                removed += 1;
                stack.extend(node.children);
            }
        }
        debug!(?id, removed, "removed subtree");
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.retain(|c| *c != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &CompoundSelector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| {
                self.get_element(*id)
                    .map(|e| e.matches(selector))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn query_selector(&self, scope: NodeId, selector: &CompoundSelector) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|id| {
            self.get_element(*id)
                .map(|e| e.matches(selector))
                .unwrap_or(false)
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let container = tree.append_element(
            root,
            ElementData::new(TagName::section()).with_attribute("id", "grid"),
        );
        let items = ["web", "print", "web"]
            .iter()
            .map(|tag| {
                let classes = format!("portfolio-item {}", tag);
                tree.append_element(
                    container,
                    ElementData::new(TagName::div()).with_classes(&classes),
                )
            })
            .collect();
        (tree, container, items)
    }

    #[test]
    fn test_query_selector_all_document_order() {
        let (tree, container, items) = grid();
        let found = tree.query_selector_all(container, &".portfolio-item".parse().unwrap());
        assert_eq!(found, items);

        let web = tree.query_selector_all(container, &".web".parse().unwrap());
        assert_eq!(web, vec![items[0], items[2]]);
    }

    #[test]
    fn test_nested_descendants() {
        let (mut tree, container, items) = grid();
        let inner = tree.append_element(
            items[0],
            ElementData::new(TagName::img()).with_classes("thumb"),
        );
        assert_eq!(
            tree.descendants(container),
            vec![items[0], inner, items[1], items[2]]
        );
        assert_eq!(tree.parent(inner), Some(items[0]));
    }

    #[test]
    fn test_get_element_by_id() {
        let (tree, container, _) = grid();
        assert_eq!(tree.get_element_by_id("grid"), Some(container));
        assert_eq!(tree.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, container, items) = grid();
        tree.remove(items[1]);
        assert!(!tree.contains(items[1]));
        assert_eq!(tree.children(container), &[items[0], items[2]]);

        tree.remove(container);
        assert_eq!(tree.get_element_by_id("grid"), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_root_is_ignored() {
        let (mut tree, container, _) = grid();
        let before = tree.len();
        let root = tree.root();
        tree.remove(root);
        assert!(tree.contains(root));
        assert_eq!(tree.len(), before);
        assert_eq!(tree.parent(container), Some(root));
    }

    #[test]
    fn test_append_moves_node() {
        let (mut tree, container, items) = grid();
        let root = tree.root();
        tree.append_child(root, items[0]);
        assert_eq!(tree.children(container), &[items[1], items[2]]);
        assert_eq!(tree.parent(items[0]), Some(root));
    }
}
