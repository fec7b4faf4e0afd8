//! Filter buttons.
//!
//! Buttons are elements with the `filter-btn` class and a `data-filter`
//! value. Exactly one carries the `active` class once one has been chosen.

use crate::filter::Filter;
use dom::{CompoundSelector, DomTree, NodeId, SimpleSelector};
use tracing::debug;

pub const BUTTON_CLASS: &str = "filter-btn";
pub const ACTIVE_CLASS: &str = "active";
pub const FILTER_ATTRIBUTE: &str = "data-filter";

/// The set of filter buttons found under a scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterBar {
    buttons: Vec<NodeId>,
}

impl FilterBar {
    /// Collect every filter button under `scope`, in document order.
    pub fn discover(tree: &DomTree, scope: NodeId) -> Self {
        let buttons = tree.query_selector_all(scope, &CompoundSelector::class(BUTTON_CLASS));
        debug!(buttons = buttons.len(), "filter bar discovered");
        Self { buttons }
    }

    pub fn buttons(&self) -> &[NodeId] {
        &self.buttons
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Raw `data-filter` value of a button.
    pub fn value<'t>(&self, tree: &'t DomTree, button: NodeId) -> Option<&'t str> {
        tree.get_element(button)
            .and_then(|e| e.get_attribute(FILTER_ATTRIBUTE))
    }

    /// Activate `button`: it becomes the only active button, and its filter
    /// is returned. A button without a value selects everything.
    ///
    /// Returns `None` if `button` is not part of this bar.
    pub fn activate(&self, tree: &mut DomTree, button: NodeId) -> Option<Filter> {
        if !self.buttons.contains(&button) {
            return None;
        }
        let filter = Filter::parse(self.value(tree, button).unwrap_or("*"));
        self.mark_active(tree, button);
        Some(filter)
    }

    /// Select by filter value, as if the matching button were clicked.
    ///
    /// The parsed filter is always returned. Button classes only change when
    /// a button with exactly this value exists.
    pub fn select(&self, tree: &mut DomTree, value: &str) -> Filter {
        let matching = self
            .buttons
            .iter()
            .copied()
            .find(|&b| self.value(tree, b) == Some(value));
        if let Some(button) = matching {
            self.mark_active(tree, button);
        }
        Filter::parse(value)
    }

    /// The currently active button, if any.
    pub fn active(&self, tree: &DomTree) -> Option<NodeId> {
        let selector = CompoundSelector::from(vec![
            SimpleSelector::Class(BUTTON_CLASS.to_string()),
            SimpleSelector::Class(ACTIVE_CLASS.to_string()),
        ]);
        self.buttons.iter().copied().find(|&b| {
            tree.get_element(b)
                .map(|e| e.matches(&selector))
                .unwrap_or(false)
        })
    }

    fn mark_active(&self, tree: &mut DomTree, button: NodeId) {
        for &other in &self.buttons {
            if let Some(elem) = tree.get_element_mut(other) {
                if other == button {
                    elem.add_class(ACTIVE_CLASS);
                } else {
                    elem.remove_class(ACTIVE_CLASS);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::{ElementData, TagName};

    fn bar() -> (DomTree, FilterBar, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let nav = tree.append_element(root, ElementData::new(TagName::new("nav")));
        let buttons: Vec<NodeId> = [Some("*"), Some(".web"), Some(".print"), None]
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let classes = if i == 0 { "filter-btn active" } else { "filter-btn" };
                let mut data = ElementData::new(TagName::button()).with_classes(classes);
                if let Some(value) = value {
                    data = data.with_attribute(FILTER_ATTRIBUTE, value);
                }
                tree.append_element(nav, data)
            })
            .collect();
        tree.append_element(nav, ElementData::new(TagName::button()).with_classes("other"));
        let bar = FilterBar::discover(&tree, root);
        (tree, bar, buttons)
    }

    fn active_count(tree: &DomTree, bar: &FilterBar) -> usize {
        bar.buttons()
            .iter()
            .filter(|&&b| tree.get_element(b).unwrap().has_class(ACTIVE_CLASS))
            .count()
    }

    #[test]
    fn test_discover() {
        let (_, bar, buttons) = bar();
        assert_eq!(bar.buttons(), buttons.as_slice());
    }

    #[test]
    fn test_activate_moves_active_class() {
        let (mut tree, bar, buttons) = bar();
        assert_eq!(bar.active(&tree), Some(buttons[0]));

        assert_eq!(bar.activate(&mut tree, buttons[1]), Some(Filter::tag("web")));
        assert_eq!(bar.active(&tree), Some(buttons[1]));
        assert_eq!(active_count(&tree, &bar), 1);

        assert_eq!(bar.activate(&mut tree, buttons[3]), Some(Filter::All));
        assert_eq!(bar.active(&tree), Some(buttons[3]));
        assert_eq!(active_count(&tree, &bar), 1);
    }

    #[test]
    fn test_activate_foreign_node() {
        let (mut tree, bar, buttons) = bar();
        let root = tree.root();
        assert_eq!(bar.activate(&mut tree, root), None);
        assert_eq!(bar.active(&tree), Some(buttons[0]));
    }

    #[test]
    fn test_select_by_value() {
        let (mut tree, bar, buttons) = bar();
        assert_eq!(bar.select(&mut tree, ".print"), Filter::tag("print"));
        assert_eq!(bar.active(&tree), Some(buttons[2]));

        // No button for this value: filter still parsed, classes untouched.
        assert_eq!(bar.select(&mut tree, ".video"), Filter::tag("video"));
        assert_eq!(bar.active(&tree), Some(buttons[2]));
    }
}
