//! DOM Element implementation.

use crate::attributes::AttributeMap;
use crate::content::IntrinsicContent;
use crate::selector::{CompoundSelector, SimpleSelector};
use crate::style::InlineStyle;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Interned lowercase tag name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(Arc<str>);

impl TagName {
    pub fn new(name: &str) -> Self {
        static INTERNED: Lazy<RwLock<HashMap<String, Arc<str>>>> =
            Lazy::new(|| RwLock::new(HashMap::new()));

        let lower = name.to_ascii_lowercase();

        {
            let cache = INTERNED.read();
            if let Some(s) = cache.get(&lower) {
                return TagName(s.clone());
            }
        }

        let mut cache = INTERNED.write();
        let s = cache
            .entry(lower.clone())
            .or_insert_with(|| Arc::from(lower.as_str()))
            .clone();
        TagName(s)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn div() -> Self {
        Self::new("div")
    }
    pub fn section() -> Self {
        Self::new("section")
    }
    pub fn button() -> Self {
        Self::new("button")
    }
    pub fn img() -> Self {
        Self::new("img")
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element-specific data.
#[derive(Clone, Debug)]
pub struct ElementData {
    /// Tag name (lowercase).
    pub tag_name: TagName,
    /// Attributes.
    pub attributes: AttributeMap,
    /// ID attribute (cached).
    pub id: Option<Arc<str>>,
    /// Class list (cached).
    pub class_list: SmallVec<[Arc<str>; 4]>,
    /// Inline style.
    pub style: InlineStyle,
    /// Content used for height measurement.
    pub content: IntrinsicContent,
    /// Measured border-box width, for containers.
    pub rendered_width: Option<f32>,
}

impl ElementData {
    pub fn new(tag_name: TagName) -> Self {
        Self {
            tag_name,
            attributes: AttributeMap::new(),
            id: None,
            class_list: SmallVec::new(),
            style: InlineStyle::new(),
            content: IntrinsicContent::default(),
            rendered_width: None,
        }
    }

    /// Builder: set classes from a whitespace separated list.
    pub fn with_classes(mut self, classes: &str) -> Self {
        self.set_attribute("class", classes);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_content(mut self, content: IntrinsicContent) -> Self {
        self.content = content;
        self
    }

    pub fn with_rendered_width(mut self, width: f32) -> Self {
        self.rendered_width = Some(width);
        self
    }

    /// Set an attribute, updating cached values.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name_lower = name.to_ascii_lowercase();

        match name_lower.as_str() {
            "id" => {
                self.id = Some(Arc::from(value));
            }
            "class" => {
                self.class_list = value.split_whitespace().map(Arc::from).collect();
            }
            _ => {}
        }

        self.attributes.set(&name_lower, value);
    }

    #[inline]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c.as_ref() == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.class_list.push(Arc::from(class));
            self.update_class_attribute();
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(pos) = self.class_list.iter().position(|c| c.as_ref() == class) {
            self.class_list.remove(pos);
            self.update_class_attribute();
        }
    }

    fn update_class_attribute(&mut self) {
        let class_str: String = self
            .class_list
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        self.attributes.set("class", &class_str);
    }

    /// Check if this element matches every part of a compound selector.
    pub fn matches(&self, selector: &CompoundSelector) -> bool {
        selector.parts().iter().all(|part| self.matches_simple(part))
    }

    fn matches_simple(&self, selector: &SimpleSelector) -> bool {
        match selector {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => self.tag_name.as_str() == tag,
            SimpleSelector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            SimpleSelector::Class(class) => self.has_class(class),
            SimpleSelector::Attribute { name, value } => match (self.get_attribute(name), value) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_interning() {
        let a = TagName::new("DIV");
        let b = TagName::div();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "div");
    }

    #[test]
    fn test_class_list() {
        let mut elem = ElementData::new(TagName::div()).with_classes("portfolio-item web");
        assert!(elem.has_class("web"));
        assert!(!elem.has_class("print"));

        elem.add_class("active");
        assert_eq!(elem.get_attribute("class"), Some("portfolio-item web active"));

        elem.remove_class("web");
        assert!(!elem.has_class("web"));
        assert_eq!(elem.get_attribute("class"), Some("portfolio-item active"));
    }

    #[test]
    fn test_matches_compound() {
        let elem = ElementData::new(TagName::button())
            .with_classes("filter-btn")
            .with_attribute("data-filter", ".web");

        assert!(elem.matches(&".filter-btn".parse().unwrap()));
        assert!(elem.matches(&"button[data-filter]".parse().unwrap()));
        assert!(elem.matches(&"[data-filter=\".web\"]".parse().unwrap()));
        assert!(!elem.matches(&"[data-filter=\"*\"]".parse().unwrap()));
        assert!(!elem.matches(&"div.filter-btn".parse().unwrap()));
    }
}
