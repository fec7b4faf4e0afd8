//! JSON scene descriptions.
//!
//! A scene is a portfolio page reduced to what the engine can see: a
//! container width, filter buttons, and items with tags, sizing and images.

use common::{MosaicError, MosaicResult};
use dom::{DomTree, ElementData, IntrinsicContent, NodeId, TagName};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Class of the element the engine binds to.
pub const CONTAINER_CLASS: &str = "portfolio-grid";
/// Class every item carries in addition to its tags.
pub const ITEM_CLASS: &str = "portfolio-item";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    #[default]
    Loaded,
    Failed,
    /// Never settles; the gate times out.
    Pending,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: IntrinsicContent,
    #[serde(default)]
    pub images: Vec<ImageStatus>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub container_width: f32,
    /// `data-filter` values, one button each.
    #[serde(default)]
    pub filters: Vec<String>,
    pub items: Vec<SceneItem>,
}

/// A scene turned into a document.
#[derive(Clone, Debug)]
pub struct SceneDocument {
    pub tree: DomTree,
    pub container: NodeId,
    pub items: Vec<NodeId>,
}

impl Scene {
    pub fn from_json(text: &str) -> MosaicResult<Self> {
        let scene: Self =
            serde_json::from_str(text).map_err(|e| MosaicError::parse(e.to_string()))?;
        if !scene.container_width.is_finite() {
            return Err(MosaicError::parse("container_width must be a finite number"));
        }
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> MosaicResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Seven fixed-height items across three categories.
    pub fn demo() -> Self {
        let items = [
            (100.0, "web"),
            (150.0, "print"),
            (80.0, "web"),
            (200.0, "brand"),
            (90.0, "print"),
            (120.0, "web"),
            (60.0, "brand"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (height, tag))| SceneItem {
            id: Some(format!("project-{}", i + 1)),
            tags: vec![tag.to_string()],
            content: IntrinsicContent::Fixed { height },
            images: vec![ImageStatus::Loaded],
        })
        .collect();

        Self {
            container_width: 1000.0,
            filters: ["*", ".web", ".print", ".brand"]
                .into_iter()
                .map(String::from)
                .collect(),
            items,
        }
    }

    pub fn image_statuses(&self) -> impl Iterator<Item = ImageStatus> + '_ {
        self.items.iter().flat_map(|item| item.images.iter().copied())
    }

    pub fn image_count(&self) -> usize {
        self.items.iter().map(|item| item.images.len()).sum()
    }

    /// Build the document: a button bar and the grid container under
    /// `body`, each item an element with its images as children.
    pub fn build(&self) -> SceneDocument {
        let mut tree = DomTree::new();
        let root = tree.root();

        let nav = tree.append_element(
            root,
            ElementData::new(TagName::new("nav")).with_classes("portfolio-filters"),
        );
        for (i, value) in self.filters.iter().enumerate() {
            let classes = if i == 0 { "filter-btn active" } else { "filter-btn" };
            tree.append_element(
                nav,
                ElementData::new(TagName::button())
                    .with_classes(classes)
                    .with_attribute("data-filter", value),
            );
        }

        let container = tree.append_element(
            root,
            ElementData::new(TagName::section())
                .with_classes(CONTAINER_CLASS)
                .with_rendered_width(self.container_width),
        );

        let items = self
            .items
            .iter()
            .map(|item| {
                let mut classes = vec![ITEM_CLASS];
                classes.extend(item.tags.iter().map(String::as_str));
                let mut data = ElementData::new(TagName::div())
                    .with_classes(&classes.join(" "))
                    .with_content(item.content);
                if let Some(id) = &item.id {
                    data = data.with_attribute("id", id);
                }
                let node = tree.append_element(container, data);
                for status in &item.images {
                    let label = match status {
                        ImageStatus::Loaded => "loaded",
                        ImageStatus::Failed => "failed",
                        ImageStatus::Pending => "pending",
                    };
                    tree.append_element(
                        node,
                        ElementData::new(TagName::img()).with_attribute("data-status", label),
                    );
                }
                node
            })
            .collect();

        SceneDocument {
            tree,
            container,
            items,
        }
    }
}
