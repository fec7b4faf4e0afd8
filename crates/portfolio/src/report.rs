//! Serializable snapshot of an engine backed by a document.

use crate::engine::{FilterPhase, Masonry, Visibility};
use crate::host::DocumentHost;
use crate::images::ImageWaitOutcome;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemReport {
    /// Element id, or the item's registration index.
    pub id: String,
    pub column: Option<usize>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub visibility: Visibility,
    /// Inline style the engine left on the element.
    pub style: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutReport {
    pub filter: String,
    pub phase: FilterPhase,
    pub images: ImageWaitOutcome,
    pub columns: usize,
    pub item_width: f32,
    pub container_height: f32,
    pub layout_passes: u64,
    pub elapsed_ms: u64,
    pub items: Vec<ItemReport>,
}

impl LayoutReport {
    pub fn capture(engine: &Masonry<DocumentHost>, images: ImageWaitOutcome) -> Self {
        let tree = engine.host().tree();
        let items = engine
            .items()
            .iter()
            .enumerate()
            .map(|(index, state)| {
                let element = tree.get_element(state.item);
                ItemReport {
                    id: element
                        .and_then(|e| e.id.as_deref())
                        .map(str::to_string)
                        .unwrap_or_else(|| index.to_string()),
                    column: state.column,
                    x: state.position.map(|p| p.x),
                    y: state.position.map(|p| p.y),
                    visibility: state.visibility,
                    style: element.map(|e| e.style.to_css_text()).unwrap_or_default(),
                }
            })
            .collect();

        let (columns, item_width, container_height) = engine
            .last_layout()
            .map(|l| (l.geometry.columns, l.geometry.item_width, l.container_height))
            .unwrap_or((0, 0.0, 0.0));

        Self {
            filter: engine.current_filter().to_string(),
            phase: engine.phase(),
            images,
            columns,
            item_width,
            container_height,
            layout_passes: engine.layout_passes(),
            elapsed_ms: engine.now().as_millis() as u64,
            items,
        }
    }

    /// Item ids in each column, top to bottom.
    pub fn columns_summary(&self) -> Vec<Vec<String>> {
        let mut columns = vec![Vec::new(); self.columns];
        let mut placed: Vec<&ItemReport> =
            self.items.iter().filter(|i| i.column.is_some()).collect();
        placed.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
        for item in placed {
            if let Some(column) = item.column.filter(|c| *c < columns.len()) {
                columns[column].push(item.id.clone());
            }
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MasonryConfig;
    use crate::scene::Scene;
    use dom::style::StyleProperty;

    fn settled() -> Masonry<DocumentHost> {
        let doc = Scene::demo().build();
        let host = DocumentHost::new(doc.tree, Some(doc.container));
        let mut engine = Masonry::new(host, MasonryConfig::default()).unwrap();
        engine.run_until_idle();
        engine
    }

    #[test]
    fn test_capture() {
        let engine = settled();
        let report = LayoutReport::capture(&engine, ImageWaitOutcome::Ready);

        assert_eq!(report.filter, "*");
        assert_eq!(report.columns, 3);
        assert_eq!(report.item_width, 320.0);
        assert_eq!(report.container_height, 300.0);
        assert_eq!(report.layout_passes, 1);
        assert_eq!(report.elapsed_ms, 100);
        assert_eq!(report.items[0].id, "project-1");
        assert!(report.items[0].style.contains("position: absolute"));
        assert_eq!(
            engine.host().container_css(StyleProperty::Height).as_deref(),
            Some("300px")
        );
    }

    #[test]
    fn test_columns_summary() {
        let report = LayoutReport::capture(&settled(), ImageWaitOutcome::Ready);
        let ids = |v: &[usize]| v.iter().map(|i| format!("project-{}", i + 1)).collect::<Vec<_>>();
        assert_eq!(
            report.columns_summary(),
            vec![ids(&[0, 4, 6]), ids(&[1, 5]), ids(&[2, 3])]
        );
    }

    #[test]
    fn test_serializes() {
        let images = ImageWaitOutcome::TimedOut {
            settled: 1,
            total: 2,
        };
        let report = LayoutReport::capture(&settled(), images);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["images"]["outcome"], "timed_out");
        assert_eq!(json["phase"], "Idle");
        assert_eq!(json["items"][3]["x"], 680.0);
    }
}
