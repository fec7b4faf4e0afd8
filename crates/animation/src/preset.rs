//! Hidden / visible style presets.

use common::{MosaicError, MosaicResult};
use dom::style::{StyleProperty, StyleValue, TransformFunction, TransformList};
use serde::{Deserialize, Serialize};

/// Opacity and transform applied together when an item changes state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StylePreset {
    pub opacity: f32,
    #[serde(default)]
    pub transform: TransformList,
}

impl StylePreset {
    pub fn new(opacity: f32, transform: TransformList) -> Self {
        Self { opacity, transform }
    }

    /// `opacity: 0; transform: scale(0.8)`
    pub fn hidden() -> Self {
        Self::new(0.0, TransformList::from_functions([TransformFunction::Scale(0.8)]))
    }

    /// `opacity: 1; transform: scale(1)`
    pub fn visible() -> Self {
        Self::new(1.0, TransformList::from_functions([TransformFunction::Scale(1.0)]))
    }

    pub fn validate(&self, name: &str) -> MosaicResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(MosaicError::config(format!(
                "{}.opacity must be within 0..=1, got {}",
                name, self.opacity
            )));
        }
        Ok(())
    }

    /// Declarations this preset writes.
    pub fn declarations(&self) -> [(StyleProperty, StyleValue); 2] {
        [
            (StyleProperty::Opacity, StyleValue::Number(self.opacity)),
            (
                StyleProperty::Transform,
                StyleValue::Transform(self.transform.clone()),
            ),
        ]
    }
}
