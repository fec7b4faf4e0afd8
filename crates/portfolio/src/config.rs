//! Engine configuration.

use animation::StylePreset;
use common::{MosaicError, MosaicResult};
use dom::style::{TransformFunction, TransformList};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest duration any timing key may hold.
pub const MAX_DURATION: Duration = Duration::from_secs(60 * 60);

/// Masonry engine configuration.
///
/// Every key is named here; unknown keys in a config file are rejected.
/// Durations are written as integer milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MasonryConfig {
    /// Selector enumerating items inside the container.
    pub item_selector: String,
    /// Fixed column width; replaces the breakpoint table when set.
    pub column_width: Option<f32>,
    /// Space between columns and between stacked items, in pixels.
    pub gutter: f32,
    /// Duration of every item and container transition.
    #[serde(with = "millis")]
    pub transition_duration: Duration,
    /// Preset applied to items that fall out of the filter.
    pub hidden_style: StylePreset,
    /// Preset applied to matched items.
    pub visible_style: StylePreset,
    /// Delay added per item when revealing after a filter change.
    #[serde(with = "millis")]
    pub reveal_stagger: Duration,
    /// Quiet period before a resize triggers relayout.
    #[serde(with = "millis")]
    pub resize_debounce: Duration,
    /// Delay between construction and the first layout pass.
    #[serde(with = "millis")]
    pub initial_layout_delay: Duration,
    /// Upper bound on waiting for images before the first layout.
    #[serde(with = "millis")]
    pub image_timeout: Duration,
}

impl MasonryConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings used by the portfolio page: wider gutter, quicker
    /// transitions, and a slide-up reveal.
    pub fn portfolio() -> Self {
        Self {
            gutter: 24.0,
            transition_duration: Duration::from_millis(500),
            hidden_style: StylePreset::new(
                0.0,
                TransformList::from_functions([
                    TransformFunction::Scale(0.9),
                    TransformFunction::TranslateY(20.0),
                ]),
            ),
            visible_style: StylePreset::new(
                1.0,
                TransformList::from_functions([
                    TransformFunction::Scale(1.0),
                    TransformFunction::TranslateY(0.0),
                ]),
            ),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> MosaicResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| MosaicError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> MosaicResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn with_item_selector(mut self, selector: &str) -> Self {
        self.item_selector = selector.to_string();
        self
    }

    pub fn with_gutter(mut self, gutter: f32) -> Self {
        self.gutter = gutter;
        self
    }

    pub fn with_column_width(mut self, width: f32) -> Self {
        self.column_width = Some(width);
        self
    }

    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    pub fn with_styles(mut self, hidden: StylePreset, visible: StylePreset) -> Self {
        self.hidden_style = hidden;
        self.visible_style = visible;
        self
    }

    pub fn with_reveal_stagger(mut self, stagger: Duration) -> Self {
        self.reveal_stagger = stagger;
        self
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> MosaicResult<()> {
        if self.item_selector.trim().is_empty() {
            return Err(MosaicError::config("item_selector must not be empty"));
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            return Err(MosaicError::config(format!(
                "gutter must be a non-negative number, got {}",
                self.gutter
            )));
        }
        if let Some(width) = self.column_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(MosaicError::config(format!(
                    "column_width must be positive, got {}",
                    width
                )));
            }
        }
        let durations = [
            ("transition_duration", self.transition_duration),
            ("reveal_stagger", self.reveal_stagger),
            ("resize_debounce", self.resize_debounce),
            ("initial_layout_delay", self.initial_layout_delay),
            ("image_timeout", self.image_timeout),
        ];
        for (key, value) in durations {
            if value > MAX_DURATION {
                return Err(MosaicError::config(format!(
                    "{} must not exceed {}ms, got {}ms",
                    key,
                    MAX_DURATION.as_millis(),
                    value.as_millis()
                )));
            }
        }
        self.hidden_style.validate("hidden_style")?;
        self.visible_style.validate("visible_style")?;
        Ok(())
    }
}

impl Default for MasonryConfig {
    fn default() -> Self {
        Self {
            item_selector: ".portfolio-item".to_string(),
            column_width: None,
            gutter: 20.0,
            transition_duration: Duration::from_millis(600),
            hidden_style: StylePreset::hidden(),
            visible_style: StylePreset::visible(),
            reveal_stagger: Duration::from_millis(50),
            resize_debounce: Duration::from_millis(250),
            initial_layout_delay: Duration::from_millis(100),
            image_timeout: Duration::from_millis(5000),
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
