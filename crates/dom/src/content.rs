//! Intrinsic content sizing.
//!
//! Items in a masonry grid have a height that depends on the width they are
//! laid out at. The engine never stores that height; it asks the host to
//! measure it after the width has been applied.

use serde::{Deserialize, Serialize};

/// What an element contains, as far as its height is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntrinsicContent {
    /// Height does not depend on width.
    Fixed { height: f32 },
    /// Media with an aspect ratio (width / height) plus a fixed-height caption.
    Media {
        aspect_ratio: f32,
        #[serde(default)]
        caption_height: f32,
    },
}

impl Default for IntrinsicContent {
    fn default() -> Self {
        IntrinsicContent::Fixed { height: 0.0 }
    }
}

impl IntrinsicContent {
    /// Rendered height when laid out at `width`.
    pub fn height_at(&self, width: f32) -> f32 {
        match *self {
            IntrinsicContent::Fixed { height } => height.max(0.0),
            IntrinsicContent::Media {
                aspect_ratio,
                caption_height,
            } => {
                let media = if aspect_ratio > 0.0 && width > 0.0 {
                    width / aspect_ratio
                } else {
                    0.0
                };
                (media + caption_height).max(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_height_ignores_width() {
        let content = IntrinsicContent::Fixed { height: 120.0 };
        assert_eq!(content.height_at(300.0), 120.0);
        assert_eq!(content.height_at(0.0), 120.0);
    }

    #[test]
    fn test_media_height_scales_with_width() {
        let content = IntrinsicContent::Media {
            aspect_ratio: 1.5,
            caption_height: 40.0,
        };
        assert_eq!(content.height_at(300.0), 240.0);
        assert_eq!(content.height_at(0.0), 40.0);
    }

    #[test]
    fn test_deserialize_tagged() {
        let content: IntrinsicContent =
            serde_json::from_str(r#"{"kind":"media","aspect_ratio":2.0}"#).unwrap();
        assert_eq!(
            content,
            IntrinsicContent::Media {
                aspect_ratio: 2.0,
                caption_height: 0.0
            }
        );
    }
}
