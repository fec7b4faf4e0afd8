//! Applying presets and staggered reveals.

use crate::easing::Easing;
use crate::preset::StylePreset;
use dom::style::{StyleProperty, StyleValue, Transition};
use scheduler::{TimerId, TimerQueue};
use std::time::Duration;
use tracing::trace;

/// Anything that can receive style declarations for an item.
pub trait StyleSink<I: ?Sized> {
    fn set_style(&mut self, item: &I, property: StyleProperty, value: StyleValue);
    fn clear_style(&mut self, item: &I, property: StyleProperty);
}

/// Properties the animator may leave on an item.
const ITEM_PROPERTIES: [StyleProperty; 8] = [
    StyleProperty::Position,
    StyleProperty::Left,
    StyleProperty::Top,
    StyleProperty::Width,
    StyleProperty::Transition,
    StyleProperty::Opacity,
    StyleProperty::Transform,
    StyleProperty::PointerEvents,
];

/// Applies hidden/visible presets with a fixed-duration transition.
#[derive(Clone, Debug)]
pub struct TransitionAnimator {
    duration: Duration,
    hidden: StylePreset,
    visible: StylePreset,
    easing: Easing,
}

impl TransitionAnimator {
    pub fn new(duration: Duration, hidden: StylePreset, visible: StylePreset) -> Self {
        Self {
            duration,
            hidden,
            visible,
            easing: Easing::ITEM_MOVE,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// How long the hide phase is given before relayout.
    pub fn hide_delay(&self) -> Duration {
        self.duration / 2
    }

    /// `transition` declaration for items.
    pub fn item_transition(&self) -> StyleValue {
        StyleValue::Transition(Transition {
            property: "all",
            duration: self.duration,
            timing: self.easing.to_css(),
        })
    }

    /// `transition` declaration for the container's height.
    pub fn container_transition(&self) -> StyleValue {
        StyleValue::Transition(Transition {
            property: "height",
            duration: self.duration,
            timing: Easing::Ease.to_css(),
        })
    }

    /// Absolute positioning at the origin, transition, and the visible preset.
    pub fn apply_base<I: ?Sized>(&self, sink: &mut impl StyleSink<I>, item: &I) {
        sink.set_style(item, StyleProperty::Position, StyleValue::Keyword("absolute"));
        sink.set_style(item, StyleProperty::Transition, self.item_transition());
        sink.set_style(item, StyleProperty::Left, StyleValue::Px(0.0));
        sink.set_style(item, StyleProperty::Top, StyleValue::Px(0.0));
        apply_preset(sink, item, &self.visible);
    }

    /// Hidden preset; the item stops receiving pointer events.
    pub fn apply_hidden<I: ?Sized>(&self, sink: &mut impl StyleSink<I>, item: &I) {
        apply_preset(sink, item, &self.hidden);
        sink.set_style(item, StyleProperty::PointerEvents, StyleValue::Keyword("none"));
    }

    /// Visible preset; pointer events restored.
    pub fn apply_visible<I: ?Sized>(&self, sink: &mut impl StyleSink<I>, item: &I) {
        apply_preset(sink, item, &self.visible);
        sink.set_style(item, StyleProperty::PointerEvents, StyleValue::Keyword("auto"));
    }

    /// Remove every property the animator or layout may have written.
    pub fn clear<I: ?Sized>(&self, sink: &mut impl StyleSink<I>, item: &I) {
        for property in ITEM_PROPERTIES {
            sink.clear_style(item, property);
        }
    }

    /// Delay of each of `count` staggered reveals: `index * increment`,
    /// saturating at `Duration::MAX`.
    pub fn stagger_delays(count: usize, increment: Duration) -> impl Iterator<Item = Duration> {
        (0..count).map(move |index| {
            u32::try_from(index)
                .ok()
                .and_then(|index| increment.checked_mul(index))
                .unwrap_or(Duration::MAX)
        })
    }

    /// Schedule `count` reveals on `queue`, one per index, staggered by
    /// `increment`. `payload` builds the timer payload for an index.
    pub fn schedule_reveal<T>(
        &self,
        queue: &mut TimerQueue<T>,
        count: usize,
        increment: Duration,
        mut payload: impl FnMut(usize) -> T,
    ) -> Vec<TimerId> {
        Self::stagger_delays(count, increment)
            .enumerate()
            .map(|(index, delay)| {
                trace!(index, delay_ms = delay.as_millis() as u64, "reveal scheduled");
                queue.schedule(delay, payload(index))
            })
            .collect()
    }
}

fn apply_preset<I: ?Sized>(sink: &mut impl StyleSink<I>, item: &I, preset: &StylePreset) {
    for (property, value) in preset.declarations() {
        sink.set_style(item, property, value);
    }
}
