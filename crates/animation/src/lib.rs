//! Visual state transitions for masonry items.
//!
//! Items move between a hidden and a visible preset through CSS transitions
//! declared on the item itself; nothing here tracks completion. Callers that
//! need to sequence after a transition wait a fixed fraction of the duration.

pub mod easing;
pub mod preset;
pub mod transition;

pub use easing::Easing;
pub use preset::StylePreset;
pub use transition::{StyleSink, TransitionAnimator};
