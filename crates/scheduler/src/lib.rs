//! Cooperative timer scheduling.
//!
//! Everything here runs on a single thread against a virtual clock that the
//! host advances. Timers carry a typed payload instead of a closure; the
//! owner pops due payloads and dispatches them itself, which lets a callback
//! schedule further timers without borrowing the queue re-entrantly.

pub mod debounce;
pub mod timers;

pub use debounce::Debouncer;
pub use timers::{FiredTimer, TimerId, TimerQueue};
