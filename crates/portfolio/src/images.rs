//! Waiting for images before the first layout.

use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Delay before falling back to a default-config engine when images failed.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(1000);

/// How the wait ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImageWaitOutcome {
    /// Every image loaded, or there were none.
    Ready,
    /// Every image settled and at least one failed.
    Failed { failed: usize },
    /// Not every image settled within the timeout.
    TimedOut { settled: usize, total: usize },
}

/// Counts image load/error events against a timeout.
///
/// The first outcome reached sticks; later events are ignored.
#[derive(Clone, Debug)]
pub struct ImageGate {
    total: usize,
    loaded: usize,
    failed: usize,
    timeout: Duration,
    elapsed: Duration,
    outcome: Option<ImageWaitOutcome>,
}

impl ImageGate {
    pub fn new(total: usize, timeout: Duration) -> Self {
        Self {
            total,
            loaded: 0,
            failed: 0,
            timeout,
            elapsed: Duration::ZERO,
            outcome: (total == 0).then_some(ImageWaitOutcome::Ready),
        }
    }

    pub fn on_load(&mut self) -> Option<ImageWaitOutcome> {
        if self.outcome.is_none() {
            self.loaded += 1;
            self.check_settled();
        }
        self.outcome
    }

    pub fn on_error(&mut self) -> Option<ImageWaitOutcome> {
        if self.outcome.is_none() {
            self.failed += 1;
            self.check_settled();
        }
        self.outcome
    }

    /// Let `elapsed` pass; resolves as timed out once the timeout is reached.
    pub fn poll(&mut self, elapsed: Duration) -> Option<ImageWaitOutcome> {
        self.elapsed += elapsed;
        if self.outcome.is_none() && self.elapsed >= self.timeout {
            warn!(
                settled = self.settled(),
                total = self.total,
                "timed out waiting for images, continuing"
            );
            self.outcome = Some(ImageWaitOutcome::TimedOut {
                settled: self.settled(),
                total: self.total,
            });
        }
        self.outcome
    }

    pub fn outcome(&self) -> Option<ImageWaitOutcome> {
        self.outcome
    }

    pub fn settled(&self) -> usize {
        self.loaded + self.failed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn check_settled(&mut self) {
        if self.settled() < self.total {
            return;
        }
        self.outcome = Some(if self.failed > 0 {
            warn!(failed = self.failed, "some images failed to load");
            ImageWaitOutcome::Failed {
                failed: self.failed,
            }
        } else {
            ImageWaitOutcome::Ready
        });
    }
}
