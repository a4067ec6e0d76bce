//! Progress reporting and cancellation.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::sync::{DepthAdjustment, SharedLine, StopFlag};

use super::super::Move;
use super::constants::PROGRESS_SCALE;

/// The narrow interface a search talks to while it runs.
pub trait SearchProgress {
    /// Share of the search completed, 0 to 100.
    fn report_progress(&self, percent: u8);
    /// Best line found so far, starting with the root move.
    fn report_best_line(&self, line: &[Move]);
    /// Plies added to (or removed from) the depth budget.
    fn depth_adjustment(&self) -> i32 {
        0
    }
    fn cancel(&self);
    fn is_cancelled(&self) -> bool;
}

/// Silent progress sink that never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl SearchProgress for NoProgress {
    fn report_progress(&self, _percent: u8) {}

    fn report_best_line(&self, _line: &[Move]) {}

    fn cancel(&self) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Progress state shared with a controlling thread.
///
/// Clone the monitor's handles (or wrap it in an `Arc`) to cancel or adjust a
/// running search from elsewhere.
#[derive(Debug, Default)]
pub struct SearchMonitor {
    stop: StopFlag,
    depth: DepthAdjustment,
    percent: AtomicU8,
    best_line: SharedLine,
}

impl SearchMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that stops the search when set.
    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    pub fn set_depth_adjustment(&self, plies: i32) {
        self.depth.set(plies);
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn best_line(&self) -> Vec<Move> {
        self.best_line.snapshot()
    }

    /// Prepare for another search.
    pub fn reset(&self) {
        self.stop.reset();
        self.percent.store(0, Ordering::Relaxed);
        self.best_line.publish(&[]);
    }
}

impl SearchProgress for SearchMonitor {
    fn report_progress(&self, percent: u8) {
        self.percent.fetch_max(percent.min(100), Ordering::Relaxed);
    }

    fn report_best_line(&self, line: &[Move]) {
        self.best_line.publish(line);
    }

    fn depth_adjustment(&self) -> i32 {
        self.depth.get()
    }

    fn cancel(&self) {
        self.stop.stop();
    }

    fn is_cancelled(&self) -> bool {
        self.stop.is_stopped()
    }
}

/// Fraction of the whole search covered by one subtree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ProgressSpan {
    start: f64,
    width: f64,
}

impl ProgressSpan {
    pub(crate) const WHOLE: ProgressSpan = ProgressSpan {
        start: 0.0,
        width: 1.0,
    };

    /// The share of child `index` out of `count` siblings.
    pub(crate) fn child(self, index: usize, count: usize) -> ProgressSpan {
        let count = count.max(1) as f64;
        ProgressSpan {
            start: self.start + self.width * index as f64 / count,
            width: self.width / count,
        }
    }

    /// Percentage reached once `done` of `count` children are finished.
    pub(crate) fn percent_after(self, done: usize, count: usize) -> u8 {
        let count = count.max(1) as f64;
        let reached = self.start + self.width * done as f64 / count;
        (reached * PROGRESS_SCALE).round().clamp(0.0, PROGRESS_SCALE) as u8
    }
}
