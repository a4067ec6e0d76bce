//! Synchronization primitives shared between a running search and the
//! thread that controls it.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::Move;

/// A thread-safe stop flag for controlling search termination.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Extra plies (possibly negative) added to the depth budget of a search in
/// flight.
#[derive(Clone, Debug, Default)]
pub struct DepthAdjustment(Arc<AtomicI32>);

impl DepthAdjustment {
    #[inline]
    #[must_use]
    pub fn get(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, plies: i32) {
        self.0.store(plies, Ordering::Relaxed);
    }
}

/// Last principal line published by the search.
#[derive(Clone, Debug, Default)]
pub struct SharedLine(Arc<Mutex<Vec<Move>>>);

impl SharedLine {
    pub fn publish(&self, line: &[Move]) {
        let mut guard = self.0.lock();
        guard.clear();
        guard.extend_from_slice(line);
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Move> {
        self.0.lock().clone()
    }
}
