//! Cooperative stop flag.
//!
//! The interrupt handler only flips the flag; the jam loop polls it between
//! rounds. A jam call already in progress always runs to completion.

use core::sync::atomic::{AtomicBool, Ordering};

pub struct StopSignal {
    requested: AtomicBool,
}

impl StopSignal {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Ask the running loop to stop after its current round.
    ///
    /// Idempotent. Only the first call prints the notice; returns whether this
    /// call was the one that set the flag.
    pub fn request_stop(&self) -> bool {
        let first = !self.requested.swap(true, Ordering::SeqCst);
        if first {
            log::warn!("Stopping jamming...");
        }
        first
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
