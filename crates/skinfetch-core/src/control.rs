//! Run control: a shared stop token for sweeps.
//!
//! The CLI requests a stop on Ctrl-C; the worker pool stops admitting queued
//! jobs and lets in-flight ones reach their terminal outcome. A second Ctrl-C
//! while draining means the user wants out now.

use std::sync::atomic::{AtomicBool, Ordering};

/// What an interrupt signal should do given the signals seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// First signal: stop admitting work and drain in-flight jobs.
    Drain,
    /// Repeated signal: exit without waiting.
    ForceExit,
}

#[derive(Debug, Default)]
pub struct RunControl {
    stop: AtomicBool,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            tracing::info!("stop requested; draining in-flight jobs");
        }
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Handle one interrupt signal.
    pub fn interrupt(&self) -> Interrupt {
        if self.stop.swap(true, Ordering::AcqRel) {
            tracing::warn!("second interrupt; exiting without draining");
            Interrupt::ForceExit
        } else {
            tracing::info!("stop requested; draining in-flight jobs");
            Interrupt::Drain
        }
    }
}
