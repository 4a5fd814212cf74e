//! Progress reporting and cancellation

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

/// Receives one tick per evaluated row, numbered from 1.
pub trait ProgressSink {
    fn report(&mut self, value: u64);
}

impl<F: FnMut(u64)> ProgressSink for F {
    fn report(&mut self, value: u64) {
        self(value)
    }
}

/// Discards every tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _value: u64) {}
}

/// Forwards ticks over a channel. A dropped receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelProgress(pub Sender<u64>);

impl ProgressSink for ChannelProgress {
    fn report(&mut self, value: u64) {
        let _ = self.0.send(value);
    }
}

/// Number of ticks a transform of `iterations` generations emits.
pub fn total_ticks(iterations: usize, height: usize) -> u64 {
    iterations as u64 * height as u64
}

/// Shared flag checked by the engine between rows.
#[derive(Debug, Default, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
