//! The synchronized channel every worker reports through.
//!
//! A .NET version of this funnel would share a `BlockingCollection<string>`
//! and rely on someone remembering to call `CompleteAdding()` before the
//! consumer leaves, and on nobody disposing the collection while a producer
//! is mid-`Add`. Both hazards disappear under ownership: sender halves are
//! moved into the worker threads, the queue lives as long as any half of
//! it, and the channel "completes" on its own when the last sender drops.
//!
//! Messages are queued whole. Two workers finishing at the same instant
//! interleave their lines, never their bytes.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::results::ResultMessage;

/// Producer half of the result channel. One clone per worker thread.
#[derive(Clone)]
pub struct ResultSender {
    inner: Sender<ResultMessage>,
}

impl ResultSender {
    /// Queues one message atomically.
    pub fn send(&self, message: ResultMessage) {
        // The receiver outlives every producer in normal operation; if it
        // is gone the run is already being torn down and a worker must not
        // panic over a lost line.
        let _ = self.inner.send(message);
    }
}

/// Consumer half of the result channel, owned by the coordinator.
pub struct ResultReceiver {
    inner: Receiver<ResultMessage>,
}

impl ResultReceiver {
    /// Collects every queued message without blocking, in delivery order.
    /// Run after all workers have been joined, one sweep sees everything.
    pub fn drain(&self) -> Vec<ResultMessage> {
        self.inner.try_iter().collect()
    }

    /// Number of messages currently queued
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Creates the channel a search run reports through.
pub fn result_channel() -> (ResultSender, ResultReceiver) {
    let (tx, rx) = unbounded();
    (ResultSender { inner: tx }, ResultReceiver { inner: rx })
}
