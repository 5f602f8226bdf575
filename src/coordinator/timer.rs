// SPDX-License-Identifier: MPL-2.0
//! Cancellable deferred actions.
//!
//! A [`DeferredTask`] owns at most one sleeping tokio task. When the sleep
//! ends, a [`TimerFired`] message is posted to the coordinator's inbox and
//! handled there like any other input, so all state changes stay on the
//! single writer. Re-arming aborts the previous task first, and every fired
//! message carries a generation that must match the currently armed one;
//! a message from a timer that was cancelled after it had already fired is
//! therefore dropped on arrival.

use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;

/// Which deferred action fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Idle countdown before the controls fade out.
    AutoHide,
    /// End of a show/hide fade.
    FadeSettled,
    /// Rotation settle delay after a fullscreen toggle.
    ScreenUpdate,
}

/// Message posted when a deferred action comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub generation: u64,
}

/// A single re-armable timer.
#[derive(Debug)]
pub struct DeferredTask {
    kind: TimerKind,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl DeferredTask {
    #[must_use]
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            generation: 0,
            handle: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Cancels any pending fire, then arms a new one `delay` from now.
    ///
    /// Must be called from within a tokio runtime. Does nothing if the inbox
    /// is gone.
    pub fn reschedule<T>(&mut self, delay: Duration, inbox: &WeakUnboundedSender<T>)
    where
        T: From<TimerFired> + Send + 'static,
    {
        self.cancel();
        let Some(inbox) = inbox.upgrade() else {
            tracing::debug!(kind = ?self.kind, "inbox closed, timer not armed");
            return;
        };
        self.generation = self.generation.wrapping_add(1);
        let fired = TimerFired {
            kind: self.kind,
            generation: self.generation,
        };
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may be gone after teardown; nothing to do then.
            let _ = inbox.send(T::from(fired));
        }));
    }

    /// Cancels the pending fire, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True between `reschedule` and either `cancel` or an accepted fire.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Consumes a fired message. Returns false for stale or foreign fires.
    pub fn accept(&mut self, fired: TimerFired) -> bool {
        if fired.kind != self.kind || fired.generation != self.generation || self.handle.is_none()
        {
            return false;
        }
        self.handle = None;
        true
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
