// SPDX-License-Identifier: MPL-2.0
//! Forward-seek limiting for content that must be watched in order.
//!
//! The guard remembers the furthest position reached. Seeking backward is
//! always allowed; seeking forward is allowed up to the watermark
//! `max(current, high_watermark)`.
//!
//! A request past the watermark is either clamped to it or rejected:
//!
//! - **clamp** when the viewer is currently behind the watermark (they
//!   seeked back earlier) or when the gesture itself went backward before
//!   overshooting;
//! - **reject** otherwise, i.e. a straight jump ahead of anything watched.

/// What to do with a seek request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDecision {
    /// Issue the seek as requested.
    Accept,
    /// Issue the seek to the watermark instead of the requested position.
    Clamp(i64),
    /// Drop the request.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeekGuard {
    high_watermark_ms: i64,
}

impl SeekGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_watermark(high_watermark_ms: i64) -> Self {
        Self { high_watermark_ms }
    }

    #[must_use]
    pub fn high_watermark_ms(&self) -> i64 {
        self.high_watermark_ms
    }

    /// Furthest position a forward seek may reach.
    #[must_use]
    pub fn watermark(&self, current_ms: i64) -> i64 {
        current_ms.max(self.high_watermark_ms)
    }

    /// Records a playback position reported by the player.
    pub fn observe(&mut self, current_ms: i64) {
        self.high_watermark_ms = self.high_watermark_ms.max(current_ms);
    }

    /// Decides on a request. Does not change the guard.
    #[must_use]
    pub fn evaluate(&self, target_ms: i64, current_ms: i64, retreated: bool) -> SeekDecision {
        let watermark = self.watermark(current_ms);
        if target_ms <= watermark {
            return SeekDecision::Accept;
        }
        if current_ms < self.high_watermark_ms || retreated {
            SeekDecision::Clamp(watermark)
        } else {
            SeekDecision::Reject
        }
    }

    /// Bookkeeping after a seek was issued.
    pub fn commit(&mut self, current_ms: i64) {
        self.observe(current_ms);
    }
}
