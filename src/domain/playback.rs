// SPDX-License-Identifier: MPL-2.0
//! Playback snapshot reported by the native player.

/// A range of media the native player has already buffered.
///
/// Values come straight from the native side and are not trusted: the start
/// may be negative and the end may run past the total duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedRange {
    pub start_ms: i64,
    pub duration_ms: i64,
}

impl BufferedRange {
    #[must_use]
    pub fn new(start_ms: i64, duration_ms: i64) -> Self {
        Self {
            start_ms,
            duration_ms,
        }
    }

    #[must_use]
    pub fn end_ms(self) -> i64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    /// Returns `(start, end)` clipped to `[0, total_ms]`, or `None` when
    /// nothing of the range is left.
    #[must_use]
    pub fn clipped(self, total_ms: i64) -> Option<(i64, i64)> {
        let total = total_ms.max(0);
        let start = self.start_ms.clamp(0, total);
        let end = self.end_ms().clamp(0, total);
        (end > start).then_some((start, end))
    }
}

/// Latest known state of the native player.
///
/// Positions are in milliseconds and never negative once ingested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub current_ms: i64,
    pub total_ms: i64,
    pub is_playing: bool,
    pub is_buffering: bool,
    pub buffered_ranges: Vec<BufferedRange>,
}

impl PlaybackSnapshot {
    /// Records a progress report, sanitizing negative values.
    pub fn record_progress(&mut self, current_ms: i64, total_ms: i64) {
        self.current_ms = current_ms.max(0);
        self.total_ms = total_ms.max(0);
    }

    /// Clamps a requested position into `[0, total_ms]`.
    ///
    /// An unknown (zero) total only bounds the lower end.
    #[must_use]
    pub fn clamp_position(&self, target_ms: i64) -> i64 {
        if self.total_ms > 0 {
            target_ms.clamp(0, self.total_ms)
        } else {
            target_ms.max(0)
        }
    }

    /// Returns to the start-of-media state after playback finished.
    pub fn reset_finished(&mut self) {
        self.current_ms = 0;
        self.is_playing = false;
        self.is_buffering = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_keeps_ranges_inside_total() {
        assert_eq!(BufferedRange::new(1000, 2000).clipped(10_000), Some((1000, 3000)));
    }

    #[test]
    fn clipped_trims_both_ends() {
        assert_eq!(BufferedRange::new(-500, 1500).clipped(10_000), Some((0, 1000)));
        assert_eq!(BufferedRange::new(9000, 5000).clipped(10_000), Some((9000, 10_000)));
    }

    #[test]
    fn clipped_drops_ranges_outside_total() {
        assert_eq!(BufferedRange::new(12_000, 1000).clipped(10_000), None);
        assert_eq!(BufferedRange::new(-3000, 1000).clipped(10_000), None);
        assert_eq!(BufferedRange::new(0, 0).clipped(10_000), None);
    }

    #[test]
    fn end_saturates() {
        assert_eq!(BufferedRange::new(i64::MAX, 10).end_ms(), i64::MAX);
    }

    #[test]
    fn record_progress_sanitizes_negative_values() {
        let mut snapshot = PlaybackSnapshot::default();
        snapshot.record_progress(-40, -1);
        assert_eq!(snapshot.current_ms, 0);
        assert_eq!(snapshot.total_ms, 0);
    }

    #[test]
    fn clamp_position_respects_total() {
        let snapshot = PlaybackSnapshot {
            total_ms: 120_000,
            ..PlaybackSnapshot::default()
        };
        assert_eq!(snapshot.clamp_position(-10), 0);
        assert_eq!(snapshot.clamp_position(500_000), 120_000);
        assert_eq!(snapshot.clamp_position(60_000), 60_000);
    }

    #[test]
    fn clamp_position_with_unknown_total_only_floors() {
        let snapshot = PlaybackSnapshot::default();
        assert_eq!(snapshot.clamp_position(-10), 0);
        assert_eq!(snapshot.clamp_position(42_000), 42_000);
    }

    #[test]
    fn reset_finished_rewinds_and_stops() {
        let mut snapshot = PlaybackSnapshot {
            current_ms: 90_000,
            total_ms: 120_000,
            is_playing: true,
            is_buffering: true,
            buffered_ranges: vec![BufferedRange::new(0, 120_000)],
        };
        snapshot.reset_finished();
        assert_eq!(snapshot.current_ms, 0);
        assert_eq!(snapshot.total_ms, 120_000);
        assert!(!snapshot.is_playing);
        assert!(!snapshot.is_buffering);
        assert_eq!(snapshot.buffered_ranges.len(), 1);
    }
}
