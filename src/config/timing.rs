// SPDX-License-Identifier: MPL-2.0
//! Timing domain types for the controls overlay.
//!
//! These newtypes wrap the auto-hide delay and fade duration so that a
//! hand-edited configuration can never produce a zero-length countdown or
//! an absurdly long fade.

use super::defaults::{
    DEFAULT_FADE_MS, DEFAULT_HIDE_DELAY_MS, MAX_FADE_MS, MAX_HIDE_DELAY_MS, MIN_HIDE_DELAY_MS,
};
use std::time::Duration;

/// Idle time before the controls start fading out, in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–30 seconds).
///
/// # Example
///
/// ```
/// use player_controls::config::HideDelay;
///
/// let delay = HideDelay::new(5000);
/// assert_eq!(delay.value(), 5000);
///
/// // Values outside range are clamped
/// let too_high = HideDelay::new(100_000);
/// assert_eq!(too_high.value(), 30_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelay(u64);

impl HideDelay {
    /// Creates a new hide delay, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_HIDE_DELAY_MS, MAX_HIDE_DELAY_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for HideDelay {
    fn default() -> Self {
        Self(DEFAULT_HIDE_DELAY_MS)
    }
}

/// Length of a show/hide fade, in milliseconds.
///
/// Zero is allowed and means the controls switch instantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeDuration(u64);

impl FadeDuration {
    /// Creates a new fade duration, clamping to the maximum.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.min(MAX_FADE_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the fade as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if the fade is instantaneous.
    #[must_use]
    pub fn is_instant(self) -> bool {
        self.0 == 0
    }
}

impl Default for FadeDuration {
    fn default() -> Self {
        Self(DEFAULT_FADE_MS)
    }
}
