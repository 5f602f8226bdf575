// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Auto-hide**: Idle delay before the controls fade out
//! - **Fades**: Durations of the opacity transitions
//! - **Fullscreen**: Rotation settle time and toolbar title length
//! - **Time labels**: Threshold for the hours field

// ==========================================================================
// Auto-hide Defaults
// ==========================================================================

/// Default idle time before the controls start fading out (in milliseconds).
pub const DEFAULT_HIDE_DELAY_MS: u64 = 3000;

/// Minimum idle time before auto-hide (in milliseconds).
pub const MIN_HIDE_DELAY_MS: u64 = 1000;

/// Maximum idle time before auto-hide (in milliseconds).
pub const MAX_HIDE_DELAY_MS: u64 = 30_000;

// ==========================================================================
// Fade Defaults
// ==========================================================================

/// Default duration of the show/hide fade (in milliseconds).
pub const DEFAULT_FADE_MS: u64 = 500;

/// Maximum fade duration (in milliseconds). Zero means "switch instantly".
pub const MAX_FADE_MS: u64 = 2000;

/// Duration of the forced fade-in when playback finishes (in milliseconds).
pub const FINISHED_FADE_MS: u64 = 100;

// ==========================================================================
// Fullscreen Defaults
// ==========================================================================

/// Delay between a fullscreen toggle and the host `screen_update` callback,
/// covering the native rotation animation (in milliseconds).
pub const SCREEN_UPDATE_DELAY_MS: u64 = 500;

/// Titles longer than this many characters are shortened in the toolbar.
pub const MAX_TITLE_CHARS: usize = 20;

// ==========================================================================
// Time Label Defaults
// ==========================================================================

/// Durations at or above this value show an hours field (1 hour).
pub const HOURS_THRESHOLD_MS: i64 = 60 * 60 * 1000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Auto-hide validation
    assert!(MIN_HIDE_DELAY_MS > 0);
    assert!(MAX_HIDE_DELAY_MS >= MIN_HIDE_DELAY_MS);
    assert!(DEFAULT_HIDE_DELAY_MS >= MIN_HIDE_DELAY_MS);
    assert!(DEFAULT_HIDE_DELAY_MS <= MAX_HIDE_DELAY_MS);

    // Fade validation
    assert!(DEFAULT_FADE_MS <= MAX_FADE_MS);
    assert!(FINISHED_FADE_MS <= MAX_FADE_MS);
    assert!(DEFAULT_FADE_MS < DEFAULT_HIDE_DELAY_MS);

    // Fullscreen validation
    assert!(MAX_TITLE_CHARS > 3);
};
