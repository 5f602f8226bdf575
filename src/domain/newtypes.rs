// SPDX-License-Identifier: MPL-2.0
//! Overlay value newtypes.
//!
//! This module provides type-safe wrappers for values exchanged with the
//! renderer and the native player, ensuring they are always valid.

// =============================================================================
// Opacity
// =============================================================================

/// Opacity of the controls overlay, guaranteed to be within 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Opacity(f32);

impl Opacity {
    /// Fully transparent.
    pub const HIDDEN: Self = Self(0.0);
    /// Fully opaque.
    pub const SHOWN: Self = Self(1.0);

    /// Creates a new opacity, clamping to valid range. NaN maps to hidden.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::HIDDEN;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the opacity value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Linear interpolation towards `target`; `progress` is clamped to 0.0–1.0.
    #[must_use]
    pub fn lerp(self, target: Self, progress: f32) -> Self {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        Self::new(self.0 + (target.0 - self.0) * t)
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::SHOWN
    }
}

// =============================================================================
// ScreenOrientation
// =============================================================================

/// Screen status of the player view, as understood by the native player.
///
/// The wire flag is `0` for fullscreen (landscape) and `1` for the inline
/// portrait layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenOrientation {
    /// Fullscreen, rotated to landscape.
    Fullscreen,
    /// Inline portrait layout.
    #[default]
    Portrait,
}

impl ScreenOrientation {
    /// Returns the flag passed to the native fullscreen command.
    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            Self::Fullscreen => 0,
            Self::Portrait => 1,
        }
    }

    /// Returns the other orientation.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Fullscreen => Self::Portrait,
            Self::Portrait => Self::Fullscreen,
        }
    }

    /// Returns true in fullscreen.
    #[must_use]
    pub fn is_fullscreen(self) -> bool {
        matches!(self, Self::Fullscreen)
    }
}
