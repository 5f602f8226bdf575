// SPDX-License-Identifier: MPL-2.0
//! Playback domain types.
//!
//! This module contains value objects that are independent of any
//! timer, runtime or native-player concerns.

pub mod newtypes;
pub mod playback;

// Re-export commonly used types
pub use newtypes::{Opacity, ScreenOrientation};
pub use playback::{BufferedRange, PlaybackSnapshot};
