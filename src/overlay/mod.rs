// SPDX-License-Identifier: MPL-2.0
//! Controls overlay: transport bar state and seek-bar drag interaction.
//!
//! The overlay turns raw slider gestures into seek intents and decides what
//! the seek bar shows. While the user's finger is on the bar, the drag value
//! wins over every progress snapshot. After release the released value keeps
//! being shown until the next snapshot arrives, so the thumb never snaps back
//! to the pre-seek position.

mod view;

pub use view::{BufferTrack, ControlsView, FullscreenIcon, PlayIcon, ViewContext};

use crate::domain::PlaybackSnapshot;

/// Messages emitted by the overlay widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Play/pause button pressed.
    TogglePlayback,

    /// Seek bar moved while held. Position in milliseconds.
    SeekPreview(f64),

    /// Seek bar released at the given position in milliseconds.
    SeekRelease(f64),

    /// Source-quality button pressed.
    OpenSourceMenu,

    /// Fullscreen button pressed.
    ToggleFullscreen,
}

/// A completed seek gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRequest {
    /// Requested position in milliseconds (not yet clamped).
    pub target_ms: i64,
    /// The gesture went below the position it started from.
    pub retreated: bool,
}

impl SeekRequest {
    /// A programmatic seek that did not come from a drag.
    #[must_use]
    pub fn direct(target_ms: i64) -> Self {
        Self {
            target_ms,
            retreated: false,
        }
    }
}

/// Effects produced by overlay interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// The bar is being dragged; position in milliseconds.
    SeekPreview(i64),
    /// The bar was released.
    SeekComplete(SeekRequest),
    TogglePlayback,
    OpenSourceMenu,
    ToggleFullscreen,
}

/// Transient state of a seek-bar drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub pending_value_ms: i64,
    /// Displayed position when the drag started.
    origin_ms: i64,
    /// Lowest value seen during the drag.
    lowest_ms: i64,
}

impl DragState {
    fn start(origin_ms: i64, value_ms: i64) -> Self {
        Self {
            is_dragging: true,
            pending_value_ms: value_ms,
            origin_ms,
            lowest_ms: value_ms.min(origin_ms),
        }
    }

    fn update(&mut self, value_ms: i64) {
        self.pending_value_ms = value_ms;
        self.lowest_ms = self.lowest_ms.min(value_ms);
    }

    fn retreated(&self) -> bool {
        self.lowest_ms < self.origin_ms
    }
}

/// Overlay state owned by the coordinator.
#[derive(Debug, Clone, Default)]
pub struct ControlsOverlay {
    drag: DragState,
    /// Position shown by the seek bar and the current-time label.
    display_ms: i64,
}

impl ControlsOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an overlay message.
    ///
    /// Note: Takes `Message` by value following the `update(message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::TogglePlayback => Effect::TogglePlayback,
            Message::SeekPreview(value) => {
                let value_ms = slider_to_ms(value);
                if self.drag.is_dragging {
                    self.drag.update(value_ms);
                } else {
                    self.drag = DragState::start(self.display_ms, value_ms);
                }
                self.display_ms = value_ms;
                Effect::SeekPreview(value_ms)
            }
            Message::SeekRelease(value) => {
                let value_ms = slider_to_ms(value);
                let retreated = if self.drag.is_dragging {
                    self.drag.update(value_ms);
                    self.drag.retreated()
                } else {
                    value_ms < self.display_ms
                };
                self.drag = DragState::default();
                // Held until the next snapshot.
                self.display_ms = value_ms;
                Effect::SeekComplete(SeekRequest {
                    target_ms: value_ms,
                    retreated,
                })
            }
            Message::OpenSourceMenu => Effect::OpenSourceMenu,
            Message::ToggleFullscreen => Effect::ToggleFullscreen,
        }
    }

    /// Applies a progress snapshot unless a drag is in progress.
    pub fn on_snapshot(&mut self, snapshot: &PlaybackSnapshot) {
        if !self.drag.is_dragging {
            self.display_ms = snapshot.current_ms;
        }
    }

    /// Drops any drag and shows `current_ms` again.
    ///
    /// Used when a seek was refused and the bar must return to the real
    /// playback position, and when playback finished.
    pub fn revert(&mut self, current_ms: i64) {
        self.drag = DragState::default();
        self.display_ms = current_ms;
    }

    /// Overrides the displayed position after an accepted seek whose target
    /// differs from the released value (clamping).
    pub fn hold(&mut self, position_ms: i64) {
        self.drag = DragState::default();
        self.display_ms = position_ms;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Position currently shown by the seek bar, in milliseconds.
    #[must_use]
    pub fn displayed_ms(&self) -> i64 {
        self.display_ms
    }
}

fn slider_to_ms(value: f64) -> i64 {
    if value.is_finite() {
        // Saturating float-to-int cast; sub-millisecond precision is dropped.
        value as i64
    } else {
        0
    }
}
