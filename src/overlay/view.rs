// SPDX-License-Identifier: MPL-2.0
//! Render data for the transport bar.
//!
//! Nothing here draws; the host renders a [`ControlsView`] with whatever
//! widget toolkit it uses.

use super::ControlsOverlay;
use crate::domain::{PlaybackSnapshot, ScreenOrientation};
use crate::format::format_progress;

/// Icon shown on the play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

/// Icon shown on the fullscreen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenIcon {
    /// Inline layout: the button enters fullscreen.
    Enter,
    /// Fullscreen: the button returns to the inline layout.
    Exit,
}

/// A buffered segment of the seek bar, already clipped to the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferTrack {
    pub start_ms: i64,
    pub end_ms: i64,
}

/// View context for deriving the transport bar.
pub struct ViewContext<'a> {
    pub snapshot: &'a PlaybackSnapshot,
    pub orientation: ScreenOrientation,
    pub is_training_mode: bool,
    /// Label of the selected source when a choice is offered.
    pub source_label: Option<&'a str>,
    pub source_menu_open: bool,
}

/// Everything the transport bar displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub play_icon: PlayIcon,
    pub current_label: String,
    pub total_label: String,
    pub slider_value_ms: i64,
    pub slider_max_ms: i64,
    pub buffer_tracks: Vec<BufferTrack>,
    /// `None` in training mode.
    pub fullscreen_button: Option<FullscreenIcon>,
    /// Source button label; `None` without a choice or while the menu is open.
    pub source_button: Option<String>,
}

impl ControlsOverlay {
    /// Derives the transport bar. Labels are computed fresh on every call.
    #[must_use]
    pub fn view(&self, ctx: &ViewContext<'_>) -> ControlsView {
        let snapshot = ctx.snapshot;
        let (current_label, total_label) = format_progress(self.display_ms, snapshot.total_ms);

        // Ranges are kept in the order given; overlaps are not merged.
        let buffer_tracks = snapshot
            .buffered_ranges
            .iter()
            .filter_map(|range| range.clipped(snapshot.total_ms))
            .map(|(start_ms, end_ms)| BufferTrack { start_ms, end_ms })
            .collect();

        let fullscreen_button = (!ctx.is_training_mode).then(|| {
            if ctx.orientation.is_fullscreen() {
                FullscreenIcon::Exit
            } else {
                FullscreenIcon::Enter
            }
        });

        let source_button = ctx
            .source_label
            .filter(|_| !ctx.source_menu_open)
            .map(str::to_string);

        ControlsView {
            play_icon: if snapshot.is_playing {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            },
            current_label,
            total_label,
            slider_value_ms: self.display_ms,
            slider_max_ms: snapshot.total_ms,
            buffer_tracks,
            fullscreen_button,
            source_button,
        }
    }
}
