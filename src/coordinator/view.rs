// SPDX-License-Identifier: MPL-2.0
//! Render data for the whole player view.

use super::PlaybackCoordinator;
use crate::config::MAX_TITLE_CHARS;
use crate::domain::Opacity;
use crate::overlay::{ControlsView, ViewContext};
use crate::player::NativePlayer;
use tokio::time::Instant;

/// Top bar shown in fullscreen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    pub title: Option<String>,
}

/// One row of the source menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Everything drawn on top of the native video surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    /// Shared by the transport bar and the fullscreen toolbar.
    pub opacity: Opacity,
    pub interaction_armed: bool,
    /// `None` when controls are disabled.
    pub controls: Option<ControlsView>,
    /// Present in fullscreen only.
    pub toolbar: Option<ToolbarView>,
    pub show_replay: bool,
    pub show_buffering: bool,
    /// Present while the source menu is open.
    pub source_menu: Option<Vec<SourceEntry>>,
}

/// Shortens titles for the fullscreen toolbar.
///
/// ```
/// use player_controls::coordinator::shorten_title;
///
/// assert_eq!(shorten_title("Short"), "Short");
/// assert_eq!(shorten_title("A fairly long video title"), "A fairly long video...");
/// ```
#[must_use]
pub fn shorten_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

impl<P: NativePlayer> PlaybackCoordinator<P> {
    /// Derives the view for the current instant.
    #[must_use]
    pub fn view(&self) -> PlayerView {
        self.view_at(Instant::now())
    }

    /// Derives the view as it looks at `now`.
    #[must_use]
    pub fn view_at(&self, now: Instant) -> PlayerView {
        let config = &self.config;
        if !config.controls {
            return PlayerView {
                opacity: Opacity::HIDDEN,
                interaction_armed: false,
                controls: None,
                toolbar: None,
                show_replay: false,
                show_buffering: false,
                source_menu: None,
            };
        }

        let source_label = config.has_source_choice().then(|| {
            let index = self.sources.selected();
            config
                .sources
                .get(index)
                .map(|s| s.display_label(index))
                .unwrap_or_default()
        });

        let ctx = ViewContext {
            snapshot: &self.snapshot,
            orientation: self.orientation,
            is_training_mode: config.is_training_mode,
            source_label: source_label.as_deref(),
            source_menu_open: self.sources.is_menu_open(),
        };

        let toolbar = self.orientation.is_fullscreen().then(|| ToolbarView {
            title: config.video_title.as_deref().map(shorten_title),
        });

        let source_menu = self.sources.is_menu_open().then(|| {
            config
                .sources
                .iter()
                .enumerate()
                .map(|(index, source)| SourceEntry {
                    index,
                    label: source.display_label(index),
                    selected: index == self.sources.selected(),
                })
                .collect()
        });

        PlayerView {
            opacity: self.visibility.opacity(now),
            interaction_armed: self.visibility.is_interaction_armed(),
            controls: Some(self.overlay.view(&ctx)),
            toolbar,
            show_replay: self.show_replay,
            show_buffering: self.snapshot.is_buffering,
            source_menu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_are_untouched() {
        assert_eq!(shorten_title(""), "");
        assert_eq!(shorten_title("exactly twenty chars"), "exactly twenty chars");
    }

    #[test]
    fn long_titles_keep_nineteen_chars() {
        let shortened = shorten_title("twenty-one characters");
        assert_eq!(shortened, "twenty-one characte...");
        assert_eq!(shortened.chars().count(), 22);
    }

    #[test]
    fn shortening_counts_characters_not_bytes() {
        let title = "安全培训视频第一章节内容介绍与课程说明及注意事项";
        let shortened = shorten_title(title);
        assert!(shortened.ends_with("..."));
        assert_eq!(shortened.chars().count(), 22);
    }
}
