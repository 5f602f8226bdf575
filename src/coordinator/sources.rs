// SPDX-License-Identifier: MPL-2.0
//! Source (quality) selection.
//!
//! Switching source reloads the stream in the native player, which starts
//! over from the beginning. The position at the time of the switch is kept
//! and restored with a seek once the new stream reports it has buffered.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSelection {
    selected: usize,
    menu_open: bool,
    resume_at_ms: Option<i64>,
}

impl SourceSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    /// Closes the menu. Returns whether it was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }

    /// Switches to `index`, remembering where playback was.
    ///
    /// Returns false, changing nothing, when `index` is not below `available`.
    pub fn select(&mut self, index: usize, available: usize, position_ms: i64) -> bool {
        if index >= available {
            return false;
        }
        self.selected = index;
        self.menu_open = false;
        self.resume_at_ms = Some(position_ms);
        true
    }

    /// Position to restore after a switch, consumed once.
    pub fn take_resume(&mut self) -> Option<i64> {
        self.resume_at_ms.take()
    }

    #[must_use]
    pub fn pending_resume(&self) -> Option<i64> {
        self.resume_at_ms
    }
}
