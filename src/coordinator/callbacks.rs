// SPDX-License-Identifier: MPL-2.0
//! Optional host callbacks.
//!
//! Every callback is optional; invoking an absent one is a no-op. The
//! coordinator calls them after its own state has been updated for the
//! event, so a callback reading the coordinator sees the new state.

use crate::domain::BufferedRange;
use std::fmt;

type Hook = Box<dyn FnMut() + Send>;
type ProgressHook = Box<dyn FnMut(i64, i64) + Send>;
type RangesHook = Box<dyn FnMut(&[BufferedRange]) + Send>;
type FlagHook = Box<dyn FnMut(bool) + Send>;

/// Host callbacks, built with chained setters.
///
/// # Example
///
/// ```
/// use player_controls::coordinator::HostCallbacks;
///
/// let callbacks = HostCallbacks::new()
///     .on_player_finished(|| println!("done"))
///     .on_player_progress(|current, total| println!("{current}/{total}"));
/// # let _ = callbacks;
/// ```
#[derive(Default)]
pub struct HostCallbacks {
    player_playing: Option<Hook>,
    player_paused: Option<Hook>,
    player_buffering: Option<Hook>,
    player_buffer_ok: Option<Hook>,
    player_finished: Option<Hook>,
    player_progress: Option<ProgressHook>,
    player_buffer_change: Option<RangesHook>,
    screen_update: Option<Hook>,
    screen_rotation: Option<FlagHook>,
    navigate_back: Option<Hook>,
}

impl fmt::Debug for HostCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCallbacks")
            .field("player_playing", &self.player_playing.is_some())
            .field("player_paused", &self.player_paused.is_some())
            .field("player_buffering", &self.player_buffering.is_some())
            .field("player_buffer_ok", &self.player_buffer_ok.is_some())
            .field("player_finished", &self.player_finished.is_some())
            .field("player_progress", &self.player_progress.is_some())
            .field("player_buffer_change", &self.player_buffer_change.is_some())
            .field("screen_update", &self.screen_update.is_some())
            .field("screen_rotation", &self.screen_rotation.is_some())
            .field("navigate_back", &self.navigate_back.is_some())
            .finish()
    }
}

impl HostCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_player_playing(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.player_playing = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_player_paused(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.player_paused = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_player_buffering(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.player_buffering = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_player_buffer_ok(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.player_buffer_ok = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_player_finished(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.player_finished = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_player_progress(mut self, f: impl FnMut(i64, i64) + Send + 'static) -> Self {
        self.player_progress = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_player_buffer_change(
        mut self,
        f: impl FnMut(&[BufferedRange]) + Send + 'static,
    ) -> Self {
        self.player_buffer_change = Some(Box::new(f));
        self
    }

    /// Called once the native rotation has settled after a fullscreen toggle.
    #[must_use]
    pub fn screen_update(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.screen_update = Some(Box::new(f));
        self
    }

    /// Called on every fullscreen toggle with the new fullscreen flag.
    #[must_use]
    pub fn on_screen_rotation(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.screen_rotation = Some(Box::new(f));
        self
    }

    /// Asks the host to pop its navigation stack.
    #[must_use]
    pub fn on_navigate_back(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.navigate_back = Some(Box::new(f));
        self
    }

    pub(crate) fn player_playing(&mut self) {
        call(&mut self.player_playing);
    }

    pub(crate) fn player_paused(&mut self) {
        call(&mut self.player_paused);
    }

    pub(crate) fn player_buffering(&mut self) {
        call(&mut self.player_buffering);
    }

    pub(crate) fn player_buffer_ok(&mut self) {
        call(&mut self.player_buffer_ok);
    }

    pub(crate) fn player_finished(&mut self) {
        call(&mut self.player_finished);
    }

    pub(crate) fn player_progress(&mut self, current_ms: i64, total_ms: i64) {
        if let Some(f) = self.player_progress.as_mut() {
            f(current_ms, total_ms);
        }
    }

    pub(crate) fn player_buffer_change(&mut self, ranges: &[BufferedRange]) {
        if let Some(f) = self.player_buffer_change.as_mut() {
            f(ranges);
        }
    }

    pub(crate) fn screen_updated(&mut self) {
        call(&mut self.screen_update);
    }

    pub(crate) fn screen_rotated(&mut self, fullscreen: bool) {
        if let Some(f) = self.screen_rotation.as_mut() {
            f(fullscreen);
        }
    }

    pub(crate) fn navigated_back(&mut self) {
        call(&mut self.navigate_back);
    }
}

fn call(hook: &mut Option<Hook>) {
    if let Some(f) = hook.as_mut() {
        f();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn absent_callbacks_are_no_ops() {
        let mut callbacks = HostCallbacks::new();
        callbacks.player_playing();
        callbacks.player_paused();
        callbacks.player_buffering();
        callbacks.player_buffer_ok();
        callbacks.player_finished();
        callbacks.player_progress(1, 2);
        callbacks.player_buffer_change(&[]);
        callbacks.screen_updated();
        callbacks.screen_rotated(true);
        callbacks.navigated_back();
    }

    #[test]
    fn present_callbacks_are_invoked() {
        let count = Arc::new(AtomicUsize::new(0));
        let progress = Arc::new(Mutex::new(Vec::new()));

        let c = Arc::clone(&count);
        let p = Arc::clone(&progress);
        let mut callbacks = HostCallbacks::new()
            .on_player_finished(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .on_player_progress(move |current, total| {
                p.lock().unwrap().push((current, total));
            });

        callbacks.player_finished();
        callbacks.player_finished();
        callbacks.player_progress(1000, 5000);

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(*progress.lock().unwrap(), vec![(1000, 5000)]);
    }

    #[test]
    fn debug_reports_presence_only() {
        let callbacks = HostCallbacks::new().on_navigate_back(|| {});
        let debug = format!("{:?}", callbacks);
        assert!(debug.contains("navigate_back: true"));
        assert!(debug.contains("player_playing: false"));
    }
}
