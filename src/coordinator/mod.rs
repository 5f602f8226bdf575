// SPDX-License-Identifier: MPL-2.0
//! Playback coordinator.
//!
//! Owns the auto-hide countdown, the visibility machine, the seek guard and
//! the overlay, and is the only thing that talks to the native player.
//! Every input (native event, overlay gesture, host request, fired timer)
//! goes through [`PlaybackCoordinator::handle`] in arrival order.
//!
//! # Lifecycle
//!
//! 1. [`PlaybackCoordinator::new`] builds the state (shown, armed, idle).
//! 2. [`PlaybackCoordinator::initialize`] loads the source and starts the
//!    first countdown. Needs a tokio runtime.
//! 3. Inputs are handled until [`PlaybackCoordinator::dispose`], which
//!    cancels every timer, stops the player once and makes the coordinator
//!    inert.

mod callbacks;
mod seek_guard;
mod sources;
mod timer;
mod view;
mod visibility;

pub use callbacks::HostCallbacks;
pub use seek_guard::{SeekDecision, SeekGuard};
pub use sources::SourceSelection;
pub use timer::{DeferredTask, TimerFired, TimerKind};
pub use view::{shorten_title, PlayerView, SourceEntry, ToolbarView};
pub use visibility::{Fade, Phase, Transition, Visibility, VisibilityState};

use crate::config::{Config, SCREEN_UPDATE_DELAY_MS};
use crate::domain::{PlaybackSnapshot, ScreenOrientation};
use crate::overlay::{self, ControlsOverlay, SeekRequest};
use crate::player::{NativeEvent, NativePlayer, PlayerCommand};
use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::time::Instant;

/// Requests a host makes on the player view directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    Play,
    Pause,
    Stop,
    SeekTo(i64),
}

/// Every input the coordinator reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Native(NativeEvent),
    Overlay(overlay::Message),
    Host(HostRequest),
    /// Tap on the video surface outside the controls.
    SurfaceTapped,
    SelectSource(usize),
    CloseSourceMenu,
    /// Back button of the fullscreen toolbar.
    FullscreenBack,
    /// Platform back button.
    HardwareBack,
    Timer(TimerFired),
    Dispose,
}

impl From<TimerFired> for Input {
    fn from(fired: TimerFired) -> Self {
        Self::Timer(fired)
    }
}

impl From<NativeEvent> for Input {
    fn from(event: NativeEvent) -> Self {
        Self::Native(event)
    }
}

impl From<overlay::Message> for Input {
    fn from(msg: overlay::Message) -> Self {
        Self::Overlay(msg)
    }
}

/// Result of a seek request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOutcome {
    /// A seek to this position was dispatched.
    Issued(u64),
    /// Refused by the seek guard.
    Rejected,
    /// Dropped: controls not armed while paused, or after teardown.
    Ignored,
}

/// What the platform back button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    ExitedFullscreen,
    NavigatedBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Disposed,
}

pub struct PlaybackCoordinator<P: NativePlayer> {
    config: Config,
    player: P,
    callbacks: HostCallbacks,
    inbox: WeakUnboundedSender<Input>,
    lifecycle: Lifecycle,

    snapshot: PlaybackSnapshot,
    overlay: ControlsOverlay,
    visibility: VisibilityState,
    seek_guard: Option<SeekGuard>,
    sources: SourceSelection,
    orientation: ScreenOrientation,
    show_replay: bool,
    /// Set by "finished": the countdown stays off until the next interaction.
    auto_hide_parked: bool,

    hide_timer: DeferredTask,
    fade_timer: DeferredTask,
    screen_update_timer: DeferredTask,
}

impl<P: NativePlayer> std::fmt::Debug for PlaybackCoordinator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("lifecycle", &self.lifecycle)
            .field("snapshot", &self.snapshot)
            .field("visibility", &self.visibility)
            .field("seek_guard", &self.seek_guard)
            .field("orientation", &self.orientation)
            .field("hide_timer_armed", &self.hide_timer.is_armed())
            .finish_non_exhaustive()
    }
}

impl<P: NativePlayer> PlaybackCoordinator<P> {
    /// Builds a coordinator. Fired timers are posted to `inbox`.
    pub fn new(
        config: Config,
        player: P,
        callbacks: HostCallbacks,
        inbox: WeakUnboundedSender<Input>,
    ) -> Self {
        let seek_guard = (!config.can_seek_unwatch).then(SeekGuard::new);
        Self {
            config,
            player,
            callbacks,
            inbox,
            lifecycle: Lifecycle::Created,
            snapshot: PlaybackSnapshot::default(),
            overlay: ControlsOverlay::new(),
            visibility: VisibilityState::new(),
            seek_guard,
            sources: SourceSelection::new(),
            orientation: ScreenOrientation::default(),
            show_replay: false,
            auto_hide_parked: false,
            hide_timer: DeferredTask::new(TimerKind::AutoHide),
            fade_timer: DeferredTask::new(TimerKind::FadeSettled),
            screen_update_timer: DeferredTask::new(TimerKind::ScreenUpdate),
        }
    }

    /// Mount: loads the configured source and starts the first countdown.
    pub fn initialize(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        tracing::debug!(controls = self.config.controls, "player view mounted");

        if let Some(url) = self.config.source_url(self.sources.selected()) {
            let command = PlayerCommand::LoadSource {
                url: url.to_string(),
                autoplay: self.config.autoplay,
                looping: self.config.looping,
                muted: self.config.muted,
            };
            self.player.dispatch(command);
        }
        self.arm_auto_hide();
    }

    /// Unmount: cancels every timer and stops the player. Idempotent.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.hide_timer.cancel();
        self.fade_timer.cancel();
        self.screen_update_timer.cancel();
        if self.lifecycle == Lifecycle::Mounted {
            self.player.dispatch(PlayerCommand::Stop);
        }
        self.lifecycle = Lifecycle::Disposed;
        tracing::debug!("player view disposed");
    }

    /// Handles one input. Inputs after `dispose` are dropped.
    pub fn handle(&mut self, input: Input) {
        if self.lifecycle == Lifecycle::Disposed {
            tracing::trace!(?input, "input after dispose dropped");
            return;
        }
        match input {
            Input::Native(event) => self.on_native(event),
            Input::Overlay(msg) => self.on_overlay(msg),
            Input::Host(HostRequest::Play) => self.play(),
            Input::Host(HostRequest::Pause) => self.pause(),
            Input::Host(HostRequest::Stop) => self.stop(),
            Input::Host(HostRequest::SeekTo(ms)) => {
                self.seek_to(ms);
            }
            Input::SurfaceTapped => self.on_surface_tap(),
            Input::SelectSource(index) => self.select_source(index),
            Input::CloseSourceMenu => self.close_source_menu(),
            Input::FullscreenBack => self.on_fullscreen_back(),
            Input::HardwareBack => {
                self.on_hardware_back();
            }
            Input::Timer(fired) => self.on_timer(fired),
            Input::Dispose => self.dispose(),
        }
    }

    // =========================================================================
    // Native events
    // =========================================================================

    fn on_native(&mut self, event: NativeEvent) {
        let controls = self.config.controls;
        match event {
            NativeEvent::Playing => {
                self.snapshot.is_playing = true;
                self.snapshot.is_buffering = false;
                self.callbacks.player_playing();
            }
            NativeEvent::Paused => {
                self.snapshot.is_playing = false;
                self.callbacks.player_paused();
            }
            NativeEvent::Buffering => {
                self.snapshot.is_buffering = true;
                self.callbacks.player_buffering();
            }
            NativeEvent::BufferOk => {
                self.snapshot.is_buffering = false;
                self.callbacks.player_buffer_ok();
                if let Some(position) = self.sources.take_resume() {
                    let position = self.snapshot.clamp_position(position);
                    tracing::debug!(position, "restoring position after source switch");
                    if !self.overlay.is_dragging() {
                        self.overlay.hold(position);
                    }
                    self.player
                        .dispatch(PlayerCommand::SeekTo(position.unsigned_abs()));
                }
            }
            NativeEvent::Finished => {
                self.hide_timer.cancel();
                self.auto_hide_parked = true;
                if controls {
                    let fade = Duration::from_millis(crate::config::FINISHED_FADE_MS);
                    let transition = self.visibility.force_shown(Instant::now(), fade);
                    self.apply_transition(transition);
                    self.show_replay = true;
                }
                self.snapshot.reset_finished();
                self.overlay.revert(0);
                tracing::debug!("playback finished");
                self.callbacks.player_finished();
            }
            NativeEvent::BufferChange(ranges) => {
                self.snapshot.buffered_ranges = ranges;
                self.callbacks
                    .player_buffer_change(&self.snapshot.buffered_ranges);
            }
            NativeEvent::Progress {
                current_ms,
                total_ms,
            } => {
                self.on_external_snapshot(current_ms, total_ms);
                self.callbacks.player_progress(current_ms, total_ms);
            }
        }
    }

    /// Ingests a progress report from the native player.
    ///
    /// The watermark always advances; the seek bar only follows when the
    /// user is not dragging it.
    pub fn on_external_snapshot(&mut self, current_ms: i64, total_ms: i64) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.snapshot.record_progress(current_ms, total_ms);
        if let Some(guard) = self.seek_guard.as_mut() {
            guard.observe(self.snapshot.current_ms);
        }
        if self.config.controls {
            self.overlay.on_snapshot(&self.snapshot);
        }
        tracing::trace!(current_ms, total_ms, "progress");
    }

    // =========================================================================
    // Overlay and surface gestures
    // =========================================================================

    fn on_overlay(&mut self, msg: overlay::Message) {
        if !self.config.controls {
            return;
        }
        match self.overlay.handle(msg) {
            overlay::Effect::None => {}
            overlay::Effect::SeekPreview(_) => {
                // No countdown while the finger is on the bar.
                self.hide_timer.cancel();
            }
            overlay::Effect::SeekComplete(request) => {
                self.request_seek(request);
            }
            overlay::Effect::TogglePlayback => {
                if !self.visibility.is_interaction_armed() {
                    tracing::debug!("play/pause ignored, controls not armed");
                    return;
                }
                if self.snapshot.is_playing {
                    self.pause();
                } else {
                    self.play();
                }
            }
            overlay::Effect::OpenSourceMenu => self.open_source_menu(),
            overlay::Effect::ToggleFullscreen => {
                if self.config.is_training_mode {
                    return;
                }
                if !self.visibility.is_interaction_armed() {
                    tracing::debug!("fullscreen toggle ignored, controls not armed");
                    return;
                }
                self.flip_orientation();
            }
        }
    }

    /// A tap on the video toggles the controls.
    fn on_surface_tap(&mut self) {
        if !self.config.controls {
            return;
        }
        self.auto_hide_parked = false;
        match self.visibility.heading() {
            Visibility::Shown => {
                self.sources.close_menu();
                self.begin_fade(Visibility::Hidden);
            }
            Visibility::Hidden => self.begin_fade(Visibility::Shown),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub fn play(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.show_replay = false;
        self.note_interaction();
        self.player.dispatch(PlayerCommand::Play);
    }

    pub fn pause(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.note_interaction();
        self.player.dispatch(PlayerCommand::Pause);
    }

    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.hide_timer.cancel();
        self.player.dispatch(PlayerCommand::Stop);
    }

    /// Seeks to an absolute position on behalf of the host.
    pub fn seek_to(&mut self, target_ms: i64) -> SeekOutcome {
        self.request_seek(SeekRequest::direct(target_ms))
    }

    /// Applies the visibility check, range clamping and the seek guard,
    /// then dispatches the seek.
    pub fn request_seek(&mut self, request: SeekRequest) -> SeekOutcome {
        if self.lifecycle == Lifecycle::Disposed {
            return SeekOutcome::Ignored;
        }
        let current = self.snapshot.current_ms;
        if self.config.controls
            && !self.visibility.is_interaction_armed()
            && !self.snapshot.is_playing
        {
            tracing::debug!(target_ms = request.target_ms, "seek ignored, controls hidden");
            self.overlay.revert(current);
            return SeekOutcome::Ignored;
        }

        let mut target = self.snapshot.clamp_position(request.target_ms);
        let decision = self
            .seek_guard
            .as_ref()
            .map(|guard| guard.evaluate(target, current, request.retreated));
        match decision {
            None | Some(SeekDecision::Accept) => {}
            Some(SeekDecision::Clamp(watermark)) => {
                tracing::debug!(requested = target, watermark, "seek clamped to watermark");
                target = watermark;
            }
            Some(SeekDecision::Reject) => {
                tracing::warn!(
                    target_ms = target,
                    current_ms = current,
                    "seek past watched content rejected"
                );
                self.overlay.revert(current);
                // Resume a countdown the drag suspended.
                self.arm_auto_hide();
                return SeekOutcome::Rejected;
            }
        }
        if let Some(guard) = self.seek_guard.as_mut() {
            guard.commit(current);
        }

        self.overlay.hold(target);
        self.show_replay = false;
        self.note_interaction();
        // Clamped into [0, total], never negative.
        let target = target.unsigned_abs();
        self.player.dispatch(PlayerCommand::SeekTo(target));
        SeekOutcome::Issued(target)
    }

    // =========================================================================
    // Source menu
    // =========================================================================

    fn open_source_menu(&mut self) {
        if !self.config.controls || !self.config.has_source_choice() {
            return;
        }
        self.sources.open_menu();
        self.auto_hide_parked = false;
        self.hide_timer.cancel();
        if self.visibility.heading() == Visibility::Hidden {
            self.begin_fade(Visibility::Shown);
        }
    }

    fn close_source_menu(&mut self) {
        if self.sources.close_menu() {
            self.arm_auto_hide();
        }
    }

    fn select_source(&mut self, index: usize) {
        if self.config.src.is_some() {
            return;
        }
        let available = self.config.sources.len();
        if !self.sources.select(index, available, self.snapshot.current_ms) {
            tracing::warn!(index, available, "source index out of range");
            return;
        }
        if let Some(source) = self.config.sources.get(index) {
            tracing::debug!(index, url = %source.url, "switching source");
            let command = PlayerCommand::LoadSource {
                url: source.url.clone(),
                autoplay: true,
                looping: self.config.looping,
                muted: self.config.muted,
            };
            self.player.dispatch(command);
        }
        self.note_interaction();
    }

    // =========================================================================
    // Fullscreen and back navigation
    // =========================================================================

    fn flip_orientation(&mut self) {
        self.orientation = self.orientation.toggled();
        let fullscreen = self.orientation.is_fullscreen();
        tracing::debug!(fullscreen, "fullscreen toggled");
        self.callbacks.screen_rotated(fullscreen);
        self.player
            .dispatch(PlayerCommand::SetFullscreen(self.orientation));
        self.screen_update_timer
            .reschedule(Duration::from_millis(SCREEN_UPDATE_DELAY_MS), &self.inbox);
    }

    fn on_fullscreen_back(&mut self) {
        if self.visibility.is_interaction_armed() {
            self.flip_orientation();
        }
        if self.config.is_training_mode {
            self.callbacks.navigated_back();
        }
    }

    /// Platform back: leaves fullscreen first, otherwise pops navigation.
    pub fn on_hardware_back(&mut self) -> BackAction {
        if self.orientation.is_fullscreen() {
            self.flip_orientation();
            BackAction::ExitedFullscreen
        } else {
            self.callbacks.navigated_back();
            BackAction::NavigatedBack
        }
    }

    // =========================================================================
    // Timers and visibility
    // =========================================================================

    fn on_timer(&mut self, fired: TimerFired) {
        match fired.kind {
            TimerKind::AutoHide => {
                if !self.hide_timer.accept(fired) {
                    return;
                }
                if self.sources.is_menu_open() || self.overlay.is_dragging() {
                    return;
                }
                tracing::debug!("auto-hide countdown elapsed");
                self.begin_fade(Visibility::Hidden);
            }
            TimerKind::FadeSettled => {
                if !self.fade_timer.accept(fired) {
                    return;
                }
                if let Some(settled) = self.visibility.settle() {
                    self.on_settled(settled);
                }
            }
            TimerKind::ScreenUpdate => {
                if self.screen_update_timer.accept(fired) {
                    self.callbacks.screen_updated();
                }
            }
        }
    }

    fn begin_fade(&mut self, target: Visibility) {
        if target == Visibility::Hidden {
            self.hide_timer.cancel();
        }
        let transition = self
            .visibility
            .begin(target, Instant::now(), self.config.fade().as_duration());
        self.apply_transition(transition);
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Unchanged => {}
            Transition::Started(duration) => self.fade_timer.reschedule(duration, &self.inbox),
            Transition::Settled(settled) => {
                self.fade_timer.cancel();
                self.on_settled(settled);
            }
        }
    }

    fn on_settled(&mut self, settled: Visibility) {
        tracing::debug!(?settled, "controls settled");
        if settled == Visibility::Shown {
            self.arm_auto_hide();
        }
    }

    /// A control was used: un-park auto-hide, close the source menu and
    /// restart the countdown.
    fn note_interaction(&mut self) {
        self.auto_hide_parked = false;
        self.sources.close_menu();
        self.arm_auto_hide();
    }

    /// (Re)starts the countdown when the controls are, or are becoming,
    /// visible and nothing suspends auto-hide.
    fn arm_auto_hide(&mut self) {
        if !self.config.controls
            || self.lifecycle != Lifecycle::Mounted
            || self.auto_hide_parked
            || self.sources.is_menu_open()
            || self.overlay.is_dragging()
            || self.visibility.heading() != Visibility::Shown
        {
            return;
        }
        self.hide_timer
            .reschedule(self.config.hide_delay().as_duration(), &self.inbox);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn overlay(&self) -> &ControlsOverlay {
        &self.overlay
    }

    #[must_use]
    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    #[must_use]
    pub fn seek_guard(&self) -> Option<&SeekGuard> {
        self.seek_guard.as_ref()
    }

    #[must_use]
    pub fn orientation(&self) -> ScreenOrientation {
        self.orientation
    }

    #[must_use]
    pub fn is_source_menu_open(&self) -> bool {
        self.sources.is_menu_open()
    }

    #[must_use]
    pub fn selected_source(&self) -> usize {
        self.sources.selected()
    }

    #[must_use]
    pub fn is_hide_timer_armed(&self) -> bool {
        self.hide_timer.is_armed()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    #[must_use]
    pub fn player(&self) -> &P {
        &self.player
    }
}
