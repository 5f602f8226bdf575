// SPDX-License-Identifier: MPL-2.0
//! Native player port definition.
//!
//! This module defines the [`NativePlayer`] trait, the command set the
//! coordinator sends through it, and the events the native side reports
//! back. Platform adapters implement the trait.
//!
//! # Design Notes
//!
//! - Commands are **fire-and-forget**: `dispatch` returns nothing and no
//!   acknowledgement is awaited. Success or failure shows up later as
//!   events.
//! - Event payloads carry at most one logical argument, mirroring the
//!   native callback surface.

mod logging;

pub use logging::LoggingPlayer;

use crate::domain::{BufferedRange, ScreenOrientation};
use tokio::sync::mpsc;

/// Command sent to the native player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Start or resume playback.
    Play,
    /// Pause playback at the current position.
    Pause,
    /// Stop playback.
    Stop,
    /// Seek to an absolute position in milliseconds.
    SeekTo(u64),
    /// Enter or leave fullscreen.
    SetFullscreen(ScreenOrientation),
    /// Switch the player to another stream.
    LoadSource {
        url: String,
        autoplay: bool,
        looping: bool,
        muted: bool,
    },
}

/// Event reported by the native player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeEvent {
    Playing,
    Paused,
    Buffering,
    BufferOk,
    Finished,
    BufferChange(Vec<BufferedRange>),
    Progress { current_ms: i64, total_ms: i64 },
}

/// Port for the platform-native player view.
///
/// # Example
///
/// ```
/// use player_controls::player::{NativePlayer, PlayerCommand};
///
/// struct Recorder(Vec<PlayerCommand>);
///
/// impl NativePlayer for Recorder {
///     fn dispatch(&mut self, command: PlayerCommand) {
///         self.0.push(command);
///     }
/// }
///
/// let mut player = Recorder(Vec::new());
/// player.dispatch(PlayerCommand::Play);
/// assert_eq!(player.0, vec![PlayerCommand::Play]);
/// ```
pub trait NativePlayer {
    /// Sends a command to the native player without waiting for it.
    fn dispatch(&mut self, command: PlayerCommand);
}

impl<P: NativePlayer + ?Sized> NativePlayer for Box<P> {
    fn dispatch(&mut self, command: PlayerCommand) {
        (**self).dispatch(command);
    }
}

/// Forwards commands to another task, typically the one owning the
/// platform view. A closed receiver drops the command.
impl NativePlayer for mpsc::UnboundedSender<PlayerCommand> {
    fn dispatch(&mut self, command: PlayerCommand) {
        if self.send(command).is_err() {
            tracing::debug!("native player channel closed, command dropped");
        }
    }
}
