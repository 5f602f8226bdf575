// SPDX-License-Identifier: MPL-2.0
//! A native player stand-in that only logs what it is asked to do.

use super::{NativePlayer, PlayerCommand};

/// Logs every command at `info` level and counts them.
///
/// Useful for headless hosts and for the demo binary.
#[derive(Debug, Default)]
pub struct LoggingPlayer {
    dispatched: usize,
}

impl LoggingPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commands dispatched so far.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}

impl NativePlayer for LoggingPlayer {
    fn dispatch(&mut self, command: PlayerCommand) {
        self.dispatched += 1;
        match &command {
            PlayerCommand::SeekTo(ms) => tracing::info!(target_ms = ms, "native seek"),
            PlayerCommand::SetFullscreen(orientation) => {
                tracing::info!(flag = orientation.flag(), "native fullscreen");
            }
            PlayerCommand::LoadSource { url, .. } => tracing::info!(%url, "native load source"),
            other => tracing::info!(command = ?other, "native command"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_dispatched_commands() {
        let mut player = LoggingPlayer::new();
        player.dispatch(PlayerCommand::Play);
        player.dispatch(PlayerCommand::SeekTo(10));
        assert_eq!(player.dispatched(), 2);
    }
}
