// SPDX-License-Identifier: MPL-2.0
//! Single-writer event loop around a [`PlaybackCoordinator`].
//!
//! Hosts, native adapters and the coordinator's own timers all post
//! [`Input`]s into one unbounded channel. The session drains that channel in
//! arrival order, so every state change happens on one task.
//!
//! The coordinator only keeps a weak sender for its timers: once every
//! [`SessionHandle`] is dropped and no timer is pending, the channel closes
//! and [`Session::run`] tears the coordinator down instead of waiting
//! forever.

use crate::config::Config;
use crate::coordinator::{HostCallbacks, HostRequest, Input, PlaybackCoordinator};
use crate::error::{Error, Result};
use crate::overlay;
use crate::player::{NativeEvent, NativePlayer};
use tokio::sync::mpsc;

/// Cloneable sender for posting inputs to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Input>,
}

impl SessionHandle {
    /// Posts an input. Fails once the session has shut down.
    pub fn send(&self, input: impl Into<Input>) -> Result<()> {
        self.tx
            .send(input.into())
            .map_err(|_| Error::SessionClosed)
    }

    pub fn native(&self, event: NativeEvent) -> Result<()> {
        self.send(event)
    }

    pub fn overlay(&self, message: overlay::Message) -> Result<()> {
        self.send(message)
    }

    pub fn tap(&self) -> Result<()> {
        self.send(Input::SurfaceTapped)
    }

    pub fn request(&self, request: HostRequest) -> Result<()> {
        self.send(Input::Host(request))
    }

    pub fn dispose(&self) -> Result<()> {
        self.send(Input::Dispose)
    }
}

pub struct Session<P: NativePlayer> {
    coordinator: PlaybackCoordinator<P>,
    rx: mpsc::UnboundedReceiver<Input>,
    handle: SessionHandle,
}

impl<P: NativePlayer> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

impl<P: NativePlayer> Session<P> {
    /// Builds and mounts a coordinator. Must be called within a tokio runtime.
    pub fn start(config: Config, player: P, callbacks: HostCallbacks) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut coordinator = PlaybackCoordinator::new(config, player, callbacks, tx.downgrade());
        coordinator.initialize();
        let handle = SessionHandle { tx };
        let session = Self {
            coordinator,
            rx,
            handle: handle.clone(),
        };
        (session, handle)
    }

    /// Another handle to this session.
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    #[must_use]
    pub fn coordinator(&self) -> &PlaybackCoordinator<P> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut PlaybackCoordinator<P> {
        &mut self.coordinator
    }

    /// Applies an input right away, bypassing the queue.
    pub fn dispatch(&mut self, input: impl Into<Input>) {
        self.coordinator.handle(input.into());
    }

    /// Handles every input already queued. Returns how many were handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(input) = self.rx.try_recv() {
            self.coordinator.handle(input);
            handled += 1;
        }
        handled
    }

    /// Runs until the coordinator is disposed.
    ///
    /// Returns the coordinator on a clean dispose. When every handle is
    /// dropped first, the coordinator is disposed anyway and
    /// [`Error::SessionClosed`] is returned.
    pub async fn run(self) -> Result<PlaybackCoordinator<P>> {
        let Self {
            mut coordinator,
            mut rx,
            handle,
        } = self;
        // Only external handles keep the loop alive.
        drop(handle);

        while let Some(input) = rx.recv().await {
            coordinator.handle(input);
            if coordinator.is_disposed() {
                tracing::debug!("session finished");
                return Ok(coordinator);
            }
        }

        tracing::warn!("all session handles dropped, disposing");
        coordinator.dispose();
        Err(Error::SessionClosed)
    }
}
