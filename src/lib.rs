// SPDX-License-Identifier: MPL-2.0
//! `player_controls` drives the controls overlay of a native video player.
//!
//! It owns the timing logic around the native view: auto-hiding controls
//! with interruptible timers, the drag-versus-progress precedence of the
//! seek bar, and optional forward-seek limiting for content that must be
//! watched in order. Rendering and the native player itself stay outside;
//! the crate consumes [`player::NativeEvent`]s and gestures and emits
//! [`player::PlayerCommand`]s plus a renderable [`coordinator::PlayerView`].

#![doc(html_root_url = "https://docs.rs/player_controls/0.3.0")]

pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod format;
pub mod overlay;
pub mod player;
pub mod session;
