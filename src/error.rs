// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! The coordination core never fails: every user or native event is either
//! applied or ignored. Errors only come from the edges (configuration files
//! and a session whose input channel went away).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config Error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Every handle to the session was dropped before it was disposed.
    #[error("Session closed before dispose")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
