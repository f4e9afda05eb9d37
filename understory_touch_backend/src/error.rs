// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup errors.

use core::fmt;

/// Why [`TouchBackend::setup`](crate::TouchBackend::setup) refused to run.
///
/// Both cases are invariant violations in the caller: a host must never have
/// two active backends. Propagate the error rather than continuing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SetupError {
    /// This backend is already set up; tear it down first.
    AlreadySetUp,
    /// Another backend holds the host.
    HostOccupied,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySetUp => f.write_str("touch backend is already set up"),
            Self::HostOccupied => {
                f.write_str("cannot have two touch backends on the same host at the same time")
            }
        }
    }
}

impl core::error::Error for SetupError {}
