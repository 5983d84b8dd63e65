// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crate::LogLevel;

/// A filter that checks whether a message level is enabled.
///
/// The filter holds a mutable [`LogLevel`] mask. A level passes if it shares at least one bit
/// with the mask; a [`LogLevel::NONE`] mask rejects everything.
///
/// The mask can be changed at any time through a shared reference. A message that already
/// passed the gate is not affected by a later change.
pub struct LevelFilter {
    mask: AtomicU32,
}

impl LevelFilter {
    /// Create a new filter with the given mask.
    pub const fn new(mask: LogLevel) -> Self {
        Self {
            mask: AtomicU32::new(mask.bits()),
        }
    }

    /// The current mask.
    pub fn mask(&self) -> LogLevel {
        LogLevel::from_bits(self.mask.load(Ordering::Acquire))
    }

    /// Replace the mask.
    pub fn set_mask(&self, mask: LogLevel) {
        self.mask.store(mask.bits(), Ordering::Release);
    }

    /// Whether the mask lets any level through.
    pub fn enabled(&self) -> bool {
        !self.mask().is_none()
    }

    /// Whether a message of the given level passes the gate.
    pub fn accepts(&self, level: LogLevel) -> bool {
        let mask = self.mask();
        !mask.is_none() && mask.intersects(level)
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::new(LogLevel::ALL)
    }
}

impl fmt::Debug for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LevelFilter").field(&self.mask()).finish()
    }
}
