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

//! Handle errors that cannot be reported to the caller of [`Logger::send`].
//!
//! [`Logger::send`]: crate::Logger::send

use std::fmt;

use crate::Error;

mod default;

pub use self::default::DefaultTrap;

/// A trap that receives delivery errors of writers.
///
/// A writer runs behind its execution context, possibly on another thread, so its failures
/// are routed here instead of unwinding into the dispatcher.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error raised while delivering a line.
    fn trap(&self, err: &Error);
}
