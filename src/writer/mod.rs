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

//! Writers deliver formatted lines to their destinations.
//!
//! A [`Writer`] declares which prefix fields its lines carry and the [`ExecutionContext`] its
//! deliveries run in. The [`Logger`](crate::Logger) formats one line per writer and hands it
//! over through that context.

use std::fmt;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crate::Error;
use crate::PrefixFields;
use crate::execute::ExecutionContext;

pub use self::console::ConsoleWriter;
pub use self::file::FileWriter;
pub use self::file::FileWriterBuilder;
pub use self::testing::Testing;

mod console;
pub mod file;
mod testing;

/// A destination for log lines.
///
/// Implement this trait to add custom destinations.
///
/// # Examples
///
/// ```
/// use std::sync::Mutex;
///
/// use logfan::Error;
/// use logfan::PrefixFields;
/// use logfan::Writer;
/// use logfan::execute::ExecutionContext;
///
/// #[derive(Debug, Default)]
/// struct Memory {
///     context: ExecutionContext,
///     lines: Mutex<Vec<String>>,
/// }
///
/// impl Writer for Memory {
///     fn prefix(&self) -> PrefixFields {
///         PrefixFields::LEVEL
///     }
///
///     fn execution_context(&self) -> &ExecutionContext {
///         &self.context
///     }
///
///     fn write(&self, line: &str) -> Result<(), Error> {
///         self.lines.lock().unwrap().push(line.to_string());
///         Ok(())
///     }
/// }
/// ```
pub trait Writer: fmt::Debug + Send + Sync + 'static {
    /// The prefix fields rendered in front of every line this writer receives.
    fn prefix(&self) -> PrefixFields;

    /// The context deliveries to this writer run in.
    fn execution_context(&self) -> &ExecutionContext;

    /// Deliver one formatted line, without trailing newline.
    fn write(&self, line: &str) -> Result<(), Error>;

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Prefix fields that can be replaced through a shared reference.
pub(crate) struct AtomicPrefix(AtomicU32);

impl AtomicPrefix {
    pub(crate) fn new(fields: PrefixFields) -> Self {
        Self(AtomicU32::new(fields.bits()))
    }

    pub(crate) fn load(&self) -> PrefixFields {
        PrefixFields::from_bits(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, fields: PrefixFields) {
        self.0.store(fields.bits(), Ordering::Release);
    }
}

impl fmt::Debug for AtomicPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.load(), f)
    }
}
