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

use std::io;
use std::io::Write;

use crate::Error;
use crate::PrefixFields;
use crate::execute::ExecutionContext;
use crate::writer::AtomicPrefix;
use crate::writer::Writer;

/// A writer that prints lines to the console.
///
/// Lines go to standard output by default. With [`use_system_log`](Self::use_system_log) they
/// go to standard error instead, the stream system log collectors (journald, launchd, a
/// container runtime) pick up.
///
/// # Examples
///
/// ```
/// use logfan::ConsoleWriter;
/// use logfan::PrefixFields;
///
/// let writer = ConsoleWriter::new().with_prefix(PrefixFields::LEVEL | PrefixFields::DATE);
/// ```
#[derive(Debug)]
pub struct ConsoleWriter {
    system_log: bool,
    prefix: AtomicPrefix,
    context: ExecutionContext,
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleWriter {
    /// Create a console writer printing every prefix field to standard output, in a locked
    /// context.
    pub fn new() -> Self {
        Self {
            system_log: false,
            prefix: AtomicPrefix::new(PrefixFields::ALL),
            context: ExecutionContext::locked(),
        }
    }

    /// Send lines to the system log stream instead of standard output.
    pub fn use_system_log(mut self, system_log: bool) -> Self {
        self.system_log = system_log;
        self
    }

    /// Set the prefix fields.
    pub fn with_prefix(self, prefix: PrefixFields) -> Self {
        self.prefix.store(prefix);
        self
    }

    /// Set the execution context.
    pub fn with_execution_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Replace the prefix fields of a writer already in use.
    pub fn set_prefix(&self, prefix: PrefixFields) {
        self.prefix.store(prefix);
    }

    /// Whether lines go to the system log stream.
    pub fn uses_system_log(&self) -> bool {
        self.system_log
    }
}

impl Writer for ConsoleWriter {
    fn prefix(&self) -> PrefixFields {
        self.prefix.load()
    }

    fn execution_context(&self) -> &ExecutionContext {
        &self.context
    }

    fn write(&self, line: &str) -> Result<(), Error> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        if self.system_log {
            io::stderr().write_all(&bytes).map_err(Error::from_io_error)
        } else {
            io::stdout().write_all(&bytes).map_err(Error::from_io_error)
        }
    }

    fn flush(&self) -> Result<(), Error> {
        if self.system_log {
            io::stderr().flush().map_err(Error::from_io_error)
        } else {
            io::stdout().flush().map_err(Error::from_io_error)
        }
    }
}
