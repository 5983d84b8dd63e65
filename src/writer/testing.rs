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

use crate::Error;
use crate::PrefixFields;
use crate::execute::ExecutionContext;
use crate::writer::AtomicPrefix;
use crate::writer::Writer;

/// A writer whose lines can be captured by a test harness (like `cargo test`), and thus the
/// outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// # Examples
///
/// ```
/// use logfan::Logger;
/// use logfan::writer::Testing;
///
/// let logger = Logger::builder().writer(Testing::default()).build();
/// logfan::info!(logger, "visible with --nocapture");
/// ```
#[derive(Debug)]
pub struct Testing {
    prefix: AtomicPrefix,
    context: ExecutionContext,
}

impl Default for Testing {
    fn default() -> Self {
        Self {
            prefix: AtomicPrefix::new(PrefixFields::ALL),
            context: ExecutionContext::locked(),
        }
    }
}

impl Testing {
    /// Set the prefix fields.
    ///
    /// Default to [`PrefixFields::ALL`].
    pub fn with_prefix(self, prefix: PrefixFields) -> Self {
        self.prefix.store(prefix);
        self
    }
}

impl Writer for Testing {
    fn prefix(&self) -> PrefixFields {
        self.prefix.load()
    }

    fn execution_context(&self) -> &ExecutionContext {
        &self.context
    }

    fn write(&self, line: &str) -> Result<(), Error> {
        eprintln!("{line}");
        Ok(())
    }
}
