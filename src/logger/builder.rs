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

use std::env;
use std::sync::Arc;

use crate::Error;
use crate::LogLevel;
use crate::Logger;
use crate::Trap;
use crate::writer::Writer;

/// A builder for configuring a [`Logger`].
///
/// Levels default to [`LogLevel::ALL`]; no writer is configured until one is added.
///
/// # Examples
///
/// ```
/// use logfan::ConsoleWriter;
/// use logfan::Logger;
///
/// let logger = Logger::builder()
///     .levels_from_env("MYAPP_LOG")
///     .writer(ConsoleWriter::new())
///     .build();
/// ```
#[must_use = "call `build` to create the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    levels: LogLevel,
    levels_env: Option<String>,
    writers: Vec<Arc<dyn Writer>>,
    trap: Option<Arc<dyn Trap>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a new empty [`LoggerBuilder`].
    pub fn new() -> Self {
        Self {
            levels: LogLevel::ALL,
            levels_env: None,
            writers: vec![],
            trap: None,
        }
    }

    /// Set the level mask.
    pub fn levels(mut self, levels: LogLevel) -> Self {
        self.levels = levels;
        self
    }

    /// Read the level mask from the environment variable `name` when building, such as
    /// `MYAPP_LOG=error,warn`.
    ///
    /// If the variable is unset the configured mask is kept. If it cannot be parsed, the
    /// error goes to the trap and the configured mask is kept.
    pub fn levels_from_env(mut self, name: impl Into<String>) -> Self {
        self.levels_env = Some(name.into());
        self
    }

    /// Add a writer.
    pub fn writer(mut self, writer: impl Writer) -> Self {
        self.writers.push(Arc::new(writer));
        self
    }

    /// Add a writer that is shared with other loggers.
    pub fn shared_writer(mut self, writer: Arc<dyn Writer>) -> Self {
        self.writers.push(writer);
        self
    }

    /// Set the trap receiving delivery errors.
    ///
    /// Default to [`DefaultTrap`](crate::DefaultTrap).
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Some(Arc::new(trap));
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        let mut logger = Logger::new(self.levels, self.writers);
        if let Some(trap) = self.trap {
            logger.set_trap(trap);
        }
        if let Some(name) = self.levels_env {
            if let Some(levels) = env_levels(&name, logger.trap()) {
                logger.set_levels(levels);
            }
        }
        logger
    }
}

fn env_levels(name: &str, trap: &dyn Trap) -> Option<LogLevel> {
    let value = env::var(name).ok()?;
    match value.parse::<LogLevel>() {
        Ok(levels) => Some(levels),
        Err(err) => {
            let err = Error::new("failed to parse levels from environment")
                .with_context("variable", name)
                .with_source(err);
            trap.trap(&err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ExecutionContext;
    use crate::PrefixFields;

    #[derive(Debug, Default)]
    struct Collect(Arc<Mutex<Vec<String>>>);

    impl Trap for Collect {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    #[test]
    fn test_defaults() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.levels(), LogLevel::ALL);
        assert!(logger.writers().is_empty());
    }

    #[derive(Debug)]
    struct Sink {
        context: ExecutionContext,
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Sink {
        fn new(lines: &Arc<Mutex<Vec<String>>>) -> Self {
            Sink {
                context: ExecutionContext::locked(),
                lines: lines.clone(),
            }
        }
    }

    impl Writer for Sink {
        fn prefix(&self) -> PrefixFields {
            PrefixFields::NONE
        }

        fn execution_context(&self) -> &ExecutionContext {
            &self.context
        }

        fn write(&self, line: &str) -> Result<(), Error> {
            self.lines.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_owned_and_shared_writers() {
        let owned = Arc::new(Mutex::new(vec![]));
        let shared_lines = Arc::new(Mutex::new(vec![]));
        let shared: Arc<dyn Writer> = Arc::new(Sink::new(&shared_lines));

        let first = Logger::builder()
            .writer(Sink::new(&owned))
            .shared_writer(shared.clone())
            .trap(Collect::default())
            .build();
        let second = Logger::builder().shared_writer(shared).build();

        first.log(LogLevel::INFO, "one");
        second.log(LogLevel::INFO, "two");

        assert_eq!(*owned.lock().unwrap(), vec!["[] one"]);
        assert_eq!(*shared_lines.lock().unwrap(), vec!["[] one", "[] two"]);
    }

    #[test]
    fn test_levels_from_env() {
        // SAFETY: the variable name is unique to this test
        unsafe { env::set_var("LOGFAN_TEST_LEVELS_VALID", "error|warning") };
        let logger = Logger::builder()
            .levels_from_env("LOGFAN_TEST_LEVELS_VALID")
            .build();
        assert_eq!(logger.levels(), LogLevel::ERROR | LogLevel::WARN);

        let logger = Logger::builder()
            .levels(LogLevel::INFO)
            .levels_from_env("LOGFAN_TEST_LEVELS_UNSET")
            .build();
        assert_eq!(logger.levels(), LogLevel::INFO);
    }

    #[test]
    fn test_invalid_env_levels_are_trapped() {
        let errors = Arc::new(Mutex::new(vec![]));
        // SAFETY: the variable name is unique to this test
        unsafe { env::set_var("LOGFAN_TEST_LEVELS_INVALID", "error,loud") };
        let logger = Logger::builder()
            .levels(LogLevel::DEBUG)
            .levels_from_env("LOGFAN_TEST_LEVELS_INVALID")
            .trap(Collect(errors.clone()))
            .build();

        assert_eq!(logger.levels(), LogLevel::DEBUG);
        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("LOGFAN_TEST_LEVELS_INVALID"), "{}", errors[0]);
        assert!(errors[0].contains("loud"), "{}", errors[0]);
    }
}
