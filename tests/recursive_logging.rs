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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;

use logfan::ConsoleWriter;
use logfan::Error;
use logfan::FileWriter;
use logfan::LogLevel;
use logfan::Logger;
use logfan::PrefixFields;
use logfan::Writer;
use logfan::execute::ExecutionContext;

// ensure logfan doesn't deadlock on recursive logging
#[test]
fn test_meta_logging_in_format_works() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::builder()
        .writer(ConsoleWriter::new().with_prefix(PrefixFields::LEVEL))
        .writer(ConsoleWriter::new().use_system_log(true))
        .writer(
            FileWriter::builder(dir.path())
                .execution_context(ExecutionContext::queued("recursive-file-writer"))
                .build(),
        )
        .build();
    logfan::bridge::setup_log_crate(Arc::new(logger));

    struct Thing<'a>(&'a str);

    impl std::fmt::Display for Thing<'_> {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            log::debug!("formatting wrapping ({})", self.0);
            f.write_str(self.0)
        }
    }

    log::info!("I'm logging {}!", Thing("aha"));
    log::logger().flush();
}

static ECHO_LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Default)]
struct Echo {
    context: ExecutionContext,
    lines: Arc<Mutex<Vec<String>>>,
}

impl Writer for Echo {
    fn prefix(&self) -> PrefixFields {
        PrefixFields::LEVEL
    }

    fn execution_context(&self) -> &ExecutionContext {
        &self.context
    }

    fn write(&self, line: &str) -> Result<(), Error> {
        self.lines.lock().unwrap().push(line.to_string());
        if !line.starts_with("[DEBUG]") {
            if let Some(logger) = ECHO_LOGGER.get() {
                logfan::debug!(logger, "echo of {line}");
            }
        }
        Ok(())
    }
}

// a writer logging through its own logger re-enters its own lock on the same thread
#[test]
fn test_writer_logging_to_itself_works() {
    let echo = Echo::default();
    let lines = echo.lines.clone();
    let logger = ECHO_LOGGER.get_or_init(|| {
        Logger::builder()
            .levels(LogLevel::ALL)
            .writer(echo)
            .build()
    });

    logfan::info!(logger, "hello");

    assert_eq!(
        *lines.lock().unwrap(),
        vec!["[INFO] hello", "[DEBUG] echo of [INFO] hello"]
    );
}
