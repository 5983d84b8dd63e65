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

use crate::LogLevel;
use crate::Logger;
use crate::record::Record;

#[derive(Debug)]
struct LogCrateLogger(Arc<Logger>);

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.0.accepts(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = LogLevel::from(record.level());
        if !self.0.accepts(level) {
            return;
        }

        let record = Record::builder()
            .level(level)
            .payload(record.args())
            .file(record.file().unwrap_or_default())
            .function(record.module_path().unwrap_or_default())
            .line(record.line().unwrap_or_default())
            .build();
        self.0.send(&record);
    }

    fn flush(&self) {
        self.0.flush();
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] to forward every record of the log crate to
/// `logger`. Trace records are delivered as [`LogLevel::DEBUG`]. The module path of a record
/// stands in for its function name.
///
/// This function will set the global maximum log level to `Trace`; `logger`'s level mask does
/// the filtering. To override this, call [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logfan::Logger;
///
/// let logger = Arc::new(Logger::default());
/// logfan::bridge::try_setup_log_crate(logger).unwrap();
/// log::info!("forwarded");
/// ```
pub fn try_setup_log_crate(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogCrateLogger(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`] for details.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(logger: Arc<Logger>) {
    try_setup_log_crate(logger).expect(
        "logfan::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
