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

//! Levels of log messages.

use std::fmt;

bit_set! {
    /// A set of message levels.
    ///
    /// A [`Logger`](crate::Logger) keeps a mask of the levels it lets through, and every message
    /// carries a level. Messages normally carry a single flag, but any combination is accepted:
    /// the gate tests for intersection.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfan::LogLevel;
    ///
    /// let mask = LogLevel::ERROR | LogLevel::WARN;
    /// assert!(mask.intersects(LogLevel::WARN));
    /// assert!(!mask.intersects(LogLevel::DEBUG));
    ///
    /// let parsed: LogLevel = "error, warn".parse().unwrap();
    /// assert_eq!(parsed, mask);
    /// ```
    pub struct LogLevel {
        /// Messages that help debugging.
        const DEBUG = 1 << 0, "debug";
        /// Additional information.
        const INFO = 1 << 1, "info";
        /// Application events.
        const EVENT = 1 << 2, "event";
        /// Warnings.
        const WARN = 1 << 3, "warn" | "warning";
        /// Errors.
        const ERROR = 1 << 4, "error";
        /// Events of the logging library itself. Not meant for application messages.
        const INTERNAL = 1 << 31, "internal" | "log";
    }
}

impl LogLevel {
    /// The display name used in message prefixes.
    ///
    /// Any set that is not exactly one named level, [`LogLevel::ALL`], is `CUSTOM`.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::DEBUG => "DEBUG",
            LogLevel::INFO => "INFO",
            LogLevel::EVENT => "EVENT",
            LogLevel::WARN => "WARNING",
            LogLevel::ERROR => "ERROR",
            LogLevel::INTERNAL => "LOG EVENT",
            LogLevel::ALL => "ALL",
            _ => "CUSTOM",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::ERROR,
            log::Level::Warn => LogLevel::WARN,
            log::Level::Info => LogLevel::INFO,
            log::Level::Debug | log::Level::Trace => LogLevel::DEBUG,
        }
    }
}
