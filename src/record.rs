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

//! Log record and metadata.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;

use jiff::Timestamp;

use crate::LogLevel;

/// The queue label reported for callers outside any queued execution context.
pub const UNKNOWN_QUEUE: &str = "Unknown Queue";

/// The thread label reported for the main thread.
pub const MAIN_THREAD: &str = "Main Thread";

thread_local! {
    static QUEUE_LABEL: RefCell<Option<String>> = const { RefCell::new(None) };
}

pub(crate) fn set_queue_label(label: &str) {
    QUEUE_LABEL.with(|cell| *cell.borrow_mut() = Some(label.to_string()));
}

/// The label of the queued execution context running the current thread.
///
/// Returns [`UNKNOWN_QUEUE`] when called outside the worker of a queued context.
pub fn current_queue_label() -> String {
    QUEUE_LABEL.with(|cell| {
        cell.borrow()
            .clone()
            .unwrap_or_else(|| UNKNOWN_QUEUE.to_string())
    })
}

/// A display name for the current thread.
///
/// The main thread is [`MAIN_THREAD`]; other threads use their name if they have a non-empty
/// one, or their id otherwise.
///
/// The main thread is recognized by the name `main` the standard library gives it, so a
/// spawned thread named `main` is labelled [`MAIN_THREAD`] as well.
pub fn current_thread_label() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some("main") => MAIN_THREAD.to_string(),
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{:?}", thread.id()),
    }
}

/// Reduce a type path produced by [`function_name!`](crate::function_name) to a function name.
#[doc(hidden)]
pub fn __function_name(type_name: &'static str) -> &'static str {
    let mut name = type_name.strip_suffix("::__f").unwrap_or(type_name);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name.rsplit("::").next().unwrap_or(name)
}

/// A log message, as handed from a call site to [`Logger::send`].
///
/// The payload is formatted only once the message passes the level gate. Unset metadata is
/// resolved at that point too: the timestamp defaults to now, the queue and thread labels to
/// those of the calling thread.
///
/// [`Logger::send`]: crate::Logger::send
#[derive(Clone, Copy)]
pub struct Record<'a> {
    level: LogLevel,
    payload: &'a dyn fmt::Display,
    timestamp: Option<Timestamp>,
    queue: Option<&'a str>,
    thread: Option<&'a str>,
    file: &'a str,
    function: &'a str,
    line: u32,
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("level", &self.level)
            .field("payload", &format_args!("{}", self.payload))
            .field("timestamp", &self.timestamp)
            .field("queue", &self.queue)
            .field("thread", &self.thread)
            .field("file", &self.file)
            .field("function", &self.function)
            .field("line", &self.line)
            .finish()
    }
}

impl<'a> Record<'a> {
    /// Returns a new builder.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }

    /// The level of the message.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// The message body.
    pub fn payload(&self) -> &'a dyn fmt::Display {
        self.payload
    }

    /// The source file containing the message.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// The function containing the message.
    pub fn function(&self) -> &'a str {
        self.function
    }

    /// The line containing the message.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Resolve the metadata of this record, filling in defaults.
    pub fn metadata(&self) -> Metadata<'a> {
        Metadata {
            level: self.level,
            timestamp: self.timestamp.unwrap_or_else(Timestamp::now),
            queue: match self.queue {
                Some(queue) => Cow::Borrowed(queue),
                None => Cow::Owned(current_queue_label()),
            },
            thread: match self.thread {
                Some(thread) => Cow::Borrowed(thread),
                None => Cow::Owned(current_thread_label()),
            },
            file: self.file,
            function: self.function,
            line: self.line,
        }
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                level: LogLevel::INFO,
                payload: &"",
                timestamp: None,
                queue: None,
                thread: None,
                file: "",
                function: "",
                line: 0,
            },
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`level`](Record::level).
    pub fn level(mut self, level: LogLevel) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`payload`](Record::payload).
    pub fn payload(mut self, payload: &'a dyn fmt::Display) -> Self {
        self.record.payload = payload;
        self
    }

    /// Set the timestamp. Default to the time the record passes the gate.
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.record.timestamp = Some(timestamp);
        self
    }

    /// Set the queue label. Default to [`current_queue_label`].
    pub fn queue(mut self, queue: &'a str) -> Self {
        self.record.queue = Some(queue);
        self
    }

    /// Set the thread label. Default to [`current_thread_label`].
    pub fn thread(mut self, thread: &'a str) -> Self {
        self.record.thread = Some(thread);
        self
    }

    /// Set [`file`](Record::file).
    pub fn file(mut self, file: &'a str) -> Self {
        self.record.file = file;
        self
    }

    /// Set [`function`](Record::function).
    pub fn function(mut self, function: &'a str) -> Self {
        self.record.function = function;
        self
    }

    /// Set [`line`](Record::line).
    pub fn line(mut self, line: u32) -> Self {
        self.record.line = line;
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record<'a> {
        self.record
    }
}

/// The resolved metadata of a message, shared by every writer it fans out to.
#[derive(Clone, Debug)]
pub struct Metadata<'a> {
    /// The level of the message.
    pub level: LogLevel,
    /// When the message was sent.
    pub timestamp: Timestamp,
    /// The label of the queue the message was sent from.
    pub queue: Cow<'a, str>,
    /// The label of the thread the message was sent from.
    pub thread: Cow<'a, str>,
    /// The source file path.
    pub file: &'a str,
    /// The function name.
    pub function: &'a str,
    /// The source line.
    pub line: u32,
}
