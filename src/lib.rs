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

//! Logfan is a leveled logging library that fans every message out to a list of writers, each
//! with its own line prefix and execution context.
//!
//! # Overview
//!
//! A [`Logger`] holds a [`LogLevel`] mask and an ordered list of [`Writer`]s. A message passes
//! when its level intersects the mask; it is then formatted once per writer with that writer's
//! [`PrefixFields`] and delivered through the writer's [`ExecutionContext`], either inline under
//! a reentrant lock or on a background queue.
//!
//! Two writers are built in: [`ConsoleWriter`] for standard output or the system log stream,
//! and [`FileWriter`] for size-bounded rolling files with a cap on the number of files kept.
//!
//! # Examples
//!
//! Simple setup printing everything to standard output:
//!
//! ```
//! let logger = logfan::Logger::default();
//!
//! logfan::info!(logger, "This is an info message.");
//! ```
//!
//! Console and rolling files with different prefixes, the file written on a background queue:
//!
//! ```
//! use logfan::ConsoleWriter;
//! use logfan::FileWriter;
//! use logfan::LogLevel;
//! use logfan::Logger;
//! use logfan::PrefixFields;
//! use logfan::execute::ExecutionContext;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::builder()
//!     .levels(LogLevel::ALL.difference(LogLevel::DEBUG))
//!     .writer(ConsoleWriter::new().with_prefix(PrefixFields::LEVEL))
//!     .writer(
//!         FileWriter::builder(dir.path())
//!             .execution_context(ExecutionContext::queued("file-writer"))
//!             .build(),
//!     )
//!     .build();
//!
//! logfan::error!(logger, "Error message.");
//! logfan::debug!(logger, "Suppressed message.");
//! logger.flush();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod flags;
mod macros;

pub mod bridge;
pub mod execute;
pub mod filter;
pub mod layout;
pub mod record;
pub mod trap;
pub mod writer;

mod error;
mod level;
mod logger;

pub use self::error::Error;
pub use self::execute::ExecutionContext;
pub use self::layout::PrefixFields;
pub use self::level::LogLevel;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::trap::DefaultTrap;
pub use self::trap::Trap;
pub use self::writer::ConsoleWriter;
pub use self::writer::FileWriter;
pub use self::writer::FileWriterBuilder;
pub use self::writer::Writer;
