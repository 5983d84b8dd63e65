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

use logfan::ConsoleWriter;
use logfan::LogLevel;
use logfan::Logger;
use logfan::PrefixFields;

fn main() {
    let logger = Arc::new(
        Logger::builder()
            .levels(LogLevel::ALL)
            .levels_from_env("LOGFAN_LEVELS")
            .writer(ConsoleWriter::new().with_prefix(PrefixFields::LEVEL))
            .writer(ConsoleWriter::new().use_system_log(true))
            .build(),
    );
    logfan::bridge::setup_log_crate(logger.clone());

    logfan::error!(logger, "Hello error!");
    logfan::info!(logger, "Hello info!");

    // records of the log crate go through the same writers
    log::warn!("Hello from the log crate!");
    log::trace!("Trace is delivered as debug.");
}
