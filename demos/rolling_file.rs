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

use std::num::NonZeroU64;
use std::num::NonZeroUsize;

use logfan::ConsoleWriter;
use logfan::FileWriter;
use logfan::LogLevel;
use logfan::Logger;
use logfan::PrefixFields;
use logfan::execute::ExecutionContext;

fn main() {
    let rolling = FileWriter::builder("logs")
        .execution_context(ExecutionContext::queued("rolling-file"))
        .max_file_size(NonZeroU64::new(1024 * 1024).unwrap())
        .max_file_count(NonZeroUsize::new(10).unwrap())
        .build();

    let logger = Logger::builder()
        .levels(LogLevel::ALL)
        .writer(rolling)
        .writer(ConsoleWriter::new().with_prefix(PrefixFields::LEVEL | PrefixFields::DATE))
        .build();

    let repeat = 1;

    for i in 0..repeat {
        logfan::error!(logger, "Hello error!");
        logfan::warn!(logger, "Hello warn!");
        logfan::info!(logger, "Hello info!");
        logfan::event!(logger, "Hello event!");
        logfan::debug!(logger, "Hello debug!");

        if i + 1 < repeat {
            std::thread::sleep(std::time::Duration::from_secs(10));
        }
    }

    logger.flush();
}
