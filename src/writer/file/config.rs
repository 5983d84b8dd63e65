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
use std::path::PathBuf;

use crate::PrefixFields;
use crate::execute::ExecutionContext;
use crate::writer::file::DEFAULT_MAX_FILE_COUNT;
use crate::writer::file::DEFAULT_MAX_FILE_SIZE;
use crate::writer::file::FileWriterBuilder;

/// Plain settings of a [`FileWriter`](crate::FileWriter), loadable from configuration files
/// with the `serde` feature.
///
/// Every field but `directory` is optional when deserializing.
///
/// ```json
/// {
///   "directory": "/var/log/myapp",
///   "max_file_size": 1048576,
///   "max_file_count": 3,
///   "prefix": "level|date",
///   "queue": "file-writer"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct FileConfig {
    /// The directory files are written to.
    pub directory: PathBuf,
    /// The size limit of a single file, in bytes.
    #[cfg_attr(feature = "serde", serde(default = "default_max_file_size"))]
    pub max_file_size: NonZeroU64,
    /// The number of files kept in the directory.
    #[cfg_attr(feature = "serde", serde(default = "default_max_file_count"))]
    pub max_file_count: NonZeroUsize,
    /// The prefix fields.
    #[cfg_attr(feature = "serde", serde(default = "default_prefix"))]
    pub prefix: PrefixFields,
    /// Deliver lines on a background worker with this label instead of under a lock.
    #[cfg_attr(feature = "serde", serde(default))]
    pub queue: Option<String>,
    /// Keep appending to the newest existing file.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resume_latest: bool,
}

#[cfg(feature = "serde")]
fn default_max_file_size() -> NonZeroU64 {
    DEFAULT_MAX_FILE_SIZE
}

#[cfg(feature = "serde")]
fn default_max_file_count() -> NonZeroUsize {
    DEFAULT_MAX_FILE_COUNT
}

#[cfg(feature = "serde")]
fn default_prefix() -> PrefixFields {
    PrefixFields::ALL
}

impl FileConfig {
    /// Create settings with defaults for everything but the directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
            prefix: PrefixFields::ALL,
            queue: None,
            resume_latest: false,
        }
    }

    /// Turn the settings into a builder, so code-only options can still be added.
    pub fn into_builder(self) -> FileWriterBuilder {
        let context = match self.queue {
            Some(label) => ExecutionContext::queued(label),
            None => ExecutionContext::locked(),
        };
        FileWriterBuilder::new(self.directory)
            .execution_context(context)
            .prefix(self.prefix)
            .max_file_size(self.max_file_size)
            .max_file_count(self.max_file_count)
            .resume_latest(self.resume_latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_builder() {
        let temp_dir = tempfile::tempdir().expect("failed to create a temporary directory");
        let mut config = FileConfig::new(temp_dir.path());
        config.max_file_count = NonZeroUsize::new(2).unwrap();
        config.prefix = PrefixFields::LEVEL;
        config.queue = Some("config-file-writer".to_string());

        let writer = config.into_builder().build();
        assert_eq!(writer.max_file_count(), 2);
        assert_eq!(crate::Writer::prefix(&writer), PrefixFields::LEVEL);
        match crate::Writer::execution_context(&writer) {
            ExecutionContext::Queued(queue) => assert_eq!(queue.label(), "config-file-writer"),
            ExecutionContext::Locked(_) => panic!("expected a queued context"),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_defaults() {
        let config: FileConfig =
            serde_json::from_str(r#"{"directory": "/tmp/logfan", "prefix": "level|date"}"#)
                .unwrap();
        assert_eq!(config.directory, PathBuf::from("/tmp/logfan"));
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.max_file_count, DEFAULT_MAX_FILE_COUNT);
        assert_eq!(config.prefix, PrefixFields::LEVEL | PrefixFields::DATE);
        assert_eq!(config.queue, None);
        assert!(!config.resume_latest);
    }
}
