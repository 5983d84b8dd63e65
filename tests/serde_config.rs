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

#![cfg(feature = "serde")]

use logfan::LogLevel;
use logfan::PrefixFields;
use logfan::Writer;
use logfan::writer::file::FileConfig;

#[test]
fn test_level_and_prefix_as_names() {
    let levels = LogLevel::ERROR | LogLevel::WARN;
    assert_eq!(serde_json::to_string(&levels).unwrap(), r#""warn,error""#);
    assert_eq!(
        serde_json::from_str::<LogLevel>(r#""error | warning""#).unwrap(),
        levels
    );
    assert_eq!(serde_json::from_str::<LogLevel>("3").unwrap(), LogLevel::DEBUG | LogLevel::INFO);
    assert!(serde_json::from_str::<LogLevel>(r#""chatty""#).is_err());

    assert_eq!(serde_json::to_string(&PrefixFields::ALL).unwrap(), r#""all""#);
    assert_eq!(
        serde_json::from_str::<PrefixFields>(r#""level,date""#).unwrap(),
        PrefixFields::LEVEL | PrefixFields::DATE
    );
}

#[test]
fn test_file_config_into_writer() {
    let temp_dir = tempfile::tempdir().expect("failed to create a temporary directory");
    let json = serde_json::json!({
        "directory": temp_dir.path(),
        "max_file_size": 4096,
        "max_file_count": 2,
        "prefix": "level",
        "resume_latest": true,
    });

    let config: FileConfig = serde_json::from_value(json).unwrap();
    assert_eq!(config.queue, None);

    let writer = config.into_builder().build();
    assert_eq!(writer.max_file_size(), 4096);
    assert_eq!(writer.max_file_count(), 2);
    assert_eq!(writer.prefix(), PrefixFields::LEVEL);
    assert_eq!(writer.directory(), temp_dir.path());
}

#[test]
fn test_file_config_rejects_zero_count() {
    let json = r#"{"directory": "/tmp/logfan", "max_file_count": 0}"#;
    assert!(serde_json::from_str::<FileConfig>(json).is_err());
}
